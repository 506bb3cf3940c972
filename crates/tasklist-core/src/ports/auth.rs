//! Authentication ports.

use crate::domain::UserId;

/// Claims carried by an identity token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub user_id: UserId,
    /// Unix timestamp, seconds.
    pub issued_at: i64,
    /// Unix timestamp, seconds.
    pub expires_at: i64,
}

/// Issues and verifies signed, time-bounded identity tokens.
pub trait TokenService: Send + Sync {
    /// Issue a token for a user, valid from now for the configured TTL.
    fn generate_token(&self, user_id: UserId) -> Result<String, AuthError>;

    /// Verify signature and expiry and decode the claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Token lifetime in seconds.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password into a storable digest.
    fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored digest.
    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError>;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    MalformedToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("Token signing failed: {0}")]
    Signing(String),

    #[error("Hashing error: {0}")]
    HashingError(String),
}
