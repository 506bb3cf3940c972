//! Sign-up, sign-in and bearer token authentication.

use std::sync::Arc;

use crate::domain::{NewUser, SignUpInput, UserId};
use crate::error::{DomainError, RepoError};
use crate::ports::{AuthError, PasswordService, TokenService, UserRepository};

/// Orchestrates user creation and login over a user store, a password hasher
/// and a token codec.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a user and return the new id.
    ///
    /// Username uniqueness is left to the store's unique constraint; there
    /// is no lookup beforehand.
    pub async fn create_user(&self, input: SignUpInput) -> Result<UserId, DomainError> {
        input.validate()?;

        let password_hash = self
            .passwords
            .hash(&input.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = NewUser {
            name: input.name,
            username: input.username,
            password_hash,
        };

        let id = self.users.create(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => {
                DomainError::Conflict("username is already taken".to_string())
            }
            other => other.into(),
        })?;

        tracing::info!(user_id = id, "User registered");
        Ok(id)
    }

    /// Exchange credentials for a token.
    ///
    /// Unknown usernames and wrong passwords fail identically with
    /// [`AuthError::InvalidCredentials`].
    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self
            .tokens
            .generate_token(user.id)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::debug!(user_id = user.id, "Token issued");
        Ok(token)
    }

    /// Resolve a bearer token to the user it was issued for.
    pub fn authenticate(&self, token: &str) -> Result<UserId, AuthError> {
        Ok(self.tokens.validate_token(token)?.user_id)
    }

    /// Lifetime of issued tokens, in seconds.
    pub fn token_ttl_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }
}
