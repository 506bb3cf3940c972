use serde::{Deserialize, Serialize};

use super::{UserId, require_text};
use crate::error::DomainError;

/// User entity - a registered account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub password_hash: String,
}

/// Sign-up request as received from the boundary, password still in clear.
#[derive(Debug, Clone)]
pub struct SignUpInput {
    pub name: String,
    pub username: String,
    pub password: String,
}

impl SignUpInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name)?;
        require_text("username", &self.username)?;
        if self.password.is_empty() {
            return Err(DomainError::InvalidInput(
                "password must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// User row ready for insertion; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub username: String,
    pub password_hash: String,
}
