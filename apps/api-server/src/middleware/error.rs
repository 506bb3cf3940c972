//! Error handling - maps domain failures to RFC 7807 responses.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use tasklist_core::error::DomainError;
use tasklist_core::ports::AuthError;
use tasklist_shared::ErrorResponse;

/// Application-level error type that converts to RFC 7807 responses.
#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    BadRequest(String),
    Unauthorized(AuthError),
    Conflict(String),
    /// Detail is logged, never sent to the client.
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Unauthorized(err) => write!(f, "Unauthorized: {}", err),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::NotFound(detail) => ErrorResponse::not_found(detail),
            AppError::BadRequest(detail) => ErrorResponse::bad_request(detail),
            AppError::Unauthorized(err) => match err {
                AuthError::TokenExpired => ErrorResponse::new(401, "Token Expired")
                    .with_detail("Your authentication token has expired. Please sign in again."),
                AuthError::MissingAuth => ErrorResponse::new(401, "Authentication Required")
                    .with_detail("Please provide a valid Bearer token in the Authorization header."),
                AuthError::InvalidCredentials => {
                    ErrorResponse::unauthorized("invalid username or password")
                }
                other => ErrorResponse::new(401, "Invalid Token").with_detail(other.to_string()),
            },
            AppError::Conflict(detail) => ErrorResponse::conflict(detail),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Signing(msg) | AuthError::HashingError(msg) => AppError::Internal(msg),
            other => AppError::Unauthorized(other),
        }
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { entity_type, id } => {
                AppError::NotFound(format!("{} with id {} not found", entity_type, id))
            }
            DomainError::InvalidInput(msg) => AppError::BadRequest(msg),
            DomainError::Conflict(msg) => AppError::Conflict(msg),
            DomainError::Unauthorized(err) => err.into(),
            DomainError::Store(msg) => AppError::Internal(format!("store failure: {}", msg)),
            DomainError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_status_codes() {
        let cases = [
            (
                DomainError::NotFound {
                    entity_type: "todo list",
                    id: 1,
                },
                StatusCode::NOT_FOUND,
            ),
            (
                DomainError::InvalidInput("update has no values".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                DomainError::Conflict("taken".to_string()),
                StatusCode::CONFLICT,
            ),
            (
                DomainError::Unauthorized(AuthError::TokenExpired),
                StatusCode::UNAUTHORIZED,
            ),
            (
                DomainError::Store("connection reset".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }

    #[test]
    fn test_signing_failure_is_internal() {
        let err = AppError::from(AuthError::Signing("bad key".to_string()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[actix_web::test]
    async fn test_store_detail_is_not_leaked() {
        let err = AppError::from(DomainError::Store("password=hunter2".to_string()));
        let body = actix_web::body::to_bytes(err.error_response().into_body())
            .await
            .unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("hunter2"));
    }
}
