//! Data Transfer Objects - request bodies and auth responses.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    pub name: String,
    pub username: String,
    pub password: String,
}

/// Request to exchange credentials for a token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInRequest {
    pub username: String,
    pub password: String,
}

/// Response containing the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: i64) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateListRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Partial list update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateListRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateItemRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub done: bool,
}

/// Partial item update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateItemRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_absent_fields_are_none() {
        let req: UpdateItemRequest = serde_json::from_str(r#"{"done":true}"#).unwrap();
        assert_eq!(req.done, Some(true));
        assert!(req.title.is_none());
        assert!(req.description.is_none());
    }

    #[test]
    fn test_create_item_defaults() {
        let req: CreateItemRequest = serde_json::from_str(r#"{"title":"Milk"}"#).unwrap();
        assert_eq!(req.description, "");
        assert!(!req.done);
    }

    #[test]
    fn test_auth_response_is_bearer() {
        let json = serde_json::to_value(AuthResponse::bearer("t".to_string(), 43200)).unwrap();
        assert_eq!(json["token_type"], "Bearer");
        assert_eq!(json["expires_in"], 43200);
    }
}
