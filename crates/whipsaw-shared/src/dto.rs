//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request to login as the administrator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response carrying the issued credential.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub credential: String,
    pub token_type: String,
}

impl LoginResponse {
    pub fn bearer(credential: impl Into<String>) -> Self {
        Self {
            credential: credential.into(),
            token_type: "Bearer".to_string(),
        }
    }
}

/// Who a credential belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileResponse {
    pub username: String,
    pub role: String,
}

/// Payload of a successful delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedResponse {
    pub id: Uuid,
}
