use serde::{Deserialize, Serialize};

// -------- REQUEST DTOs --------
//
// String fields default to empty when absent so that a missing field and an
// empty field are rejected the same way by the server's validation.

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String, // Plain text
}

/// `username` also accepts the account's email address.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String, // Plain text
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct UpdateProfileRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct GenerateSchemaRequest {
    #[serde(default)]
    pub prompt: String,
}
