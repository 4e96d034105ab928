use serde::{Deserialize, Serialize};

/// Body returned by the certificate login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CertLoginResponse {
    #[serde(default)]
    pub session_token: String,
    pub login_status: String,
}

/// Body returned by interactive login, logout and keep-alive.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub product: String,
    pub status: String,
    #[serde(default)]
    pub error: String,
}
