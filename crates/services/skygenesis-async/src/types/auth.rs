use serde::{Deserialize, Serialize};

use super::users::User;

/// Email/password credentials for `/auth/login`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthCredentials {
    /// Account email
    pub email: String,
    /// Account password
    pub password: String,
}

impl AuthCredentials {
    /// Creates credentials
    #[must_use]
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for AuthCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Body of `/auth/refresh`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    /// Refresh token issued at login
    pub refresh_token: String,
}

/// Tokens returned by login and refresh
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Access token
    pub token: String,
    /// Refresh token
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Seconds until `token` expires
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<u64>,
    /// The authenticated user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
}
