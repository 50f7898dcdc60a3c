//! DTOs for the login endpoint.

use serde::{Deserialize, Serialize};

use crate::application::services::LoginSession;

/// Request body for `POST /api/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub password: String,
}

/// Successful login: the bearer token plus the user's public identity.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub username: String,
    pub name: Option<String>,
}

impl From<LoginSession> for LoginResponse {
    fn from(session: LoginSession) -> Self {
        Self {
            token: session.token,
            username: session.user.username,
            name: session.user.name,
        }
    }
}
