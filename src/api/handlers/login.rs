//! Handler for the login endpoint.

use axum::{Json, extract::State};

use crate::api::dto::login::{LoginRequest, LoginResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Exchanges username and password for a bearer token.
///
/// # Endpoint
///
/// `POST /api/login`
///
/// # Request Body
///
/// ```json
/// { "username": "root", "password": "salainen" }
/// ```
///
/// # Response
///
/// ```json
/// { "token": "q5C0...", "username": "root", "name": "Superuser" }
/// ```
///
/// # Errors
///
/// Returns 401 Unauthorized with `"Invalid username or password"` for an
/// unknown user or wrong password.
pub async fn login_handler(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let session = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse::from(session)))
}
