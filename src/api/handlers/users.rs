//! Handlers for user endpoints.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::user::{CreateUserRequest, UserResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every user together with the posts they created.
///
/// # Endpoint
///
/// `GET /api/users`
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<UserResponse>>, AppError> {
    let users = state.user_service.list_with_blogs().await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Registers a new user.
///
/// # Endpoint
///
/// `POST /api/users`
///
/// # Request Body
///
/// ```json
/// { "username": "mluukkai", "name": "Matti Luukkainen", "password": "salainen" }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if username or password is shorter than 3 characters
/// - 409 Conflict `"Username must be unique"`
pub async fn create_user_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    let user = state
        .user_service
        .create_user(payload.username, payload.name, payload.password)
        .await?;

    Ok((StatusCode::CREATED, Json(user.into())))
}
