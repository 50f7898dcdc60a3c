//! Handlers outside the regular API surface.

use axum::{extract::State, http::StatusCode};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Deletes every blog post and user account.
///
/// # Endpoint
///
/// `POST /api/testing/reset`
///
/// Mounted only when `APP_ENV=test`, for end-to-end suites that need a clean
/// database between runs. Session tokens go with their users.
pub async fn reset_handler(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    let blogs = state.blog_service.delete_all().await?;
    let users = state.user_service.delete_all().await?;

    tracing::warn!(blogs, users, "Test database reset");

    Ok(StatusCode::NO_CONTENT)
}

/// Fallback for requests no route or static file matched.
pub async fn unknown_endpoint() -> AppError {
    AppError::not_found("Unknown endpoint", json!({}))
}
