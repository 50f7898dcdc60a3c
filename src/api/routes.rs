//! API route configuration.
//!
//! Routes are grouped by how they are protected; [`crate::routes::app_router`]
//! attaches authentication and rate limiting per group and nests everything
//! under `/api`.

use crate::api::handlers::{
    create_blog_handler, create_user_handler, delete_blog_handler, get_blog_handler,
    list_blogs_handler, list_users_handler, login_handler, reset_handler, stats_handler,
    update_blog_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Routes open to anonymous clients.
///
/// # Endpoints
///
/// - `GET  /blogs`       - List blog posts
/// - `GET  /blogs/{id}`  - Fetch one blog post
/// - `PUT  /blogs/{id}`  - Replace a blog post's fields
/// - `GET  /users`       - List users with their posts
/// - `POST /users`       - Register a user
/// - `GET  /stats`       - Blog list statistics
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", get(list_blogs_handler))
        .route("/blogs/{id}", get(get_blog_handler).put(update_blog_handler))
        .route("/users", get(list_users_handler).post(create_user_handler))
        .route("/stats", get(stats_handler))
}

/// Routes that require a Bearer token.
///
/// # Endpoints
///
/// - `POST   /blogs`       - Create a blog post
/// - `DELETE /blogs/{id}`  - Delete an own blog post
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/blogs", post(create_blog_handler))
        .route("/blogs/{id}", delete(delete_blog_handler))
}

/// `POST /login` - Exchange credentials for a Bearer token.
pub fn login_routes() -> Router<AppState> {
    Router::new().route("/login", post(login_handler))
}

/// `POST /testing/reset` - Wipe all data. Mounted only in the test environment.
pub fn testing_routes() -> Router<AppState> {
    Router::new().route("/testing/reset", post(reset_handler))
}
