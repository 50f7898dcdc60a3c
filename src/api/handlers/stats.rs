//! Handler for the blog list statistics endpoint.

use axum::{Json, extract::State};

use crate::domain::analytics::BlogSummary;
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregate statistics over every stored blog post.
///
/// # Endpoint
///
/// `GET /api/stats`
///
/// # Response
///
/// ```json
/// {
///   "blog_count": 6,
///   "total_likes": 36,
///   "favorite_blog": { "title": "Canonical string reduction", "author": "Edsger W. Dijkstra", "likes": 12 },
///   "most_blogs": { "author": "Robert C. Martin", "blogs": 3 },
///   "most_likes": { "author": "Edsger W. Dijkstra", "likes": 17 }
/// }
/// ```
///
/// The three optional fields are `null` when no posts exist.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<BlogSummary>, AppError> {
    let summary = state.blog_service.summary().await?;
    Ok(Json(summary))
}
