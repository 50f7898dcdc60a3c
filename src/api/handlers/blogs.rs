//! Handlers for blog endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::blog::{BlogResponse, CreateBlogRequest, UpdateBlogRequest};
use crate::api::middleware::auth::CurrentUser;
use crate::domain::entities::BlogUpdate;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::id::parse_id;

/// Lists every blog post with its creator.
///
/// # Endpoint
///
/// `GET /api/blogs`
pub async fn list_blogs_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<BlogResponse>>, AppError> {
    let blogs = state.blog_service.list_blogs().await?;
    Ok(Json(blogs.into_iter().map(BlogResponse::from).collect()))
}

/// Returns a single blog post.
///
/// # Endpoint
///
/// `GET /api/blogs/{id}`
///
/// # Errors
///
/// - 400 Bad Request `"Malformatted id"` if `id` is not a positive integer
/// - 404 Not Found `"Blog not found"`
pub async fn get_blog_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogResponse>, AppError> {
    let id = parse_id(&id)?;
    let blog = state.blog_service.get_blog(id).await?;
    Ok(Json(blog.into()))
}

/// Creates a blog post owned by the authenticated user.
///
/// # Endpoint
///
/// `POST /api/blogs` (Bearer token required)
///
/// # Request Body
///
/// ```json
/// {
///   "title": "React patterns",
///   "author": "Michael Chan",
///   "url": "https://reactpatterns.com/",
///   "likes": 7
/// }
/// ```
///
/// `likes` is optional and defaults to `0`.
///
/// # Errors
///
/// - 400 Bad Request `"Title, URL or Author missing"`, or negative likes
/// - 401 Unauthorized without a valid token
pub async fn create_blog_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(payload): Json<CreateBlogRequest>,
) -> Result<(StatusCode, Json<BlogResponse>), AppError> {
    payload.validate()?;

    let blog = state
        .blog_service
        .create_blog(
            &user,
            payload.title.unwrap_or_default(),
            payload.author.unwrap_or_default(),
            payload.url.unwrap_or_default(),
            payload.likes,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(blog.into())))
}

/// Replaces a blog post's title and author, and url/likes when given.
///
/// # Endpoint
///
/// `PUT /api/blogs/{id}`
///
/// Typically used by clients to register a like:
///
/// ```json
/// { "title": "React patterns", "author": "Michael Chan", "likes": 8 }
/// ```
///
/// # Errors
///
/// - 400 Bad Request on a malformatted id, missing title/author, or negative likes
/// - 404 Not Found `"Blog not found"`
pub async fn update_blog_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateBlogRequest>,
) -> Result<Json<BlogResponse>, AppError> {
    let id = parse_id(&id)?;
    payload.validate()?;

    let blog = state
        .blog_service
        .update_blog(id, BlogUpdate::from(payload))
        .await?;

    Ok(Json(blog.into()))
}

/// Deletes a blog post created by the authenticated user.
///
/// # Endpoint
///
/// `DELETE /api/blogs/{id}` (Bearer token required)
///
/// # Errors
///
/// - 400 Bad Request `"Malformatted id"`
/// - 401 Unauthorized without a valid token
/// - 403 Forbidden `"Permission denied"` if another user created the post
/// - 404 Not Found `"Blog not found"`
pub async fn delete_blog_handler(
    State(state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_id(&id)?;
    state.blog_service.delete_blog(id, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
