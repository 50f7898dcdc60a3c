//! DTOs for blog endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Blog, BlogOwner, BlogUpdate};

/// Request body for `POST /api/blogs`.
///
/// Every field is optional at the JSON level so that a missing field yields
/// the domain error `"Title, URL or Author missing"` instead of a generic
/// deserialization rejection.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    /// Defaults to `0` when absent.
    #[serde(default)]
    #[validate(range(min = 0, message = "Likes must not be negative"))]
    pub likes: Option<i64>,
}

/// Request body for `PUT /api/blogs/{id}`.
///
/// `title` and `author` are required; `url` and `likes` are kept unchanged
/// when absent.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateBlogRequest {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "Likes must not be negative"))]
    pub likes: Option<i64>,
}

impl From<UpdateBlogRequest> for BlogUpdate {
    fn from(req: UpdateBlogRequest) -> Self {
        BlogUpdate {
            title: req.title.unwrap_or_default(),
            author: req.author.unwrap_or_default(),
            url: req.url,
            likes: req.likes,
        }
    }
}

/// Public identity of a blog's creator.
#[derive(Debug, Serialize)]
pub struct BlogOwnerResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
}

impl From<BlogOwner> for BlogOwnerResponse {
    fn from(owner: BlogOwner) -> Self {
        Self {
            id: owner.id,
            username: owner.username,
            name: owner.name,
        }
    }
}

/// JSON representation of a blog post.
#[derive(Debug, Serialize)]
pub struct BlogResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
    pub user: Option<BlogOwnerResponse>,
}

impl From<Blog> for BlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
            user: blog.user.map(BlogOwnerResponse::from),
        }
    }
}
