//! DTOs for user endpoints.

use serde::{Deserialize, Serialize};

use crate::application::services::UserWithBlogs;
use crate::domain::entities::{Blog, User};

/// Request body for `POST /api/users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub password: String,
}

/// Blog summary embedded in a user listing. Omits the owner to avoid repetition.
#[derive(Debug, Serialize)]
pub struct UserBlogResponse {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub url: String,
    pub likes: i64,
}

impl From<Blog> for UserBlogResponse {
    fn from(blog: Blog) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            author: blog.author,
            url: blog.url,
            likes: blog.likes,
        }
    }
}

/// JSON representation of a user. Never includes the password hash.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub name: Option<String>,
    pub blogs: Vec<UserBlogResponse>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            blogs: Vec::new(),
        }
    }
}

impl From<UserWithBlogs> for UserResponse {
    fn from(entry: UserWithBlogs) -> Self {
        Self {
            blogs: entry.blogs.into_iter().map(UserBlogResponse::from).collect(),
            ..UserResponse::from(entry.user)
        }
    }
}
