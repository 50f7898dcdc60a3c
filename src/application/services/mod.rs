//! Business logic services for the application layer.

pub mod auth_service;
pub mod blog_service;
pub mod user_service;

pub use auth_service::{AuthService, LoginSession};
pub use blog_service::BlogService;
pub use user_service::{UserService, UserWithBlogs};
