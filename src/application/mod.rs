//! Application layer services implementing business logic.
//!
//! This layer orchestrates domain operations by coordinating repository calls,
//! validation, and business rules. Services consume repository traits and provide
//! a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::blog_service::BlogService`] - Blog CRUD and list analytics
//! - [`services::user_service::UserService`] - User registration and listing
//! - [`services::auth_service::AuthService`] - Login and bearer token authentication

pub mod services;
