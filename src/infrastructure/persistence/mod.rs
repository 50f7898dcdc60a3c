//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx.
//!
//! # Repositories
//!
//! - [`PgBlogRepository`] - Blog post storage and retrieval
//! - [`PgUserRepository`] - User accounts
//! - [`PgTokenRepository`] - Session token storage and validation

pub mod pg_blog_repository;
pub mod pg_token_repository;
pub mod pg_user_repository;

pub use pg_blog_repository::PgBlogRepository;
pub use pg_token_repository::PgTokenRepository;
pub use pg_user_repository::PgUserRepository;
