//! Core domain entities representing the business data model.
//!
//! Entities are plain data structures without persistence or HTTP concerns.
//!
//! # Entity Types
//!
//! - [`Blog`] - A blog post with its owner
//! - [`User`] - A registered account
//!
//! # Design Pattern
//!
//! Entities come with separate structs for writes:
//! - `NewBlog`, `NewUser` - For creating new records
//! - `BlogUpdate` - For replacing an existing post

pub mod blog;
pub mod user;

pub use blog::{Blog, BlogOwner, BlogUpdate, NewBlog};
pub use user::{NewUser, User};
