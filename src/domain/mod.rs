//! Domain layer containing business entities and logic.
//!
//! It defines entities, repository interfaces and the blog analytics core,
//! independent of infrastructure concerns.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`analytics`] - Pure aggregations over blog snapshots
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by infrastructure layer
//! - Business logic is encapsulated in services (see [`crate::application::services`])

pub mod analytics;
pub mod entities;
pub mod repositories;
