//! Utility functions shared across layers.
//!
//! - [`id`] - Path identifier parsing
//! - [`password`] - bcrypt hashing on the blocking pool
//! - [`token_generator`] - Random bearer token generation

pub mod id;
pub mod password;
pub mod token_generator;
