//! MongoDB database connector and utilities
//!
//! Provides connection management and MongoDB-specific helpers.

mod config;
mod connector;
mod health;

pub use config::{DEFAULT_DATABASE, DEFAULT_URL, MongoConfig};
pub use connector::connect_from_config;
pub use health::MongoPing;

// Re-export MongoDB types for convenience
pub use mongodb::{Client, Collection, Database};
