//! Database library providing the MongoDB connector and store health probes
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB support
//! - `config` - Configuration support with `core_config::FromEnv`
//! - `all` - All features
//!
//! # Examples
//!
//! ```ignore
//! use database::mongodb;
//!
//! let config = mongodb::MongoConfig::with_database("mongodb://localhost:27017", "listmanager");
//! let client = mongodb::connect_from_config(&config).await?;
//! let db = client.database(config.database());
//! ```
//!
//! Health checks go through the [`StorePing`] trait so handlers do not depend on the driver:
//!
//! ```ignore
//! use database::{StorePing, ping_with_timeout};
//! use std::time::Duration;
//!
//! let probe = database::mongodb::MongoPing::new(client);
//! ping_with_timeout(&probe, Duration::from_secs(10)).await?;
//! ```

// Always available modules
pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

// Re-exports for convenience
pub use common::{DatabaseError, DatabaseResult, StorePing, ping_with_timeout};
