//! Common utilities shared across store implementations

pub mod error;
pub mod health;

pub use error::{DatabaseError, DatabaseResult};
pub use health::{StorePing, ping_with_timeout};
