use std::time::Duration;

/// Unified database error type for all store operations
#[derive(Debug, thiserror::Error)]
pub enum DatabaseError {
    /// MongoDB driver errors
    #[cfg(feature = "mongodb")]
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    /// Initial connection could not be verified
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// The store answered the health ping with an error
    #[error("Health check failed: {0}")]
    HealthCheckFailed(String),

    /// The store did not answer within the allotted time
    #[error("Timed out after {0:?}")]
    Timeout(Duration),
}

/// Result type alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
