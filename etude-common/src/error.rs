//! Common error types for etude

use thiserror::Error;

/// Common result type for etude operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the stores and the API layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error); also covers
    /// transaction begin/commit/rollback failures
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Referenced entity absent
    #[error("Not found: {0}")]
    NotFound(String),

    /// Operation would violate a uniqueness constraint (duplicate favorite)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Malformed input: non-positive id, wrong-shaped pitch list, unknown genre
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A required singleton row is missing
    #[error("Not initialized: {0}")]
    NotInitialized(String),

    /// External service failure or non-success response
    #[error("Upstream service error: {0}")]
    Upstream(String),
}
