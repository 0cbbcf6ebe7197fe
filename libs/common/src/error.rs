//! Error types shared by the services
//!
//! Storage failures are wrapped here so that services can map them onto their
//! own response types without depending on `sqlx` error details.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Error raised by the shared database layer
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// The pool could not open a connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// A statement failed while executing
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Schema bootstrap failed
    #[error("Database schema error: {0}")]
    Schema(#[source] SqlxError),

    /// The configured connection string is unusable
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

/// Result alias for database operations
pub type DatabaseResult<T> = Result<T, DatabaseError>;
