//! Application-level errors (wraps collaborator errors)

use thiserror::Error;

use crate::infrastructure::traits::StoreError;

/// Application errors add use-case context on top of collaborator errors.
///
/// Store and resolver failures pass through unchanged; there is no retry
/// or fallback at this layer.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("config error: {message}")]
    Config { message: String },
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
