//! Completion error types.

use thiserror::Error;

use crate::QueryError;

/// Errors that can occur while serving completions.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A tag file failed to load during a refresh.
    #[error("Cache error: {0}")]
    Cache(#[from] tagcomplete_cache::CacheError),

    /// The keyword pattern is invalid.
    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CompletionError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}
