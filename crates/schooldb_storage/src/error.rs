//! Error types for relational store operations.

use std::io;
use thiserror::Error;

/// Result type for relational store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while talking to the relational store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The SQLite engine reported an error.
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// An I/O error occurred (e.g. creating the database directory).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A primary-key, foreign-key or NOT NULL constraint rejected the write.
    #[error("constraint violation: {message}")]
    Constraint {
        /// Description reported by the engine.
        message: String,
    },

    /// The store has been closed.
    #[error("store is closed")]
    Closed,
}

impl StoreError {
    /// Creates a constraint violation error.
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Maps a raw SQLite error, pulling constraint failures out into
    /// [`StoreError::Constraint`].
    pub(crate) fn from_sqlite(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(code, message)
                if code.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                Self::constraint(message.clone().unwrap_or_else(|| code.to_string()))
            }
            _ => Self::Sqlite(err),
        }
    }

    /// Returns true if this is a constraint violation.
    #[must_use]
    pub fn is_constraint(&self) -> bool {
        matches!(self, Self::Constraint { .. })
    }
}
