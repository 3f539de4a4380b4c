//! Error types for the data management layer.

use schooldb_storage::StoreError;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for data management operations.
pub type DataResult<T> = Result<T, DataError>;

/// The three kinds of entity the data layer manages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A student.
    Student,
    /// An instructor.
    Instructor,
    /// A course.
    Course,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "Student",
            Self::Instructor => "Instructor",
            Self::Course => "Course",
        })
    }
}

/// Coarse error category, for callers that branch on the kind of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A field failed validation.
    Validation,
    /// Add with a duplicate ID.
    AlreadyExists,
    /// Reference to a nonexistent ID.
    NotFound,
    /// Removal refused because other records still depend on the entity.
    InUse,
    /// Underlying relational failure.
    Store,
    /// Malformed or missing import input.
    Format,
    /// File system failure while exporting.
    Io,
}

/// Errors reported by the data management layer.
///
/// Every message is written to be shown to an end user as-is.
#[derive(Debug, Error)]
pub enum DataError {
    /// A field failed a validator check.
    #[error("{message}")]
    Validation {
        /// Which check failed, e.g. "Invalid Course ID.".
        message: String,
    },

    /// An entity with the same ID already exists.
    #[error("{kind} with ID '{id}' already exists.")]
    AlreadyExists {
        /// Entity kind.
        kind: EntityKind,
        /// The duplicate ID.
        id: String,
    },

    /// No entity with the given ID exists.
    #[error("{kind} with ID '{id}' not found.")]
    NotFound {
        /// Entity kind.
        kind: EntityKind,
        /// The missing ID.
        id: String,
    },

    /// The entity is still referenced and cannot be removed.
    #[error("{kind} with ID '{id}' is still assigned to {dependents} course(s).")]
    InUse {
        /// Entity kind.
        kind: EntityKind,
        /// The referenced ID.
        id: String,
        /// Number of records still pointing at it.
        dependents: usize,
    },

    /// The relational store failed.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Import input is missing or malformed.
    #[error("format error: {message}")]
    Format {
        /// Description of the problem.
        message: String,
    },

    /// Reading or writing an export file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The file or directory involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },
}

impl DataError {
    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Creates an already-exists error.
    pub fn already_exists(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            id: id.into(),
        }
    }

    /// Creates a not-found error.
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    /// Creates an in-use error.
    pub fn in_use(kind: EntityKind, id: impl Into<String>, dependents: usize) -> Self {
        Self::InUse {
            kind,
            id: id.into(),
            dependents,
        }
    }

    /// Creates a format error.
    pub fn format(message: impl Into<String>) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Creates an I/O error tied to a path.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns the category of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation { .. } => ErrorKind::Validation,
            Self::AlreadyExists { .. } => ErrorKind::AlreadyExists,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::InUse { .. } => ErrorKind::InUse,
            Self::Store(_) => ErrorKind::Store,
            Self::Format { .. } => ErrorKind::Format,
            Self::Io { .. } => ErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_user_facing() {
        assert_eq!(
            DataError::not_found(EntityKind::Course, "EECE230").to_string(),
            "Course with ID 'EECE230' not found."
        );
        assert_eq!(
            DataError::already_exists(EntityKind::Student, "202401111").to_string(),
            "Student with ID '202401111' already exists."
        );
        assert_eq!(
            DataError::validation("Invalid Age.").to_string(),
            "Invalid Age."
        );
    }

    #[test]
    fn store_errors_are_wrapped() {
        let err: DataError = StoreError::Closed.into();
        assert_eq!(err.kind(), ErrorKind::Store);
        assert_eq!(err.to_string(), "storage error: store is closed");
    }

    #[test]
    fn kinds() {
        assert_eq!(
            DataError::in_use(EntityKind::Instructor, "199801234", 2).kind(),
            ErrorKind::InUse
        );
        assert_eq!(DataError::format("bad").kind(), ErrorKind::Format);
    }
}
