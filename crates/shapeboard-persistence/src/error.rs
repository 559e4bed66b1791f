//! Error types for the persistence crate.

use std::io;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The storage directory could not be resolved or created.
    #[error("Storage directory error: {0}")]
    StorageDirectory(String),
}

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PersistenceError::StorageDirectory("no config dir".to_string());
        assert_eq!(err.to_string(), "Storage directory error: no config dir");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: PersistenceError = io_err.into();
        assert!(matches!(err, PersistenceError::Io(_)));
    }
}
