//! Error types for the personal assistant.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Field-level validation errors live in [`crate::domain::ValidationError`].

use crate::domain::ValidationError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or saving the JSON data files.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading, writing or renaming a file failed
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but does not hold a valid document
    #[error("Malformed data in {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The in-memory collection could not be serialized
    #[error("Failed to serialize data for {path}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors produced by façade operations before they are folded into a result record.
#[derive(Error, Debug)]
pub enum OperationError {
    /// A field value failed validation
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The named contact, note, phone or tag does not exist
    #[error("{0} not found")]
    NotFound(String),

    /// Creating a record whose key is already taken
    #[error("{0} already exists")]
    Duplicate(String),

    /// The store has no identifiers left to hand out
    #[error("No {0} left to assign")]
    Exhausted(String),

    /// The mutation was applied in memory but could not be written to disk
    #[error("{0}")]
    Persistence(#[from] StorageError),
}

/// Errors raised by the function dispatcher before the façade is reached.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// The function name is not in the dispatch table
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// Arguments were not a JSON object
    #[error("Arguments for {function} must be a JSON object")]
    ArgumentsNotObject { function: String },

    /// A required parameter is absent or null
    #[error("Missing required parameter '{parameter}' for {function}")]
    MissingParameter { function: String, parameter: String },

    /// A parameter does not have the declared type or value
    #[error("Invalid parameter '{parameter}' for {function}: {reason}")]
    InvalidParameter {
        function: String,
        parameter: String,
        reason: String,
    },
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with StorageError
pub type StorageResult<T> = Result<T, StorageError>;

/// Convenience type alias for Results with OperationError
pub type OperationOutcome<T> = Result<T, OperationError>;

/// Convenience type alias for Results with DispatchError
pub type DispatchResult<T> = Result<T, DispatchError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = OperationError::NotFound("Contact 'Bob'".to_string());
        assert_eq!(err.to_string(), "Contact 'Bob' not found");

        let err = OperationError::Duplicate("Contact 'Bob'".to_string());
        assert_eq!(err.to_string(), "Contact 'Bob' already exists");

        let err = OperationError::Exhausted("note ids".to_string());
        assert_eq!(err.to_string(), "No note ids left to assign");

        let err = DispatchError::UnknownFunction("launch_rocket".to_string());
        assert_eq!(err.to_string(), "Unknown function: launch_rocket");

        let err = ConfigError::InvalidValue {
            var: "ASSISTANT_BIRTHDAY_WINDOW_DAYS".to_string(),
            reason: "Must be a positive number".to_string(),
        };
        assert!(err.to_string().contains("ASSISTANT_BIRTHDAY_WINDOW_DAYS"));
    }

    #[test]
    fn test_validation_error_passes_through() {
        let err: OperationError = ValidationError::EmptyName.into();
        assert_eq!(err.to_string(), "Name cannot be empty");
    }

    #[test]
    fn test_storage_error_mentions_path() {
        let err = StorageError::Io {
            path: PathBuf::from("/tmp/book.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/book.json"));
        assert!(text.contains("denied"));
    }
}
