//! Error types for metadesc library.
//!
//! Description derivation itself never fails; these errors come from the
//! surfaces around it (reading pages, loading configuration, wiring
//! directives into a host).

use std::io;
use thiserror::Error;

/// Result type alias for metadesc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur around description derivation.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading pages or configuration files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Configuration or result (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A directive with the same name is already registered.
    #[error("Directive already registered: {0}")]
    DirectiveExists(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DirectiveExists("description".to_string());
        assert_eq!(err.to_string(), "Directive already registered: description");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::Json(_)));
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
