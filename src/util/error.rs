//! Error types for scene export.

use thiserror::Error;

/// Main error type for export operations.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration the exporter declares but does not implement
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Export was called without any renderer to take camera state from
    #[error("No renderers to export")]
    NoRenderers,

    /// Data does not have the shape the caller claims
    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip container could not be written or read
    #[error("Archive error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// Base64 payload could not be decoded
    #[error("Invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create an unsupported-feature error.
    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }

    /// Create an invalid structure error.
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidStructure(msg.into())
    }
}

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let e = Error::unsupported("array compression");
        assert!(e.to_string().contains("array compression"));

        let e = Error::NoRenderers;
        assert!(e.to_string().contains("renderers"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
