//! Error types for websheet
//!
//! This module provides the error hierarchy using `thiserror`. Extraction has
//! no error type of its own: missing content degrades to empty values or
//! placeholders instead of failing.

use thiserror::Error;

/// The main error type for websheet operations
#[derive(Error, Debug)]
pub enum Error {
    /// Fetching the source document failed
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Serializing the workbook failed
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Storing or retrieving an export failed
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Errors raised while fetching a page
///
/// The service treats every variant as opaque and non-retryable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The URL could not be parsed even after scheme normalization
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Connection, TLS or body decoding failure
    #[error("Network error: {0}")]
    Network(String),

    /// Request timed out
    #[error("Request timed out after {0}s")]
    Timeout(u64),

    /// Non-success HTTP status
    #[error("HTTP error {status}: {message}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Error message
        message: String,
    },
}

/// Errors raised while serializing a workbook
#[derive(Error, Debug)]
pub enum BuildError {
    /// The xlsx writer rejected the layout or failed to serialize
    #[error("Workbook serialization failed: {0}")]
    Xlsx(String),
}

impl From<rust_xlsxwriter::XlsxError> for BuildError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        BuildError::Xlsx(err.to_string())
    }
}

/// Errors raised by the export store
#[derive(Error, Debug)]
pub enum StorageError {
    /// Name is empty or would escape the storage root
    #[error("Invalid export name: {0:?}")]
    InvalidName(String),

    /// No export with that name exists
    #[error("Export not found: {0}")]
    NotFound(String),

    /// Underlying filesystem failure
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for websheet operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Fetch(FetchError::Network("connection refused".to_string()));
        assert!(err.to_string().contains("Network error"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_http_status_error() {
        let err = FetchError::HttpStatus {
            status: 404,
            message: "Not Found".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP error 404: Not Found");
    }

    #[test]
    fn test_storage_error() {
        let err = StorageError::InvalidName("../etc/passwd".to_string());
        assert!(err.to_string().contains("\"../etc/passwd\""));

        let err: Error = StorageError::NotFound("missing.xlsx".to_string()).into();
        assert_eq!(err.to_string(), "Storage error: Export not found: missing.xlsx");
    }

    #[test]
    fn test_build_error() {
        let err: Error = BuildError::Xlsx("row limit".to_string()).into();
        assert!(matches!(err, Error::Build(_)));
        assert!(err.to_string().contains("row limit"));
    }
}
