//! Error types module
//!
//! All errors that cross the service boundary are unified under `AppError`. Lower
//! layers (storage) keep their own error enums and convert into `AppError` at the
//! edge; anything without a more specific kind becomes `IoFailure` or `Internal`.

use std::io;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
/// This trait allows errors to self-describe their HTTP response characteristics
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_FORMAT")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Suggested action for the client
    fn suggested_action(&self) -> Option<&'static str>;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Unsupported tag: {0}")]
    UnsupportedTag(String),

    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Resource unavailable: {0}")]
    ResourceUnavailable(String),

    #[error("Range not satisfiable for resource of {content_length} bytes")]
    RangeNotSatisfiable { content_length: u64 },

    #[error("File too large: {0}")]
    PayloadTooLarge(String),

    #[error("IO failure: {0}")]
    IoFailure(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Internal error with source")]
    InternalWithSource {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalWithSource {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::IoFailure(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidInput(format!("JSON parsing error: {}", err))
    }
}

/// Static metadata for each variant: (http_status, error_code, recoverable, suggested_action, sensitive, log_level).
fn app_error_static_metadata(
    err: &AppError,
) -> (
    u16,
    &'static str,
    bool,
    Option<&'static str>,
    bool,
    LogLevel,
) {
    match err {
        AppError::UnsupportedFormat(_) => (
            415,
            "UNSUPPORTED_FORMAT",
            false,
            Some("Upload a file with a supported content type"),
            false,
            LogLevel::Debug,
        ),
        AppError::UnsupportedTag(_) => (
            400,
            "UNSUPPORTED_TAG",
            false,
            Some("Use one of videoFile, trailerFile or thumbnailFile"),
            false,
            LogLevel::Debug,
        ),
        AppError::InvalidFileName(_) => (
            400,
            "INVALID_FILE_NAME",
            false,
            Some("Pass the bare stored file name"),
            false,
            LogLevel::Warn,
        ),
        AppError::InvalidInput(_) => (
            400,
            "INVALID_INPUT",
            false,
            Some("Check request parameters and try again"),
            false,
            LogLevel::Debug,
        ),
        AppError::NotFound(_) => (
            404,
            "NOT_FOUND",
            false,
            Some("Verify the file name exists"),
            false,
            LogLevel::Debug,
        ),
        AppError::ResourceUnavailable(_) => (
            500,
            "RESOURCE_UNAVAILABLE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::RangeNotSatisfiable { .. } => (
            416,
            "RANGE_NOT_SATISFIABLE",
            false,
            Some("Request a range that starts before the end of the file"),
            false,
            LogLevel::Debug,
        ),
        AppError::PayloadTooLarge(_) => (
            413,
            "PAYLOAD_TOO_LARGE",
            false,
            Some("Reduce file size"),
            false,
            LogLevel::Debug,
        ),
        AppError::IoFailure(_) => (
            500,
            "IO_FAILURE",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
        AppError::Internal(_) | AppError::InternalWithSource { .. } => (
            500,
            "INTERNAL_ERROR",
            true,
            Some("Retry after a short delay"),
            true,
            LogLevel::Error,
        ),
    }
}

impl AppError {
    /// Get the error type name for detailed error responses
    pub fn error_type(&self) -> &str {
        match self {
            AppError::UnsupportedFormat(_) => "UnsupportedFormat",
            AppError::UnsupportedTag(_) => "UnsupportedTag",
            AppError::InvalidFileName(_) => "InvalidFileName",
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::NotFound(_) => "NotFound",
            AppError::ResourceUnavailable(_) => "ResourceUnavailable",
            AppError::RangeNotSatisfiable { .. } => "RangeNotSatisfiable",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::IoFailure(_) => "IOFailure",
            AppError::Internal(_) | AppError::InternalWithSource { .. } => "Internal",
        }
    }

    /// Get detailed error information including error chain
    pub fn detailed_message(&self) -> String {
        use std::error::Error;

        let mut details = self.to_string();

        let mut source = self.source();
        let mut depth = 0;
        while let Some(err) = source {
            depth += 1;
            if depth > 5 {
                details.push_str("\n  ... (truncated)");
                break;
            }
            details.push_str(&format!("\n  Caused by: {}", err));
            source = err.source();
        }

        details
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn suggested_action(&self) -> Option<&'static str> {
        app_error_static_metadata(self).3
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).4
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).5
    }

    fn client_message(&self) -> String {
        match self {
            AppError::UnsupportedFormat(ref msg) => msg.clone(),
            AppError::UnsupportedTag(ref msg) => format!("Unsupported tag: {}", msg),
            AppError::InvalidFileName(ref msg) => msg.clone(),
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::NotFound(ref msg) => msg.clone(),
            AppError::ResourceUnavailable(_) => "Stored file is unavailable".to_string(),
            AppError::RangeNotSatisfiable { content_length } => {
                format!("Requested range not satisfiable (length {})", content_length)
            }
            AppError::PayloadTooLarge(ref msg) => msg.clone(),
            AppError::IoFailure(_) => "Failed to access storage".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
            AppError::InternalWithSource { .. } => "Internal server error".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_metadata_unsupported_format() {
        let err = AppError::UnsupportedFormat("Unsupported video format: video/ogg".to_string());
        assert_eq!(err.http_status_code(), 415);
        assert_eq!(err.error_code(), "UNSUPPORTED_FORMAT");
        assert!(!err.is_recoverable());
        assert_eq!(err.client_message(), "Unsupported video format: video/ogg");
        assert!(!err.is_sensitive());
        assert_eq!(err.log_level(), LogLevel::Debug);
    }

    #[test]
    fn test_error_metadata_not_found_vs_io_failure() {
        let missing = AppError::NotFound("abc.mp4".to_string());
        assert_eq!(missing.http_status_code(), 404);
        assert!(!missing.is_sensitive());

        let io = AppError::from(io::Error::new(io::ErrorKind::PermissionDenied, "denied"));
        assert_eq!(io.http_status_code(), 500);
        assert_eq!(io.error_code(), "IO_FAILURE");
        assert_eq!(io.error_type(), "IOFailure");
        assert!(io.is_sensitive());
        assert_eq!(io.client_message(), "Failed to access storage");
    }

    #[test]
    fn test_error_metadata_range_not_satisfiable() {
        let err = AppError::RangeNotSatisfiable {
            content_length: 42,
        };
        assert_eq!(err.http_status_code(), 416);
        assert!(err.client_message().contains("42"));
    }

    #[test]
    fn test_detailed_message_includes_source_chain() {
        let err = AppError::from(anyhow::anyhow!("disk gone").context("copy failed"));
        let details = err.detailed_message();
        assert!(details.contains("Internal error with source"));
        assert!(details.contains("Caused by: copy failed"));
    }
}
