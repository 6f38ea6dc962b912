//! Error types module
//!
//! All request failures are unified under [`AppError`]. Each variant self-describes how it
//! is presented over HTTP through the [`ErrorMetadata`] trait, so the API layer only has to
//! render what the error tells it.

use std::fmt::{Display, Formatter, Result as FmtResult};

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for requests about objects that do not exist
    Warn,
    /// Error level - for upstream and unexpected failures
    Error,
}

/// Which presigned URL was being produced when signing failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignedOperation {
    Upload,
    Download,
}

impl Display for SignedOperation {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            SignedOperation::Upload => write!(f, "upload"),
            SignedOperation::Download => write!(f, "download"),
        }
    }
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "SIGNING_FAILED")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried by the caller)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Object key the failure relates to, echoed back for diagnosability
    fn object_key(&self) -> Option<&str>;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Request body too large: {0}")]
    PayloadTooLarge(String),

    #[error("Failed to sign {operation} URL: {message}")]
    Signing {
        operation: SignedOperation,
        /// Set for download signing, where the key came from the caller.
        object_key: Option<String>,
        message: String,
    },

    #[error("Object lookup failed for {object_key}: {message}")]
    ObjectLookup { object_key: String, message: String },

    #[error("Object not found: {object_key}")]
    ObjectNotFound { object_key: String },

    #[error("Storage unavailable while looking up {object_key}: {message}")]
    StorageUnavailable { object_key: String, message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Static metadata for each variant: (http_status, error_code, recoverable, log_level).
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, LogLevel) {
    match err {
        AppError::InvalidInput(_) => (400, "INVALID_INPUT", false, LogLevel::Debug),
        AppError::PayloadTooLarge(_) => (413, "PAYLOAD_TOO_LARGE", false, LogLevel::Debug),
        AppError::Signing { .. } => (500, "SIGNING_FAILED", true, LogLevel::Error),
        AppError::ObjectLookup { .. } => (500, "OBJECT_LOOKUP_FAILED", true, LogLevel::Error),
        AppError::ObjectNotFound { .. } => (404, "NOT_FOUND", false, LogLevel::Warn),
        AppError::StorageUnavailable { .. } => (502, "STORAGE_UNAVAILABLE", true, LogLevel::Error),
        AppError::Internal(_) => (500, "INTERNAL_ERROR", true, LogLevel::Error),
    }
}

impl AppError {
    /// Get the error type name for logs
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::InvalidInput(_) => "InvalidInput",
            AppError::PayloadTooLarge(_) => "PayloadTooLarge",
            AppError::Signing { .. } => "Signing",
            AppError::ObjectLookup { .. } => "ObjectLookup",
            AppError::ObjectNotFound { .. } => "ObjectNotFound",
            AppError::StorageUnavailable { .. } => "StorageUnavailable",
            AppError::Internal(_) => "Internal",
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

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).3
    }

    fn client_message(&self) -> String {
        match self {
            AppError::InvalidInput(ref msg) => msg.clone(),
            AppError::PayloadTooLarge(_) => "Request body too large".to_string(),
            AppError::Signing { operation, .. } => {
                format!("Failed to generate {} URL", operation)
            }
            AppError::ObjectLookup { .. } => "Error retrieving file".to_string(),
            AppError::ObjectNotFound { .. } => "File not found".to_string(),
            AppError::StorageUnavailable { .. } => "Storage backend unavailable".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        }
    }

    fn object_key(&self) -> Option<&str> {
        match self {
            AppError::ObjectLookup { object_key, .. }
            | AppError::ObjectNotFound { object_key }
            | AppError::StorageUnavailable { object_key, .. } => Some(object_key),
            AppError::Signing { object_key, .. } => object_key.as_deref(),
            _ => None,
        }
    }
}
