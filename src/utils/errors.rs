//! Error handling for the Sender client
//!
//! This module defines the main error type used throughout the client
//! and the mapping from failures to user-facing alert text.

use reqwest::StatusCode;
use thiserror::Error;

/// Generic alert shown when the backend cannot be reached
pub const CONNECTIVITY_MESSAGE: &str = "Unable to reach the server. Check your connection and try again.";

/// Main error type for the Sender client
#[derive(Error, Debug)]
pub enum SenderError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Backend rejected request ({status}): {detail}")]
    Backend { status: StatusCode, detail: String },

    #[error("Network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Malformed response: {0}")]
    Decode(#[source] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// Result type alias for Sender client operations
pub type Result<T> = std::result::Result<T, SenderError>;

impl From<reqwest::Error> for SenderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return SenderError::Decode(err);
        }
        SenderError::Network(err)
    }
}

impl From<config::ConfigError> for SenderError {
    fn from(err: config::ConfigError) -> Self {
        SenderError::Config(err.to_string())
    }
}

impl SenderError {
    /// Shortcut for client-side validation failures
    pub fn validation(message: impl Into<String>) -> Self {
        SenderError::Validation(message.into())
    }

    /// Text shown to the user when an operation fails
    pub fn user_message(&self) -> String {
        match self {
            SenderError::Validation(message) => message.clone(),
            SenderError::Backend { detail, .. } => detail.clone(),
            SenderError::Network(_) => CONNECTIVITY_MESSAGE.to_string(),
            SenderError::Decode(_) => "Malformed response from the server".to_string(),
            SenderError::Authentication(message) => message.clone(),
            SenderError::PermissionDenied(message) => message.clone(),
            other => other.to_string(),
        }
    }

    /// HTTP status of a backend rejection
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            SenderError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the backend rejected the bearer token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Check if the error is recoverable by the user trying again
    pub fn is_recoverable(&self) -> bool {
        match self {
            SenderError::Validation(_) => true,
            SenderError::Backend { status, .. } => !status.is_server_error(),
            SenderError::Network(_) => true,
            SenderError::Decode(_) => false,
            SenderError::Config(_) => false,
            SenderError::Authentication(_) => true,
            SenderError::PermissionDenied(_) => false,
            SenderError::InvalidStateTransition { .. } => false,
            SenderError::Serialization(_) => false,
            SenderError::Io(_) => true,
            SenderError::UrlParse(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            SenderError::Validation(_) => ErrorSeverity::Info,
            SenderError::Config(_) => ErrorSeverity::Critical,
            SenderError::UrlParse(_) => ErrorSeverity::Critical,
            SenderError::PermissionDenied(_) => ErrorSeverity::Warning,
            SenderError::Authentication(_) => ErrorSeverity::Warning,
            SenderError::Backend { status, .. } if status.is_client_error() => ErrorSeverity::Warning,
            _ => ErrorSeverity::Error,
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_detail_is_surfaced_verbatim() {
        let err = SenderError::Backend {
            status: StatusCode::BAD_REQUEST,
            detail: "User already exists".to_string(),
        };
        assert_eq!(err.user_message(), "User already exists");
        assert_eq!(err.severity(), ErrorSeverity::Warning);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_unauthorized_detection() {
        let err = SenderError::Backend {
            status: StatusCode::UNAUTHORIZED,
            detail: "Invalid token".to_string(),
        };
        assert!(err.is_unauthorized());
        assert!(!SenderError::validation("Name is required").is_unauthorized());
    }

    #[test]
    fn test_validation_message() {
        let err = SenderError::validation("Name is required");
        assert_eq!(err.user_message(), "Name is required");
        assert_eq!(err.severity(), ErrorSeverity::Info);
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = SenderError::Config("API base URL is required".to_string());
        assert!(!err.is_recoverable());
        assert_eq!(err.severity().to_string(), "CRITICAL");
    }
}
