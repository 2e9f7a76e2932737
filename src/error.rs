//! Error types for the profile directory service
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - HTTP status classification for the API boundary
//! - User-friendly hints and CLI exit codes
//!
//! Request-level variants render exactly the message existing clients match
//! on, so their `Display` output must not be decorated.

use std::fmt;
use std::path::PathBuf;

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for service operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Request errors (4xx)
    Validation = 400,
    InvalidId = 401,
    NotFound = 404,
    DuplicateKey = 409,

    // Internal errors (9xx)
    InternalError = 900,
    StoreClosed = 901,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10,
            200..=299 => 20,
            400..=499 => 40,
            900..=999 => 90,
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type for the service
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    // ─────────────────────────────────────────────────────────────
    // Request Errors
    // ─────────────────────────────────────────────────────────────

    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Identifier is absent, a placeholder, or not a well-formed id
    #[error("Invalid ID format")]
    InvalidId { raw: String },

    /// No record with the given id
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    /// Store-level uniqueness conflict
    #[error("Duplicate entry")]
    DuplicateKey { id: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// The store handle was used after `close()`
    #[error("store is closed")]
    StoreClosed,

    /// Anything unanticipated; the message is surfaced verbatim
    #[error("{0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::ConfigParseError,

            Error::Validation(_) => ErrorCode::Validation,
            Error::InvalidId { .. } => ErrorCode::InvalidId,
            Error::NotFound { .. } => ErrorCode::NotFound,
            Error::DuplicateKey { .. } => ErrorCode::DuplicateKey,

            Error::StoreClosed => ErrorCode::StoreClosed,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// HTTP status used when this error crosses the API boundary
    pub fn status_code(&self) -> StatusCode {
        match self.code() {
            ErrorCode::Validation | ErrorCode::InvalidId => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::DuplicateKey => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the caller is at fault (4xx) rather than the service
    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'profile-directory config init' to create a default configuration file.",
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'profile-directory config validate' to see details.",
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values.",
            ),
            Error::IoWrite { .. } => Some("Check that the directory exists and is writable."),
            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let mut output = format!("\x1b[31mError [{}]\x1b[0m: {}\n", self.code().as_str(), self);

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors (for ergonomic error creation)
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a validation error with a client-facing message
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create an invalid id error
    pub fn invalid_id(raw: impl Into<String>) -> Self {
        Error::InvalidId { raw: raw.into() }
    }

    /// Create a not found error for an entity kind ("Profile", "User", ...)
    pub fn not_found(entity: &'static str) -> Self {
        Error::NotFound { entity }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>, source: Option<toml::de::Error>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::NotFound.as_str(), "E404");
        assert_eq!(ErrorCode::InternalError.as_str(), "E900");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoRead.exit_code(), 20);
        assert_eq!(ErrorCode::Validation.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_request_messages_are_verbatim() {
        assert_eq!(Error::validation("Name is required").to_string(), "Name is required");
        assert_eq!(Error::not_found("Profile").to_string(), "Profile not found");
        assert_eq!(Error::invalid_id("undefined").to_string(), "Invalid ID format");
        assert_eq!(
            Error::DuplicateKey { id: "x".into() }.to_string(),
            "Duplicate entry"
        );
        assert_eq!(Error::Internal("socket closed".into()).to_string(), "socket closed");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::invalid_id("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(Error::not_found("User").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            Error::DuplicateKey { id: "x".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(Error::StoreClosed.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            Error::Config("bad".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(Error::not_found("Comment").is_client_error());
        assert!(!Error::Internal("boom".into()).is_client_error());
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::ConfigNotFound { path: PathBuf::from("/test") };
        assert!(err.suggestion().unwrap_or_default().contains("config init"));
        assert!(Error::validation("x").suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::ConfigNotFound { path: PathBuf::from("/test/config.toml") };
        let formatted = err.format_for_terminal();
        assert!(formatted.contains("E100"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let formatted = Error::not_found("Comment").format_for_log();
        assert_eq!(formatted, "[E404] Comment not found");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
