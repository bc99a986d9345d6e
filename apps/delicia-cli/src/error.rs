//! # CLI Error Type
//!
//! Unified error type for shell commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Shell                              │
//! │                                                                         │
//! │  Menu option "1"                                                        │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, CliError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Domain Error? ─── CoreError::NotFound ──────► CliError ────────►│  │
//! │  │         │                                      printed, loop     │  │
//! │  │         │                                      continues         │  │
//! │  │         ▼                                                        │  │
//! │  │  Terminal Error? ─── io::Error ──────────────► CliError ────────►│  │
//! │  │                                                session ends      │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::io;

use delicia_core::CoreError;
use serde::Serialize;

/// Error returned from shell commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found in catalog: yogurt"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct CliError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product missing from the catalog or the cart
    NotFound,

    /// Quantity text or value rejected
    InvalidQuantity,

    /// Receipt requested for an empty cart
    EmptyCart,

    /// Any other rejected input
    ValidationError,

    /// Reading from or writing to the terminal failed
    IoError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::InvalidQuantity => "INVALID_QUANTITY",
            ErrorCode::EmptyCart => "EMPTY_CART",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::IoError => "IO_ERROR",
        }
    }
}

impl CliError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        CliError {
            code,
            message: message.into(),
        }
    }

    /// Whether the session can go on after this error.
    ///
    /// Only terminal I/O failures end the session.
    pub fn is_recoverable(&self) -> bool {
        self.code != ErrorCode::IoError
    }
}

/// Converts core errors to CLI errors.
impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::NotFound { .. } => ErrorCode::NotFound,
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::EmptyCart => ErrorCode::EmptyCart,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        CliError::new(code, err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        tracing::error!("Terminal I/O failed: {}", err);
        CliError::new(ErrorCode::IoError, format!("Terminal I/O failed: {}", err))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("Receipt serialization failed: {}", err);
        CliError::new(ErrorCode::ValidationError, "Could not render receipt as JSON")
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for CliError {}

pub type CliResult<T> = Result<T, CliError>;
