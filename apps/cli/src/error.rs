//! # App Error Type
//!
//! Unified error type for menu commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Menu Loop                          │
//! │                                                                         │
//! │  Command Function                                                       │
//! │  Result<Flow, AppError>                                                 │
//! │         │                                                               │
//! │         ├── CoreError (stock, quantity, lookup) ──► "Error: ..."       │
//! │         │                                           loop continues      │
//! │         │                                                               │
//! │         ├── EndOfInput (stdin closed) ─────────────► session ends      │
//! │         │                                                               │
//! │         └── Io (stdout/stdin failed) ──────────────► session aborts    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing a user types can end the process except choice 12 or closing
//! the input. Startup failures (config, seed) never reach this type; they
//! are reported by `run` through `anyhow`.

use serde::Serialize;
use std::fmt;
use std::io;

use quill_core::{CoreError, ValidationError};

/// Error returned from menu commands.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code, used as a logging field
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Title lookup found nothing
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Zero or negative cart quantity
    InvalidQuantity,

    /// Requested more than recorded stock
    InsufficientStock,

    /// Text where a number was expected
    MalformedInput,

    /// Reading input or writing output failed
    Io,

    /// Input stream closed while a prompt was waiting
    EndOfInput,
}

impl AppError {
    /// Creates a new app error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// The input stream has no more lines.
    pub fn end_of_input() -> Self {
        AppError::new(ErrorCode::EndOfInput, "input closed")
    }

    /// Whether the session should stop instead of reporting and continuing.
    pub fn is_fatal(&self) -> bool {
        matches!(self.code, ErrorCode::Io | ErrorCode::EndOfInput)
    }
}

/// Converts core errors to app errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::InvalidQuantity { .. } => ErrorCode::InvalidQuantity,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::BookNotFound(_) => ErrorCode::NotFound,
            CoreError::MalformedInput { .. } => ErrorCode::MalformedInput,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::from(CoreError::from(err))
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::new(ErrorCode::Io, err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}

/// Convenience type alias for command results.
pub type AppResult<T> = Result<T, AppError>;
