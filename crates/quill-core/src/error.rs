//! # Error Types
//!
//! Domain-specific error types for quill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quill-core errors (this file)                                         │
//! │  ├── CoreError        - Stock, quantity and lookup failures            │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quill-cli errors (app crate)                                          │
//! │  └── AppError         - What the menu loop reports                     │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → "Error: ..." on screen │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (title, quantity, id)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// None of these are fatal. The menu loop reports them and moves on to the
/// next command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A cart quantity was zero or negative.
    #[error("Quantity must be greater than zero.")]
    InvalidQuantity { requested: i64 },

    /// More copies were requested than the catalog records as on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Add to Cart (qty: 12)
    ///      │
    ///      ▼
    /// Check stock: available=10
    ///      │
    ///      ▼
    /// InsufficientStock { title: "Python Programming", available: 10, requested: 12 }
    ///      │
    ///      ▼
    /// Menu shows: "Insufficient stock. Only 10 Python Programming(s) available."
    /// ```
    #[error("Insufficient stock. Only {available} {title}(s) available.")]
    InsufficientStock {
        title: String,
        available: i64,
        requested: i64,
    },

    /// No catalog entry carries this exact title.
    #[error("Book not found in inventory: {0}")]
    BookNotFound(String),

    /// Text was supplied where a number was expected.
    #[error("{field} must be a number, got '{input}'")]
    MalformedInput { field: String, input: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before business logic runs.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be zero or more.
    #[error("{field} must be a non-negative number")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g. a price with three decimals).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
