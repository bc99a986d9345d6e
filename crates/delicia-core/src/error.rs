//! # Error Types
//!
//! Domain-specific error types for delicia-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  delicia-core errors (this file)                                       │
//! │  ├── CoreError        - Lookup, cart and receipt failures              │
//! │  └── ValidationError  - Malformed catalog data or configuration values │
//! │                                                                         │
//! │  delicia-cli errors (separate crate)                                   │
//! │  └── CliError         - What the cashier sees (code + message)         │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → terminal               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant is recoverable: the shell prints it and shows the menu again.

use std::fmt;

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Where a lookup was resolved.
///
/// The same key can exist in the catalog but not in the cart, and the cashier
/// needs to know which one failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupScope {
    Catalog,
    Cart,
}

impl fmt::Display for LookupScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupScope::Catalog => write!(f, "catalog"),
            LookupScope::Cart => write!(f, "cart"),
        }
    }
}

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product matches the id or name.
    ///
    /// ## When This Occurs
    /// - Catalog lookup with an unknown id or name
    /// - Removing a product that is in the catalog but not in the cart
    #[error("Product not found in {scope}: {key}")]
    NotFound { key: String, scope: LookupScope },

    /// Quantity is not a whole number between 1 and `MAX_QUANTITY`.
    ///
    /// ## User Workflow
    /// ```text
    /// Register sale
    ///      │
    ///      ▼
    /// Quantity: "abc" / "0" / "-2" / "2.5"
    ///      │
    ///      ▼
    /// InvalidQuantity { input: "abc" }
    ///      │
    ///      ▼
    /// UI shows the message, cart is untouched
    /// ```
    #[error(
        "Invalid quantity '{input}': must be a whole number from 1 to {}",
        crate::validation::MAX_QUANTITY
    )]
    InvalidQuantity { input: String },

    /// A ticket was requested for an empty cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn not_found(key: impl fmt::Display, scope: LookupScope) -> Self {
        CoreError::NotFound {
            key: key.to_string(),
            scope,
        }
    }

    pub(crate) fn invalid_quantity(input: impl fmt::Display) -> Self {
        CoreError::InvalidQuantity {
            input: input.to_string(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised while building a catalog or parsing configuration values.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., two products sharing an id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
