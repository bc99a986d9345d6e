//! # Validation Module
//!
//! Input validation utilities for Delicia POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Shell (delicia-cli)                                          │
//! │  └── Reads raw lines, trims them                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantity text → positive whole number                             │
//! │  ├── Product fields (catalog construction)                             │
//! │  └── Percentages (configuration)                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart / Catalog invariants                                    │
//! │  └── unique ids, quantities > 0                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use delicia_core::validation::{parse_quantity, validate_quantity};
//!
//! assert_eq!(parse_quantity(" 3 ").unwrap(), 3);
//! assert!(parse_quantity("abc").is_err());
//! assert!(validate_quantity(0).is_err());
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::types::Rate;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for a rate: 100%.
pub const MAX_RATE_BPS: u32 = 10_000;

/// Most units of one product a cart line may hold.
pub const MAX_QUANTITY: i64 = 1_000_000;

/// Most expensive price a catalog product may carry: S/1,000,000.00.
pub const MAX_PRICE_CENTS: i64 = 100_000_000;

// =============================================================================
// Quantity
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_QUANTITY`]
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if !(1..=MAX_QUANTITY).contains(&qty) {
        return Err(CoreError::invalid_quantity(qty));
    }

    Ok(())
}

/// Parses the quantity the cashier typed.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Register sale                                                          │
/// │                                                                         │
/// │  Quantity: "2"                                                         │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  parse_quantity("2") ← THIS FUNCTION                                   │
/// │       │                                                                 │
/// │       ├── not a number ("abc", "inf", "NaN", "")? → InvalidQuantity    │
/// │       │                                                                 │
/// │       ├── has a fraction ("2.5")? → InvalidQuantity                    │
/// │       │                                                                 │
/// │       ├── qty <= 0 or > MAX_QUANTITY? → InvalidQuantity                │
/// │       │                                                                 │
/// │       └── OK → Proceed with add_to_cart                                │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// `"2.0"` is accepted as 2.
pub fn parse_quantity(raw: &str) -> CoreResult<i64> {
    let trimmed = raw.trim();

    let qty = Decimal::from_str(trimmed)
        .ok()
        .filter(|d| d.fract().is_zero())
        .and_then(|d| d.to_i64())
        .ok_or_else(|| CoreError::invalid_quantity(trimmed))?;

    if !(1..=MAX_QUANTITY).contains(&qty) {
        return Err(CoreError::invalid_quantity(trimmed));
    }

    Ok(qty)
}

// =============================================================================
// Product Fields
// =============================================================================

/// Validates a product id.
///
/// ## Rules
/// - Must be positive (> 0)
pub fn validate_product_id(id: u32) -> ValidationResult<()> {
    if id == 0 {
        return Err(ValidationError::MustBePositive {
            field: "id".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must not be all digits, otherwise it could never be looked up by name
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "name".to_string(),
            reason: "must not be a number".to_string(),
        });
    }

    Ok(())
}

/// Validates a product category.
pub fn validate_category(category: &str) -> ValidationResult<()> {
    if category.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "category".to_string(),
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
/// - Must not exceed [`MAX_PRICE_CENTS`]
///
/// ## Example
/// ```rust
/// use delicia_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(250).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if !(0..=MAX_PRICE_CENTS).contains(&cents) {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }

    Ok(())
}

// =============================================================================
// Rates
// =============================================================================

/// Validates a rate in basis points.
///
/// ## Rules
/// - Must be between 0 and 10000 (0% to 100%)
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::from(MAX_RATE_BPS),
        });
    }

    Ok(())
}

/// Parses a percentage such as `"18"` or `"8.25"` into a [`Rate`].
///
/// ## Rules
/// - Must be a decimal number
/// - At most two decimal places (basis-point precision)
/// - Between 0 and 100
///
/// ## Example
/// ```rust
/// use delicia_core::validation::parse_percentage;
///
/// assert_eq!(parse_percentage("tax_rate", "18").unwrap().bps(), 1800);
/// assert_eq!(parse_percentage("tax_rate", "8.25").unwrap().bps(), 825);
/// assert!(parse_percentage("tax_rate", "101").is_err());
/// ```
pub fn parse_percentage(field: &str, raw: &str) -> ValidationResult<Rate> {
    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: reason.to_string(),
    };

    let out_of_range = || ValidationError::OutOfRange {
        field: field.to_string(),
        min: 0,
        max: 100,
    };

    let pct = Decimal::from_str(raw.trim()).map_err(|_| invalid("must be a number"))?;
    let bps = pct
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(out_of_range)?;

    if !bps.fract().is_zero() {
        return Err(invalid("at most two decimal places"));
    }

    if bps.is_sign_negative() && !bps.is_zero() {
        return Err(out_of_range());
    }

    let bps = bps.to_u32().ok_or_else(out_of_range)?;
    validate_rate_bps(field, bps).map_err(|_| out_of_range())?;

    Ok(Rate::from_bps(bps))
}

// =============================================================================
// Unit Tests
// =============================================================================
