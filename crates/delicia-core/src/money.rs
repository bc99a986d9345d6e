//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Discount and IGV produce fractions of a cent:                          │
//! │    S/12.34 × 5%  = S/0.617                                              │
//! │    S/11.723 × 18% = S/2.11014                                           │
//! │                                                                         │
//! │  OUR SOLUTION: Exact decimal, rounded only for display                  │
//! │    subtotal, discount, tax and total are all kept at full precision;   │
//! │    each is rounded to 2 places (half away from zero) when printed.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use delicia_core::money::Money;
//!
//! let price = Money::from_cents(250); // S/2.50
//! let line = price * 2;               // S/5.00
//! assert_eq!(line.to_string(), "S/5.00");
//! ```

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use rust_decimal::RoundingStrategy;
use serde::{Deserialize, Serialize, Serializer};

use crate::types::Rate;
use crate::CURRENCY_SYMBOL;

pub use rust_decimal::Decimal;

/// Number of decimal places shown to the customer.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in soles.
///
/// ## Design Decisions
/// - **Decimal (signed)**: exact base-10 arithmetic, no binary float drift
/// - **Single field tuple struct**: zero-cost abstraction over `Decimal`
/// - **Serde**: serializes the exact amount as a string; fields that are
///   shown to the customer use [`serialize_rounded`] instead
///
/// ## Where Money is Used
/// ```text
/// Product.price_cents ──► CartEntry.unit_price ──► CartEntry.line_total
///                                                        │
///                                                        ▼
///          subtotal ──► discount ──► IGV ──► total ──► "S/14.75"
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use delicia_core::money::Money;
    ///
    /// let price = Money::from_cents(750); // S/7.50
    /// assert_eq!(price.to_string(), "S/7.50");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_DECIMALS))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use delicia_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(520); // mantequilla
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_cents(1560));
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Applies a percentage rate and returns the exact (unrounded) portion.
    ///
    /// ## Example
    /// ```rust
    /// use delicia_core::money::{Decimal, Money};
    /// use delicia_core::types::Rate;
    ///
    /// let base = Money::from_cents(1234);
    /// let five_percent = base.apply_rate(Rate::from_bps(500));
    /// assert_eq!(five_percent.amount(), "0.617".parse::<Decimal>().unwrap());
    /// assert_eq!(five_percent.to_string(), "S/0.62");
    /// ```
    pub fn apply_rate(&self, rate: Rate) -> Money {
        // normalize drops the trailing zeros the 4-digit rate scale adds
        Money((self.0 * rate.as_decimal()).normalize())
    }

    /// Rounds to 2 decimal places, half away from zero.
    ///
    /// ## Rounding Rule
    /// ```text
    ///   0.005  → 0.01
    ///   2.675  → 2.68
    ///  -0.005  → -0.01
    /// ```
    /// This is the only place a monetary value loses precision, and it is
    /// only called when a value is about to be shown.
    pub fn round_for_display(&self) -> Money {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMALS);
        Money(rounded)
    }

    /// Formats the rounded amount without the currency prefix ("12.50").
    pub fn to_plain_string(&self) -> String {
        self.round_for_display().0.to_string()
    }
}

/// Serializes the display amount: rounded, always two decimals ("5.75").
///
/// For `#[serde(serialize_with = "...")]` on fields that end up in front
/// of the customer.
pub fn serialize_rounded<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&money.to_plain_string())
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the rounded amount with the sol prefix: `S/12.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.round_for_display();
        let sign = if rounded.is_negative() { "-" } else { "" };
        write!(f, "{}{}{}", sign, CURRENCY_SYMBOL, rounded.0.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
