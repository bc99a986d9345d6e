//! # Domain Types
//!
//! Core domain types used throughout Delicia POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Customer     │   │   LookupKey     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  name           │   │  Id(u64)        │       │
//! │  │  name           │   │  email?         │   │  Name(lower)    │       │
//! │  │  price_cents    │   └─────────────────┘   └─────────────────┘       │
//! │  │  category       │                                                    │
//! │  └─────────────────┘   ┌─────────────────┐                              │
//! │                        │      Rate       │                              │
//! │                        │  bps (u32)      │                              │
//! │                        │  1800 = 18%     │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::GUEST_CUSTOMER_NAME;

// =============================================================================
// Rate
// =============================================================================

/// A percentage represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 1800 bps = 18% (IGV), 1500 bps = 15% (top discount tier)
///
/// Used for both discount tiers and tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rate(u32);

impl Rate {
    /// Creates a rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        Rate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (1800 bps → 0.18).
    #[inline]
    pub fn as_decimal(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 4)
    }

    /// Returns the rate as a percentage (1800 bps → 18).
    pub fn percentage(&self) -> Decimal {
        Decimal::new(i64::from(self.0), 2).normalize()
    }

    /// Zero rate.
    #[inline]
    pub const fn zero() -> Self {
        Rate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for Rate {
    fn default() -> Self {
        Rate::zero()
    }
}

/// Shown as a percentage: `18%`, `7.5%`.
impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percentage())
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
///
/// Created once when the catalog is built and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Unique positive identifier; also what the cashier types to select it.
    pub id: u32,

    /// Display name; matched case-insensitively.
    pub name: String,

    /// Price in cents (smallest currency unit).
    pub price_cents: i64,

    /// Category used for filtering ("lacteos", "bebidas", ...).
    pub category: String,
}

impl Product {
    /// Creates a product. No validation happens here; see [`crate::Catalog::new`].
    pub fn new(
        id: u32,
        name: impl Into<String>,
        price_cents: i64,
        category: impl Into<String>,
    ) -> Self {
        Product {
            id,
            name: name.into(),
            price_cents,
            category: category.into(),
        }
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Whether this product answers to the given id or name.
    pub fn matches(&self, key: &LookupKey) -> bool {
        key.matches(self.id, &self.name)
    }

    /// Case-insensitive category comparison (input is trimmed).
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.trim().to_lowercase()
    }
}

// =============================================================================
// Customer
// =============================================================================

/// The customer a ticket is issued to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: Option<String>,
}

impl Customer {
    /// Creates a customer; a blank name falls back to the guest name and a
    /// blank email is dropped.
    pub fn new(name: &str, email: Option<&str>) -> Self {
        let name = name.trim();
        Customer {
            name: if name.is_empty() {
                GUEST_CUSTOMER_NAME.to_string()
            } else {
                name.to_string()
            },
            email: email
                .map(str::trim)
                .filter(|e| !e.is_empty())
                .map(str::to_string),
        }
    }

    /// The walk-in customer.
    pub fn guest() -> Self {
        Customer::new(GUEST_CUSTOMER_NAME, None)
    }

    /// Friendly label: `"Ana (ana@example.com)"` or just `"Ana"`.
    pub fn description(&self) -> String {
        match &self.email {
            Some(email) => format!("{} ({})", self.name, email),
            None => self.name.clone(),
        }
    }
}

impl Default for Customer {
    fn default() -> Self {
        Customer::guest()
    }
}

// =============================================================================
// Lookup Key
// =============================================================================

/// How the cashier refers to a product: by id or by name.
///
/// ## Resolution Rule
/// ```text
/// input (trimmed)
///      │
///      ├── only ASCII digits? ──► Id(n)      exact id match
///      │
///      └── anything else ───────► Name(s)    case-insensitive exact match
/// ```
/// No partial or fuzzy matching: `"que"` does not find `"queso"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupKey {
    Id(u64),
    /// Stored lowercased.
    Name(String),
}

impl LookupKey {
    /// Parses raw cashier input.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            // Too many digits for u64: no product can carry that id.
            LookupKey::Id(trimmed.parse().unwrap_or(u64::MAX))
        } else {
            LookupKey::Name(trimmed.to_lowercase())
        }
    }

    /// Whether a product with this id and name answers to the key.
    pub fn matches(&self, id: u32, name: &str) -> bool {
        match self {
            LookupKey::Id(wanted) => u64::from(id) == *wanted,
            LookupKey::Name(wanted) => name.to_lowercase() == *wanted,
        }
    }
}

impl From<&str> for LookupKey {
    fn from(raw: &str) -> Self {
        LookupKey::parse(raw)
    }
}

impl From<&String> for LookupKey {
    fn from(raw: &String) -> Self {
        LookupKey::parse(raw)
    }
}

impl From<String> for LookupKey {
    fn from(raw: String) -> Self {
        LookupKey::parse(&raw)
    }
}

impl From<u32> for LookupKey {
    fn from(id: u32) -> Self {
        LookupKey::Id(u64::from(id))
    }
}

impl From<&LookupKey> for LookupKey {
    fn from(key: &LookupKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKey::Id(id) => write!(f, "{}", id),
            LookupKey::Name(name) => write!(f, "{}", name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_bps() {
        let rate = Rate::from_bps(1800);
        assert_eq!(rate.bps(), 1800);
        assert_eq!(rate.as_decimal(), Decimal::new(18, 2));
        assert_eq!(rate.to_string(), "18%");
        assert_eq!(Rate::from_bps(750).to_string(), "7.5%");
        assert_eq!(Rate::zero().to_string(), "0%");
    }

    #[test]
    fn test_product_price() {
        let queso = Product::new(3, "queso", 750, "lacteos");
        assert_eq!(queso.price(), Money::from_cents(750));
    }

    #[test]
    fn test_product_category_is_case_insensitive() {
        let leche = Product::new(2, "leche", 380, "lacteos");
        assert!(leche.in_category("LACTEOS"));
        assert!(leche.in_category(" Lacteos "));
        assert!(!leche.in_category("lacteo"));
    }

    #[test]
    fn test_lookup_key_parse() {
        assert_eq!(LookupKey::parse("3"), LookupKey::Id(3));
        assert_eq!(LookupKey::parse("  007 "), LookupKey::Id(7));
        assert_eq!(LookupKey::parse(" QUESO "), LookupKey::Name("queso".into()));
        assert_eq!(LookupKey::parse("-1"), LookupKey::Name("-1".into()));
        assert_eq!(LookupKey::parse("3.0"), LookupKey::Name("3.0".into()));
        assert_eq!(
            LookupKey::parse("99999999999999999999999"),
            LookupKey::Id(u64::MAX)
        );
    }

    #[test]
    fn test_lookup_key_matches() {
        let key = LookupKey::parse("Queso");
        assert!(key.matches(3, "queso"));
        assert!(!key.matches(3, "quesos"));

        let key = LookupKey::from(3u32);
        assert!(key.matches(3, "anything"));
        assert!(!key.matches(4, "queso"));
    }

    #[test]
    fn test_customer_defaults_to_guest() {
        let customer = Customer::new("   ", Some(""));
        assert_eq!(customer.name, GUEST_CUSTOMER_NAME);
        assert_eq!(customer.email, None);
        assert_eq!(customer.description(), "Invitado");
    }

    #[test]
    fn test_customer_description_with_email() {
        let customer = Customer::new("Ana", Some("ana@example.com"));
        assert_eq!(customer.description(), "Ana (ana@example.com)");
    }
}
