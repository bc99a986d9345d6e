//! # Reporting
//!
//! Read-only projections over the catalog and the cart. Nothing here mutates
//! state or prints; the shell decides how to show the results.

use serde::Serialize;

use crate::cart::{Cart, CartEntry};
use crate::catalog::Catalog;
use crate::money::{serialize_rounded, Money};
use crate::pricing;
use crate::types::Product;

/// Default size of the "most expensive products" report.
pub const DEFAULT_TOP_N: usize = 3;

/// Item count and amount of the current cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartSummary {
    /// Sum of quantities, not distinct products.
    pub total_item_count: i64,
    /// Same as the pricing subtotal (before discount and tax).
    #[serde(serialize_with = "serialize_rounded")]
    pub total_amount: Money,
}

/// The `n` most expensive catalog products.
pub fn top_priced(catalog: &Catalog, n: usize) -> Vec<&Product> {
    catalog.top_by_price(n)
}

/// Cart entries by quantity, highest first; ties keep insertion order.
///
/// Entries are already unique per product, so no grouping is needed.
pub fn most_quantity(cart: &Cart) -> Vec<&CartEntry> {
    let mut entries: Vec<&CartEntry> = cart.entries().iter().collect();
    entries.sort_by(|a, b| b.quantity.cmp(&a.quantity));
    entries
}

pub fn cart_summary(cart: &Cart) -> CartSummary {
    CartSummary {
        total_item_count: cart.total_quantity(),
        total_amount: pricing::subtotal(cart),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
