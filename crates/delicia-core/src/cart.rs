//! # Cart
//!
//! The per-session shopping cart.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Cashier Action           Method                  Cart Change           │
//! │  ──────────────           ──────                  ───────────           │
//! │                                                                         │
//! │  Register sale ─────────► add(product, qty) ────► push or qty += n     │
//! │                                                                         │
//! │  Remove product ────────► remove(key) ──────────► entries.remove(i)    │
//! │                                                                         │
//! │  Empty cart ────────────► clear() ──────────────► entries.clear()      │
//! │                                                                         │
//! │  View cart ─────────────► entries() ────────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, LookupScope};
use crate::money::Money;
use crate::types::{LookupKey, Product};
use crate::validation::{validate_price_cents, validate_quantity, MAX_QUANTITY};

/// A line in the cart.
///
/// ## Design Notes
/// - `product_id`: reference to the catalog product (never an alias to it)
/// - `name` / `unit_price_cents`: copied when the product is first added, so
///   the cart can be displayed and priced without going back to the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub product_id: u32,
    pub name: String,
    pub unit_price_cents: i64,
    /// Always in `1..=MAX_QUANTITY`.
    pub quantity: i64,
}

impl CartEntry {
    fn from_product(product: &Product, quantity: i64) -> Self {
        CartEntry {
            product_id: product.id,
            name: product.name.clone(),
            unit_price_cents: product.price_cents,
            quantity,
        }
    }

    /// Unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total (unit price × quantity), exact.
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }

    /// Whether this entry answers to the given id or name.
    pub fn matches(&self, key: &LookupKey) -> bool {
        key.matches(self.product_id, &self.name)
    }
}

/// The shopping cart.
///
/// ## Invariants
/// - Entries are unique by `product_id` (adding the same product merges)
/// - Every quantity is in `1..=MAX_QUANTITY` (removal deletes the entry)
/// - Insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    entries: Vec<CartEntry>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart {
            entries: Vec::new(),
        }
    }

    /// Adds a product to the cart or increases its quantity if already present.
    ///
    /// ## Behavior
    /// - quantity <= 0 or > `MAX_QUANTITY`: `InvalidQuantity`, cart untouched
    /// - price outside `0..=MAX_PRICE_CENTS`: `Validation`, cart untouched
    /// - product already in cart: quantity increases, unless the merged
    ///   quantity would exceed `MAX_QUANTITY` (`InvalidQuantity`, cart untouched)
    /// - product not in cart: new entry at the end
    ///
    /// ## Returns
    /// The resulting entry, for the confirmation message.
    ///
    /// ## Example
    /// ```rust
    /// use delicia_core::{Cart, Catalog};
    ///
    /// let catalog = Catalog::seed();
    /// let pan = catalog.lookup("pan").unwrap();
    ///
    /// let mut cart = Cart::new();
    /// cart.add(pan, 2).unwrap();
    /// let entry = cart.add(pan, 3).unwrap();
    ///
    /// assert_eq!(entry.quantity, 5);
    /// assert_eq!(cart.len(), 1);
    /// ```
    pub fn add(&mut self, product: &Product, quantity: i64) -> CoreResult<&CartEntry> {
        validate_quantity(quantity)?;
        validate_price_cents(product.price_cents)?;

        let index = match self.position(product.id) {
            Some(index) => {
                let entry = &mut self.entries[index];
                let merged = entry.quantity + quantity;
                if merged > MAX_QUANTITY {
                    return Err(CoreError::invalid_quantity(quantity));
                }
                entry.quantity = merged;
                index
            }
            None => {
                self.entries.push(CartEntry::from_product(product, quantity));
                self.entries.len() - 1
            }
        };

        Ok(&self.entries[index])
    }

    /// Removes an entry by product id or name.
    ///
    /// The key is matched against what is *in the cart*: a product that
    /// exists in the catalog but was never added is `NotFound`.
    pub fn remove(&mut self, key: impl Into<LookupKey>) -> CoreResult<CartEntry> {
        let key = key.into();
        let index = self
            .entries
            .iter()
            .position(|e| e.matches(&key))
            .ok_or_else(|| CoreError::not_found(&key, LookupScope::Cart))?;

        Ok(self.entries.remove(index))
    }

    /// Removes all entries. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Finds the entry for a product id.
    pub fn get(&self, product_id: u32) -> Option<&CartEntry> {
        self.entries.iter().find(|e| e.product_id == product_id)
    }

    /// Number of distinct products in the cart.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all quantities.
    pub fn total_quantity(&self) -> i64 {
        self.entries.iter().map(|e| e.quantity).sum()
    }

    fn position(&self, product_id: u32) -> Option<usize> {
        self.entries.iter().position(|e| e.product_id == product_id)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::Catalog;

    fn product(id: u32, price_cents: i64) -> Product {
        Product::new(id, format!("product-{}", id), price_cents, "test")
    }

    #[test]
    fn test_cart_add_item() {
        let mut cart = Cart::new();
        let entry = cart.add(&product(1, 999), 2).unwrap();

        assert_eq!(entry.quantity, 2);
        assert_eq!(entry.line_total(), Money::from_cents(1998));
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.total_quantity(), 2);
    }

    #[test]
    fn test_cart_add_same_product_merges() {
        let mut cart = Cart::new();
        let p = product(1, 999);

        cart.add(&p, 2).unwrap();
        cart.add(&p, 3).unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.entries()[0].quantity, 5);
    }

    #[test]
    fn test_cart_preserves_insertion_order() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();

        for key in ["queso", "pan", "cafe", "pan"] {
            cart.add(catalog.lookup(key).unwrap(), 1).unwrap();
        }

        let ids: Vec<u32> = cart.entries().iter().map(|e| e.product_id).collect();
        assert_eq!(ids, vec![3, 1, 6]);
    }

    #[test]
    fn test_cart_rejects_non_positive_quantity() {
        let mut cart = Cart::new();
        let p = product(1, 100);

        for qty in [0, -1, i64::MIN, MAX_QUANTITY + 1, i64::MAX] {
            let err = cart.add(&p, qty).unwrap_err();
            assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_merge_past_max_is_rejected() {
        let mut cart = Cart::new();
        let p = product(1, 1);

        cart.add(&p, MAX_QUANTITY).unwrap();
        let err = cart.add(&p, 1).unwrap_err();

        assert!(matches!(err, CoreError::InvalidQuantity { .. }));
        assert_eq!(cart.entries()[0].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_cart_rejects_unbounded_price() {
        let mut cart = Cart::new();
        let err = cart.add(&product(1, i64::MAX), 1).unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_total_quantity_of_full_lines() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        for product in catalog.products() {
            cart.add(product, MAX_QUANTITY).unwrap();
        }

        assert_eq!(cart.total_quantity(), MAX_QUANTITY * 9);
        assert!(cart.entries().iter().all(|e| e.line_total().is_positive()));
    }

    #[test]
    fn test_cart_remove_by_id_and_name() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(catalog.lookup("pan").unwrap(), 2).unwrap();
        cart.add(catalog.lookup("queso").unwrap(), 1).unwrap();

        let removed = cart.remove("QUESO").unwrap();
        assert_eq!(removed.product_id, 3);

        let removed = cart.remove(1u32).unwrap();
        assert_eq!(removed.name, "pan");

        assert!(cart.is_empty());
    }

    #[test]
    fn test_cart_remove_missing_leaves_cart_unchanged() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(catalog.lookup("pan").unwrap(), 2).unwrap();
        let before = cart.clone();

        // leche exists in the catalog but was never added
        let err = cart.remove("leche").unwrap_err();
        assert!(matches!(
            err,
            CoreError::NotFound {
                scope: LookupScope::Cart,
                ..
            }
        ));

        let err = cart.remove("2").unwrap_err();
        assert!(matches!(err, CoreError::NotFound { .. }));

        assert_eq!(cart, before);
    }

    #[test]
    fn test_cart_clear() {
        let mut cart = Cart::new();
        cart.add(&product(1, 999), 2).unwrap();
        assert!(!cart.is_empty());

        cart.clear();
        assert!(cart.entries().is_empty());

        cart.clear();
        assert!(cart.entries().is_empty());
    }

    #[test]
    fn test_entry_keeps_price_snapshot() {
        let mut cart = Cart::new();
        cart.add(&product(1, 250), 1).unwrap();

        // a later add with a different price keeps the first snapshot
        cart.add(&product(1, 9999), 1).unwrap();

        let entry = cart.get(1).unwrap();
        assert_eq!(entry.unit_price_cents, 250);
        assert_eq!(entry.line_total(), Money::from_cents(500));
    }

    proptest! {
        #[test]
        fn prop_repeated_adds_merge_into_one_entry(q1 in 1i64..10_000, q2 in 1i64..10_000) {
            let mut cart = Cart::new();
            let p = product(7, 480);

            cart.add(&p, q1).unwrap();
            cart.add(&p, q2).unwrap();

            prop_assert_eq!(cart.len(), 1);
            prop_assert_eq!(cart.entries()[0].quantity, q1 + q2);
        }

        #[test]
        fn prop_clear_always_empties(ops in prop::collection::vec((1u32..10, 1i64..50), 0..20)) {
            let catalog = Catalog::seed();
            let mut cart = Cart::new();
            for (id, qty) in ops {
                cart.add(catalog.lookup(id).unwrap(), qty).unwrap();
            }

            cart.clear();
            prop_assert!(cart.entries().is_empty());
        }

        #[test]
        fn prop_ids_stay_unique(ops in prop::collection::vec((1u32..10, 1i64..50), 0..40)) {
            let catalog = Catalog::seed();
            let mut cart = Cart::new();
            for (id, qty) in ops {
                cart.add(catalog.lookup(id).unwrap(), qty).unwrap();
            }

            let mut ids: Vec<u32> = cart.entries().iter().map(|e| e.product_id).collect();
            let before = ids.len();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), before);
            prop_assert!(cart.entries().iter().all(|e| e.quantity > 0));
        }
    }
}
