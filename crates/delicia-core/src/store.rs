//! # Store
//!
//! The session context: one catalog, one cart, one customer and the pricing
//! policy in force. The shell owns exactly one `Store` and threads it through
//! every command.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Store                                         │
//! │                                                                         │
//! │  name ─────────── printed on receipts                                   │
//! │  catalog ──────── read only, validated once                             │
//! │  cart ─────────── mutated by add / remove / clear                       │
//! │  customer ─────── set at session start                                 │
//! │  policy ───────── discount tiers + tax rate                             │
//! │                                                                         │
//! │  add_to_cart_raw("Queso", "2")                                          │
//! │      │                                                                  │
//! │      ├── parse_quantity("2") ─────► 2          (InvalidQuantity)        │
//! │      ├── catalog.lookup("Queso") ─► &Product   (NotFound)               │
//! │      └── cart.add(product, 2) ────► &CartEntry                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::cart::{Cart, CartEntry};
use crate::catalog::Catalog;
use crate::error::CoreResult;
use crate::pricing::{PricingPolicy, PricingSnapshot};
use crate::receipt::Receipt;
use crate::reporting::{self, CartSummary};
use crate::types::{Customer, LookupKey, Product};
use crate::validation::parse_quantity;
use crate::DEFAULT_STORE_NAME;

#[derive(Debug, Clone)]
pub struct Store {
    name: String,
    catalog: Catalog,
    cart: Cart,
    customer: Customer,
    policy: PricingPolicy,
}

impl Store {
    pub fn new(name: impl Into<String>, catalog: Catalog, policy: PricingPolicy) -> Self {
        Store {
            name: name.into(),
            catalog,
            cart: Cart::new(),
            customer: Customer::guest(),
            policy,
        }
    }

    /// The Delicia seed catalog with the standard policy.
    pub fn seeded() -> Self {
        Store::new(DEFAULT_STORE_NAME, Catalog::seed(), PricingPolicy::standard())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn customer(&self) -> &Customer {
        &self.customer
    }

    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    pub fn set_customer(&mut self, name: &str, email: Option<&str>) -> &Customer {
        self.customer = Customer::new(name, email);
        &self.customer
    }

    /// Looks a product up in the catalog.
    pub fn find_product(&self, key: impl Into<LookupKey>) -> CoreResult<&Product> {
        self.catalog.lookup(key)
    }

    /// Adds `quantity` units of the product named by `key`.
    ///
    /// ## Errors
    /// - `NotFound` if the catalog has no such product
    /// - `InvalidQuantity` if `quantity <= 0`
    ///
    /// The cart is unchanged on error.
    pub fn add_to_cart(&mut self, key: impl Into<LookupKey>, quantity: i64) -> CoreResult<&CartEntry> {
        let product = self.catalog.lookup(key)?;
        self.cart.add(product, quantity)
    }

    /// Same as [`Store::add_to_cart`] with the quantity as typed.
    ///
    /// The quantity is checked before the product, so `"abc"` is reported as
    /// an invalid quantity even when the product is also unknown.
    pub fn add_to_cart_raw(&mut self, key: &str, quantity: &str) -> CoreResult<&CartEntry> {
        let quantity = parse_quantity(quantity)?;
        self.add_to_cart(key, quantity)
    }

    /// Removes the cart entry named by `key`.
    pub fn remove_from_cart(&mut self, key: impl Into<LookupKey>) -> CoreResult<CartEntry> {
        self.cart.remove(key)
    }

    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Prices the current cart under this store's policy.
    pub fn pricing(&self) -> PricingSnapshot {
        self.policy.price(&self.cart)
    }

    /// Issues a receipt for the current cart. The cart is left as is.
    pub fn receipt(&self) -> CoreResult<Receipt> {
        Receipt::issue(&self.name, &self.customer, &self.cart, &self.policy)
    }

    pub fn top_priced(&self, n: usize) -> Vec<&Product> {
        reporting::top_priced(&self.catalog, n)
    }

    pub fn most_quantity(&self) -> Vec<&CartEntry> {
        reporting::most_quantity(&self.cart)
    }

    pub fn cart_summary(&self) -> CartSummary {
        reporting::cart_summary(&self.cart)
    }
}

impl Default for Store {
    fn default() -> Self {
        Store::seeded()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
