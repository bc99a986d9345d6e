//! # Cart Commands
//!
//! Cart manipulation: menu options 1, 4 and 5.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                         │
//! │  │  Empty   │────►│ In Cart  │────►│ Receipt  │                         │
//! │  │  Cart    │     │          │     │ printed  │                         │
//! │  └──────────┘     └──────────┘     └──────────┘                         │
//! │       ▲                │                                                │
//! │       │           add_to_cart                                           │
//! │       │           remove_from_cart                                      │
//! │       │                │                                                │
//! │       └─────────── clear_cart                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Printing a receipt does not empty the cart.

use delicia_core::money::serialize_rounded;
use delicia_core::{CartEntry, Money, PricingSnapshot, Store};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CliResult;

/// What the cashier sees after registering a sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AddedToCart {
    pub name: String,
    /// Units added by this command
    pub quantity: i64,
    #[serde(serialize_with = "serialize_rounded")]
    pub unit_price: Money,
    /// Units of this product now in the cart
    pub quantity_in_cart: i64,
}

/// Cart lines plus their pricing.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub entries: Vec<CartEntry>,
    pub pricing: PricingSnapshot,
}

/// Adds a product to the cart.
///
/// ## Arguments
/// * `product` - Product id or name, as typed
/// * `quantity` - Quantity as typed; must be a positive whole number
pub fn add_to_cart(store: &mut Store, product: &str, quantity: &str) -> CliResult<AddedToCart> {
    debug!(product = %product, quantity = %quantity, "add_to_cart command");

    // only one line changes, so the cart total grows by the units added
    let before = store.cart().total_quantity();
    let entry = store.add_to_cart_raw(product, quantity)?.clone();
    let added = store.cart().total_quantity() - before;

    info!(
        product_id = entry.product_id,
        quantity_in_cart = entry.quantity,
        "Product added to cart"
    );

    Ok(AddedToCart {
        name: entry.name.clone(),
        quantity: added,
        unit_price: entry.unit_price(),
        quantity_in_cart: entry.quantity,
    })
}

/// Current cart contents with totals.
pub fn view_cart(store: &Store) -> CartView {
    debug!("view_cart command");
    CartView {
        entries: store.cart().entries().to_vec(),
        pricing: store.pricing(),
    }
}

/// Removes a product from the cart by id or name.
pub fn remove_from_cart(store: &mut Store, product: &str) -> CliResult<CartEntry> {
    debug!(product = %product, "remove_from_cart command");

    let removed = store.remove_from_cart(product)?;
    info!(product_id = removed.product_id, "Product removed from cart");
    Ok(removed)
}

/// Empties the cart.
pub fn clear_cart(store: &mut Store) {
    debug!(entries = store.cart().len(), "clear_cart command");
    store.clear_cart();
}
