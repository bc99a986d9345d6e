//! # Report Commands
//!
//! Menu option 7.

use delicia_core::{CartEntry, CartSummary, Product, Store};
use serde::Serialize;
use tracing::debug;

/// Everything the reports screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct Reports {
    /// Most expensive catalog products, highest first
    pub top_priced: Vec<Product>,

    /// Cart entries by quantity, highest first
    pub most_quantity: Vec<CartEntry>,

    pub summary: CartSummary,
}

pub fn reports(store: &Store, top_n: usize) -> Reports {
    debug!(top_n = top_n, "reports command");

    Reports {
        top_priced: store.top_priced(top_n).into_iter().cloned().collect(),
        most_quantity: store.most_quantity().into_iter().cloned().collect(),
        summary: store.cart_summary(),
    }
}
