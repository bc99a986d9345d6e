//! # Catalog Commands
//!
//! Read-only catalog queries: menu options 2, 3 and 8.

use delicia_core::{Product, Store};
use tracing::debug;

use crate::error::CliResult;

/// Every product in catalog order.
pub fn list_products(store: &Store) -> &[Product] {
    debug!(count = store.catalog().len(), "list_products command");
    store.catalog().products()
}

/// Finds one product by id or exact name.
///
/// ## Arguments
/// * `query` - What the cashier typed: `"3"`, `"queso"`, `" QUESO "`
pub fn find_product<'a>(store: &'a Store, query: &str) -> CliResult<&'a Product> {
    debug!(query = %query, "find_product command");
    Ok(store.find_product(query)?)
}

/// Products in a category; an unknown category is just an empty list.
pub fn list_by_category<'a>(store: &'a Store, category: &str) -> Vec<&'a Product> {
    debug!(category = %category, "list_by_category command");
    store.catalog().filter_by_category(category)
}
