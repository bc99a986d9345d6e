//! # Catalog
//!
//! The fixed, read-only list of products the store sells.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  lookup("3") / lookup("QUESO")  ──► exact id or case-insensitive name  │
//! │  filter_by_category("Lacteos")  ──► every dairy product, catalog order │
//! │  top_by_price(3)                ──► priciest first, stable on ties     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There are no mutation operations: a catalog is validated once when it is
//! built and only read afterwards.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{CoreError, CoreResult, LookupScope, ValidationError};
use crate::types::{LookupKey, Product};
use crate::validation::{
    validate_category, validate_price_cents, validate_product_id, validate_product_name,
    ValidationResult,
};

/// The Delicia seed catalog: `(id, name, price_cents, category)`.
const SEED_PRODUCTS: &[(u32, &str, i64, &str)] = &[
    (1, "pan", 250, "panaderia"),
    (2, "leche", 380, "lacteos"),
    (3, "queso", 750, "lacteos"),
    (4, "galletas", 420, "snacks"),
    (5, "gaseosa", 300, "bebidas"),
    (6, "cafe", 650, "bebidas"),
    (7, "jugo", 480, "bebidas"),
    (8, "mantequilla", 520, "lacteos"),
    (9, "croissant", 300, "panaderia"),
];

/// A validated, immutable product list.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Builds a catalog, validating every product.
    ///
    /// ## Rules
    /// - ids are positive and unique
    /// - names and categories are non-empty
    /// - prices are in `0..=MAX_PRICE_CENTS`
    pub fn new(products: Vec<Product>) -> ValidationResult<Self> {
        let mut seen = HashSet::with_capacity(products.len());

        for product in &products {
            validate_product_id(product.id)?;
            validate_product_name(&product.name)?;
            validate_category(&product.category)?;
            validate_price_cents(product.price_cents)?;

            if !seen.insert(product.id) {
                return Err(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: product.id.to_string(),
                });
            }
        }

        Ok(Catalog { products })
    }

    /// The nine-product Delicia bakery catalog.
    pub fn seed() -> Self {
        let products = SEED_PRODUCTS
            .iter()
            .map(|&(id, name, price_cents, category)| Product::new(id, name, price_cents, category))
            .collect();

        Catalog { products }
    }

    /// All products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Finds a product by id or name without building an error.
    pub fn find(&self, key: &LookupKey) -> Option<&Product> {
        self.products.iter().find(|p| p.matches(key))
    }

    /// Resolves what the cashier typed to a product.
    ///
    /// Digits are an id, anything else is a case-insensitive exact name.
    ///
    /// ## Example
    /// ```rust
    /// use delicia_core::Catalog;
    ///
    /// let catalog = Catalog::seed();
    /// assert_eq!(catalog.lookup(" Queso ").unwrap().id, 3);
    /// assert_eq!(catalog.lookup(3u32).unwrap().name, "queso");
    /// assert!(catalog.lookup("que").is_err());
    /// ```
    pub fn lookup(&self, key: impl Into<LookupKey>) -> CoreResult<&Product> {
        let key = key.into();
        self.find(&key)
            .ok_or_else(|| CoreError::not_found(&key, LookupScope::Catalog))
    }

    /// Products whose category equals `category`, ignoring case.
    ///
    /// An unknown category yields an empty list, not an error.
    pub fn filter_by_category(&self, category: &str) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.in_category(category))
            .collect()
    }

    /// The `n` most expensive products, highest price first.
    ///
    /// Ties keep catalog order. Asking for more than the catalog holds
    /// returns everything.
    pub fn top_by_price(&self, n: usize) -> Vec<&Product> {
        let mut sorted: Vec<&Product> = self.products.iter().collect();
        // sort_by is stable
        sorted.sort_by(|a, b| b.price_cents.cmp(&a.price_cents));
        sorted.truncate(n);
        sorted
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::seed()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
