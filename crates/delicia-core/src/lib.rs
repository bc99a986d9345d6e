//! # delicia-core: Pure Business Logic for Delicia POS
//!
//! This crate is the **heart** of Delicia POS. It contains the catalog, the
//! cart and the pricing engine as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Delicia POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  Console Shell (delicia-cli)                    │   │
//! │  │    Menu ──► Prompts ──► Commands ──► Formatted output           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ delicia-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  pricing  │  │ reporting │  │   │
//! │  │   │  lookup   │  │  add/rm   │  │ discount  │  │  top-N    │  │   │
//! │  │   │  filter   │  │  clear    │  │ IGV, total│  │  summary  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Customer, Rate, LookupKey)
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`catalog`] - The read-only product catalog
//! - [`cart`] - The per-session shopping cart
//! - [`pricing`] - Tiered discount, IGV and totals
//! - [`reporting`] - Read-only projections over catalog and cart
//! - [`receipt`] - The ticket handed to the customer
//! - [`store`] - Session context tying all of the above together
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use delicia_core::{pricing, Cart, Catalog, Money};
//!
//! let catalog = Catalog::seed();
//! let mut cart = Cart::new();
//!
//! cart.add(catalog.lookup("pan").unwrap(), 2).unwrap();
//! cart.add(catalog.lookup(3u32).unwrap(), 1).unwrap(); // queso
//!
//! let subtotal = pricing::subtotal(&cart);
//! let discount = pricing::discount_amount(subtotal);
//! let tax = pricing::tax_amount(subtotal, discount);
//! let total = pricing::total(subtotal, discount, tax);
//!
//! assert_eq!(total, Money::from_cents(1475));
//! assert_eq!(total.to_string(), "S/14.75");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod pricing;
pub mod receipt;
pub mod reporting;
pub mod store;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartEntry};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, LookupScope, ValidationError};
pub use money::Money;
pub use pricing::{DiscountTier, PricingPolicy, PricingSnapshot, TierBound};
pub use receipt::{Receipt, ReceiptLine};
pub use reporting::CartSummary;
pub use store::Store;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name printed on receipts when nothing else is configured.
pub const DEFAULT_STORE_NAME: &str = "Delicia";

/// Customer name used when the cashier leaves the prompt blank.
pub const GUEST_CUSTOMER_NAME: &str = "Invitado";

/// IGV (Peruvian general sales tax), applied after discount.
///
/// 1800 basis points = 18%.
pub const IGV_RATE_BPS: u32 = 1800;

/// Currency prefix for displayed amounts (Peruvian sol).
pub const CURRENCY_SYMBOL: &str = "S/";
