//! # Receipt
//!
//! The ticket handed to the customer.
//!
//! A receipt freezes the cart lines and the pricing at the moment it is
//! issued. It is pure data; the shell renders it as text or JSON.
//!
//! ## Receipt Layout (text rendering)
//! ```text
//! ====== PURCHASE SUMMARY ======
//! Product        Qty   Price     Subtotal
//! ---------------------------------------
//! pan            2     S/2.50    S/5.00
//! queso          1     S/7.50    S/7.50
//! ---------------------------------------
//! Subtotal: S/12.50
//! Discount: S/0.00
//! IGV (18%): S/2.25
//! TOTAL: S/14.75
//! ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::cart::{Cart, CartEntry};
use crate::error::{CoreError, CoreResult};
use crate::money::{serialize_rounded, Money};
use crate::pricing::{PricingPolicy, PricingSnapshot};
use crate::types::Customer;

/// One printed line.
///
/// Amounts serialize rounded to two decimals, as printed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReceiptLine {
    pub product_id: u32,
    pub name: String,
    pub quantity: i64,
    #[serde(serialize_with = "serialize_rounded")]
    pub unit_price: Money,
    #[serde(serialize_with = "serialize_rounded")]
    pub line_total: Money,
}

impl From<&CartEntry> for ReceiptLine {
    fn from(entry: &CartEntry) -> Self {
        ReceiptLine {
            product_id: entry.product_id,
            name: entry.name.clone(),
            quantity: entry.quantity,
            unit_price: entry.unit_price(),
            line_total: entry.line_total(),
        }
    }
}

/// An issued ticket.
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub id: Uuid,
    pub issued_at: DateTime<Utc>,
    pub store_name: String,
    pub customer: Customer,
    pub lines: Vec<ReceiptLine>,
    pub pricing: PricingSnapshot,
}

impl Receipt {
    /// Issues a receipt for the current cart, stamped now.
    ///
    /// ## Errors
    /// `EmptyCart` if there is nothing to charge.
    pub fn issue(
        store_name: &str,
        customer: &Customer,
        cart: &Cart,
        policy: &PricingPolicy,
    ) -> CoreResult<Self> {
        Receipt::issue_at(store_name, customer, cart, policy, Utc::now())
    }

    /// Same as [`Receipt::issue`] with an explicit timestamp.
    pub fn issue_at(
        store_name: &str,
        customer: &Customer,
        cart: &Cart,
        policy: &PricingPolicy,
        issued_at: DateTime<Utc>,
    ) -> CoreResult<Self> {
        if cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }

        Ok(Receipt {
            id: Uuid::new_v4(),
            issued_at,
            store_name: store_name.to_string(),
            customer: customer.clone(),
            lines: cart.entries().iter().map(ReceiptLine::from).collect(),
            pricing: policy.price(cart),
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::Catalog;

    fn sample_cart() -> Cart {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(catalog.lookup("pan").unwrap(), 2).unwrap();
        cart.add(catalog.lookup("queso").unwrap(), 1).unwrap();
        cart
    }

    #[test]
    fn test_issue_freezes_lines_and_pricing() {
        let cart = sample_cart();
        let customer = Customer::new("Ana", None);
        let at = Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap();

        let receipt =
            Receipt::issue_at("Delicia", &customer, &cart, &PricingPolicy::standard(), at)
                .unwrap();

        assert_eq!(receipt.issued_at, at);
        assert_eq!(receipt.store_name, "Delicia");
        assert_eq!(receipt.customer.name, "Ana");
        assert_eq!(receipt.lines.len(), 2);
        assert_eq!(receipt.lines[0].name, "pan");
        assert_eq!(receipt.lines[0].line_total, Money::from_cents(500));
        assert_eq!(receipt.pricing.total, Money::from_cents(1475));
    }

    #[test]
    fn test_issue_rejects_empty_cart() {
        let err = Receipt::issue(
            "Delicia",
            &Customer::guest(),
            &Cart::new(),
            &PricingPolicy::standard(),
        )
        .unwrap_err();

        assert!(matches!(err, CoreError::EmptyCart));
    }

    #[test]
    fn test_receipts_get_distinct_ids() {
        let cart = sample_cart();
        let policy = PricingPolicy::standard();
        let a = Receipt::issue("Delicia", &Customer::guest(), &cart, &policy).unwrap();
        let b = Receipt::issue("Delicia", &Customer::guest(), &cart, &policy).unwrap();

        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_receipt_json_shape() {
        let receipt = Receipt::issue(
            "Delicia",
            &Customer::guest(),
            &sample_cart(),
            &PricingPolicy::standard(),
        )
        .unwrap();

        let json = serde_json::to_value(&receipt).unwrap();
        assert_eq!(json["store_name"], "Delicia");
        assert_eq!(json["customer"]["name"], "Invitado");
        assert_eq!(json["lines"][1]["name"], "queso");
        assert_eq!(json["lines"][1]["unit_price"], "7.50");
        assert_eq!(json["pricing"]["subtotal"], "12.50");
    }

    #[test]
    fn test_receipt_json_amounts_have_two_decimals() {
        // 7 x jugo: IGV 5.7456, total 37.6656
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(catalog.lookup("jugo").unwrap(), 7).unwrap();

        let receipt = Receipt::issue(
            "Delicia",
            &Customer::guest(),
            &cart,
            &PricingPolicy::standard(),
        )
        .unwrap();
        let json = serde_json::to_value(&receipt).unwrap();

        assert_eq!(json["pricing"]["discount_amount"], "1.68");
        assert_eq!(json["pricing"]["tax_amount"], "5.75");
        assert_eq!(json["pricing"]["total"], "37.67");
        assert_eq!(json["lines"][0]["line_total"], "33.60");
        assert_eq!(receipt.pricing.total.amount().to_string(), "37.6656");
    }
}
