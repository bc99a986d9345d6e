//! # Receipt Commands
//!
//! Menu option 6: issue the ticket for the current cart and render it in the
//! configured format.

use delicia_core::{Receipt, Store};
use tracing::{debug, info};

use crate::config::ReceiptFormat;
use crate::error::CliResult;
use crate::format;

/// Issues a receipt for the current cart.
///
/// ## Errors
/// `EMPTY_CART` when there is nothing to charge.
pub fn generate_receipt(store: &Store) -> CliResult<Receipt> {
    debug!(entries = store.cart().len(), "generate_receipt command");

    let receipt = store.receipt()?;
    info!(
        receipt_id = %receipt.id,
        total = %receipt.pricing.total,
        "Receipt issued"
    );
    Ok(receipt)
}

/// Renders a receipt as padded text or pretty JSON.
pub fn render_receipt(receipt: &Receipt, receipt_format: ReceiptFormat) -> CliResult<String> {
    match receipt_format {
        ReceiptFormat::Text => Ok(format::receipt(receipt)),
        ReceiptFormat::Json => Ok(serde_json::to_string_pretty(receipt)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn store_with_sale() -> Store {
        let mut store = Store::seeded();
        store.add_to_cart("pan", 2).unwrap();
        store.add_to_cart("queso", 1).unwrap();
        store
    }

    #[test]
    fn test_empty_cart_has_no_receipt() {
        let err = generate_receipt(&Store::seeded()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyCart);
    }

    #[test]
    fn test_text_receipt_ends_with_total() {
        let receipt = generate_receipt(&store_with_sale()).unwrap();
        let text = render_receipt(&receipt, ReceiptFormat::Text).unwrap();

        assert!(text.contains("TOTAL: S/14.75"));
    }

    #[test]
    fn test_json_receipt_parses_back() {
        let receipt = generate_receipt(&store_with_sale()).unwrap();
        let json = render_receipt(&receipt, ReceiptFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["id"], receipt.id.to_string());
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
        assert_eq!(value["pricing"]["total"], "14.75");
    }

    /// Collects every string under a key that names an amount.
    fn amounts<'a>(value: &'a serde_json::Value, out: &mut Vec<&'a str>) {
        match value {
            serde_json::Value::Object(map) => {
                for (key, v) in map {
                    let is_amount = key == "subtotal"
                        || key == "total"
                        || key.ends_with("_amount")
                        || key.ends_with("_price")
                        || key.ends_with("_total");
                    match v.as_str() {
                        Some(s) if is_amount => out.push(s),
                        _ => amounts(v, out),
                    }
                }
            }
            serde_json::Value::Array(items) => items.iter().for_each(|v| amounts(v, out)),
            _ => {}
        }
    }

    fn is_two_decimal_amount(s: &str) -> bool {
        match s.split_once('.') {
            Some((whole, cents)) => {
                !whole.is_empty()
                    && whole.bytes().all(|b| b.is_ascii_digit())
                    && cents.len() == 2
                    && cents.bytes().all(|b| b.is_ascii_digit())
            }
            None => false,
        }
    }

    #[test]
    fn test_json_receipt_amounts_have_two_decimals() {
        let mut store = Store::seeded();
        store.add_to_cart("jugo", 7).unwrap();
        store.add_to_cart("pan", 3).unwrap();

        let receipt = generate_receipt(&store).unwrap();
        let json = render_receipt(&receipt, ReceiptFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        let mut found = Vec::new();
        amounts(&value, &mut found);

        // 2 lines x (unit_price, line_total) + 4 pricing amounts
        assert_eq!(found.len(), 8);
        for amount in found {
            assert!(is_two_decimal_amount(amount), "amount {:?}", amount);
        }
        assert_eq!(value["pricing"]["tax_amount"], "7.03");
        assert_eq!(value["pricing"]["total"], "46.07");
    }
}
