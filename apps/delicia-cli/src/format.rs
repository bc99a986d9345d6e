//! # Text Rendering
//!
//! Turns command results into the padded tables the cashier sees.
//!
//! Amounts go through `Money`'s `Display`, which rounds half away from zero
//! to two decimals and adds the `S/` prefix. Formatting width flags are
//! ignored by that impl, so amounts are turned into strings before padding.

use delicia_core::{PricingSnapshot, Product, Receipt};

use crate::commands::cart::{AddedToCart, CartView};
use crate::commands::report::Reports;

const RULE: &str = "---------------------------------------";

fn line_row(name: &str, quantity: &str, price: &str, subtotal: &str) -> String {
    format!("{:<14} {:<5} {:<9} {}", name, quantity, price, subtotal)
        .trim_end()
        .to_string()
}

fn product_row(id: &str, name: &str, category: &str, price: &str) -> String {
    format!("{:<3} {:<14} {:<12} {}", id, name, category, price)
}

/// The product list (menu option 2).
pub fn product_table<'a>(products: impl IntoIterator<Item = &'a Product>) -> String {
    let mut out = vec![
        "--- PRODUCT LIST ---".to_string(),
        product_row("ID", "Product", "Category", "Price"),
        RULE.to_string(),
    ];
    for p in products {
        out.push(product_row(
            &p.id.to_string(),
            &p.name,
            &p.category,
            &p.price().to_string(),
        ));
    }
    out.join("\n")
}

/// One product (menu option 3).
pub fn product_detail(product: &Product) -> String {
    format!(
        "Product: {}, Price: {}, Category: {}",
        product.name,
        product.price(),
        product.category
    )
}

/// Products of one category (menu option 8).
pub fn category_list(category: &str, products: &[&Product]) -> String {
    if products.is_empty() {
        return "No products found in that category.".to_string();
    }

    let mut out = vec![format!(
        "Products in category: {}",
        category.trim().to_lowercase()
    )];
    for p in products {
        out.push(format!("- {} ({})", p.name, p.price()));
    }
    out.join("\n")
}

/// Confirmation after registering a sale.
pub fn added(added: &AddedToCart) -> String {
    format!(
        "{} added ({} x {}), {} in cart",
        added.name, added.quantity, added.unit_price, added.quantity_in_cart
    )
}

/// Subtotal, discount, tax and total lines.
fn totals(pricing: &PricingSnapshot) -> Vec<String> {
    vec![
        format!("Subtotal: {}", pricing.subtotal),
        format!(
            "Discount ({}): {}",
            pricing.discount_rate, pricing.discount_amount
        ),
        format!("IGV ({}): {}", pricing.tax_rate, pricing.tax_amount),
        format!("TOTAL: {}", pricing.total),
    ]
}

/// The numbered cart table (menu option 4).
pub fn cart_table(view: &CartView) -> String {
    if view.entries.is_empty() {
        return "The cart is empty.".to_string();
    }

    let mut out = vec![
        "--- CURRENT CART ---".to_string(),
        format!("{:<3} {}", "#", line_row("Product", "Qty", "Price", "Subtotal")),
        format!("---{}", RULE),
    ];
    for (i, entry) in view.entries.iter().enumerate() {
        out.push(format!(
            "{:<3} {}",
            i + 1,
            line_row(
                &entry.name,
                &entry.quantity.to_string(),
                &entry.unit_price().to_string(),
                &entry.line_total().to_string(),
            )
        ));
    }
    out.push(format!("---{}", RULE));
    out.extend(totals(&view.pricing));
    out.join("\n")
}

/// The printed ticket (menu option 6, text format).
pub fn receipt(receipt: &Receipt) -> String {
    let mut out = vec![
        "====== PURCHASE SUMMARY ======".to_string(),
        format!("Store: {}", receipt.store_name),
        format!("Customer: {}", receipt.customer.description()),
        format!("Date: {}", receipt.issued_at.format("%Y-%m-%d %H:%M UTC")),
        format!("Receipt: {}", receipt.id),
        line_row("Product", "Qty", "Price", "Subtotal"),
        RULE.to_string(),
    ];
    for line in &receipt.lines {
        out.push(line_row(
            &line.name,
            &line.quantity.to_string(),
            &line.unit_price.to_string(),
            &line.line_total.to_string(),
        ));
    }
    out.push(RULE.to_string());
    out.extend(totals(&receipt.pricing));
    out.push("Thank you for your purchase!".to_string());
    out.join("\n")
}

/// The reports screen (menu option 7).
pub fn reports(reports: &Reports) -> String {
    let mut out = vec![
        "=== REPORTS ===".to_string(),
        String::new(),
        format!("Top {} most expensive products:", reports.top_priced.len()),
    ];
    for p in &reports.top_priced {
        out.push(format!("- {} ({})", p.name, p.price()));
    }

    out.push(String::new());
    if reports.most_quantity.is_empty() {
        out.push("No sales in the cart yet for 'best sellers'.".to_string());
    } else {
        out.push("Best sellers (current cart):".to_string());
        for entry in &reports.most_quantity {
            out.push(format!("- {}: {} units", entry.name, entry.quantity));
        }
    }

    out.push(String::new());
    out.push(format!(
        "Cart summary: {} items, {}",
        reports.summary.total_item_count, reports.summary.total_amount
    ));
    out.join("\n")
}
