//! # Pricing Engine
//!
//! Subtotal, tiered discount, IGV and total, as a pure function of the cart.
//!
//! ## Calculation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  cart entries ──► subtotal = Σ unit_price × qty                         │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               discount_rate(subtotal)      first matching tier wins     │
//! │                 > 100        → 15%                                      │
//! │                 ≥ 50 (≤ 100) → 10%                                      │
//! │                 ≥ 20 (< 50)  →  5%                                      │
//! │                 otherwise    →  0%                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │               discount = subtotal × rate                                │
//! │               tax      = (subtotal − discount) × 18%                    │
//! │               total    = subtotal − discount + tax                      │
//! │                                                                         │
//! │  Nothing is rounded here. Rounding to 2 places happens on display.      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The free functions use the standard Delicia policy. A [`PricingPolicy`]
//! carries the same rules with a configurable tax rate.

use serde::{Deserialize, Serialize};

use crate::cart::Cart;
use crate::money::{serialize_rounded, Money};
use crate::types::Rate;
use crate::IGV_RATE_BPS;

// =============================================================================
// Discount Tiers
// =============================================================================

/// Which subtotals a tier applies to.
///
/// The distinction between `Above` and `AtLeast` matters at the boundary:
/// a subtotal of exactly 100.00 is *not* above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBound {
    /// subtotal > threshold
    Above { cents: i64 },
    /// subtotal ≥ threshold
    AtLeast { cents: i64 },
    /// Always matches; used for the last tier.
    Any,
}

impl TierBound {
    /// Whether `subtotal` falls in this bound.
    pub fn admits(&self, subtotal: Money) -> bool {
        match *self {
            TierBound::Above { cents } => subtotal > Money::from_cents(cents),
            TierBound::AtLeast { cents } => subtotal >= Money::from_cents(cents),
            TierBound::Any => true,
        }
    }
}

/// One row of the discount table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTier {
    pub bound: TierBound,
    pub rate: Rate,
}

/// The Delicia discount table, evaluated top-down.
pub const STANDARD_TIERS: [DiscountTier; 4] = [
    DiscountTier {
        bound: TierBound::Above { cents: 100_00 },
        rate: Rate::from_bps(1500),
    },
    DiscountTier {
        bound: TierBound::AtLeast { cents: 50_00 },
        rate: Rate::from_bps(1000),
    },
    DiscountTier {
        bound: TierBound::AtLeast { cents: 20_00 },
        rate: Rate::from_bps(500),
    },
    DiscountTier {
        bound: TierBound::Any,
        rate: Rate::zero(),
    },
];

fn rate_for(tiers: &[DiscountTier], subtotal: Money) -> Rate {
    tiers
        .iter()
        .find(|tier| tier.bound.admits(subtotal))
        .map(|tier| tier.rate)
        .unwrap_or_default()
}

// =============================================================================
// Free Functions (standard policy)
// =============================================================================

/// Sum of line totals; zero for an empty cart.
pub fn subtotal(cart: &Cart) -> Money {
    cart.entries().iter().map(|e| e.line_total()).sum()
}

/// Discount rate for a subtotal under the standard tiers.
pub fn discount_rate(subtotal: Money) -> Rate {
    rate_for(&STANDARD_TIERS, subtotal)
}

/// `subtotal × discount_rate(subtotal)`, exact.
pub fn discount_amount(subtotal: Money) -> Money {
    subtotal.apply_rate(discount_rate(subtotal))
}

/// IGV on the discounted base: `(subtotal − discount) × 18%`, exact.
pub fn tax_amount(subtotal: Money, discount: Money) -> Money {
    (subtotal - discount).apply_rate(Rate::from_bps(IGV_RATE_BPS))
}

/// `subtotal − discount + tax`.
pub fn total(subtotal: Money, discount: Money, tax: Money) -> Money {
    subtotal - discount + tax
}

// =============================================================================
// Pricing Policy
// =============================================================================

/// Discount tiers plus tax rate.
///
/// ## Configuration
/// The tiers are the store's and do not change; the tax rate may be
/// overridden by configuration (`DELICIA_TAX_RATE`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    pub tiers: Vec<DiscountTier>,
    pub tax_rate: Rate,
}

impl PricingPolicy {
    /// Standard tiers and 18% IGV.
    pub fn standard() -> Self {
        PricingPolicy {
            tiers: STANDARD_TIERS.to_vec(),
            tax_rate: Rate::from_bps(IGV_RATE_BPS),
        }
    }

    /// Same tiers, different tax rate.
    pub fn with_tax_rate(mut self, tax_rate: Rate) -> Self {
        self.tax_rate = tax_rate;
        self
    }

    pub fn discount_rate(&self, subtotal: Money) -> Rate {
        rate_for(&self.tiers, subtotal)
    }

    pub fn discount_amount(&self, subtotal: Money) -> Money {
        subtotal.apply_rate(self.discount_rate(subtotal))
    }

    pub fn tax_amount(&self, subtotal: Money, discount: Money) -> Money {
        (subtotal - discount).apply_rate(self.tax_rate)
    }

    /// Prices a cart.
    pub fn price(&self, cart: &Cart) -> PricingSnapshot {
        self.price_subtotal(subtotal(cart))
    }

    /// Prices an already known subtotal.
    pub fn price_subtotal(&self, subtotal: Money) -> PricingSnapshot {
        let discount_rate = self.discount_rate(subtotal);
        let discount_amount = subtotal.apply_rate(discount_rate);
        let tax_amount = self.tax_amount(subtotal, discount_amount);

        PricingSnapshot {
            subtotal,
            discount_rate,
            discount_amount,
            tax_rate: self.tax_rate,
            tax_amount,
            total: total(subtotal, discount_amount, tax_amount),
        }
    }
}

impl Default for PricingPolicy {
    fn default() -> Self {
        PricingPolicy::standard()
    }
}

// =============================================================================
// Pricing Snapshot
// =============================================================================

/// Everything the ticket needs, derived from the cart on demand.
///
/// Never cached: recompute after every cart change. Fields keep full
/// precision; serialized amounts are rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingSnapshot {
    #[serde(serialize_with = "serialize_rounded")]
    pub subtotal: Money,
    pub discount_rate: Rate,
    #[serde(serialize_with = "serialize_rounded")]
    pub discount_amount: Money,
    pub tax_rate: Rate,
    #[serde(serialize_with = "serialize_rounded")]
    pub tax_amount: Money,
    #[serde(serialize_with = "serialize_rounded")]
    pub total: Money,
}

impl PricingSnapshot {
    pub fn from_cart(cart: &Cart, policy: &PricingPolicy) -> Self {
        policy.price(cart)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::{Catalog, Product};

    fn cents(c: i64) -> Money {
        Money::from_cents(c)
    }

    #[test]
    fn test_discount_tier_boundaries() {
        assert_eq!(discount_rate(cents(100_01)), Rate::from_bps(1500));
        assert_eq!(discount_rate(cents(100_00)), Rate::from_bps(1000));
        assert_eq!(discount_rate(cents(50_00)), Rate::from_bps(1000));
        assert_eq!(discount_rate(cents(49_99)), Rate::from_bps(500));
        assert_eq!(discount_rate(cents(20_00)), Rate::from_bps(500));
        assert_eq!(discount_rate(cents(19_99)), Rate::zero());
        assert_eq!(discount_rate(Money::zero()), Rate::zero());
    }

    #[test]
    fn test_boundary_just_above_100_with_fractional_cents() {
        let just_above = Money::from_decimal("100.001".parse().unwrap());
        assert_eq!(discount_rate(just_above), Rate::from_bps(1500));
    }

    #[test]
    fn test_small_cart_end_to_end() {
        let catalog = Catalog::seed();
        let mut cart = Cart::new();
        cart.add(catalog.lookup("pan").unwrap(), 2).unwrap();
        cart.add(catalog.lookup("queso").unwrap(), 1).unwrap();

        let sub = subtotal(&cart);
        let disc = discount_amount(sub);
        let tax = tax_amount(sub, disc);

        assert_eq!(sub, cents(12_50));
        assert_eq!(disc, Money::zero());
        assert_eq!(tax, cents(2_25));
        assert_eq!(total(sub, disc, tax), cents(14_75));
    }

    #[test]
    fn test_subtotal_150_end_to_end() {
        let mut cart = Cart::new();
        cart.add(&Product::new(1, "torta", 75_00, "pasteleria"), 2).unwrap();

        let snapshot = PricingSnapshot::from_cart(&cart, &PricingPolicy::standard());

        assert_eq!(snapshot.subtotal, cents(150_00));
        assert_eq!(snapshot.discount_rate, Rate::from_bps(1500));
        assert_eq!(snapshot.discount_amount, cents(22_50));
        assert_eq!(snapshot.subtotal - snapshot.discount_amount, cents(127_50));
        assert_eq!(snapshot.tax_amount, cents(22_95));
        assert_eq!(snapshot.total, cents(150_45));
    }

    #[test]
    fn test_empty_cart_prices_to_zero() {
        let snapshot = PricingPolicy::standard().price(&Cart::new());

        assert!(snapshot.subtotal.is_zero());
        assert!(snapshot.discount_amount.is_zero());
        assert!(snapshot.tax_amount.is_zero());
        assert!(snapshot.total.is_zero());
    }

    #[test]
    fn test_no_intermediate_rounding() {
        let snapshot = PricingPolicy::standard().price_subtotal(cents(24_68));
        assert_eq!(
            snapshot.discount_amount,
            Money::from_decimal("1.234".parse().unwrap())
        );
        assert_eq!(snapshot.discount_amount.to_string(), "S/1.23");

        let snapshot = PricingPolicy::standard().price_subtotal(cents(12_34));
        assert_eq!(snapshot.discount_amount, Money::zero());

        // 23.45 × 5% = 1.1725; base 22.2775; IGV 4.00995; total 26.28745
        let snapshot = PricingPolicy::standard().price_subtotal(cents(23_45));
        assert_eq!(snapshot.discount_amount.amount().to_string(), "1.1725");
        assert_eq!(
            snapshot.total,
            Money::from_decimal("26.28745".parse().unwrap())
        );
        assert_eq!(snapshot.total.to_string(), "S/26.29");
    }

    #[test]
    fn test_policy_with_custom_tax_rate() {
        let policy = PricingPolicy::standard().with_tax_rate(Rate::from_bps(1000));
        let snapshot = policy.price_subtotal(cents(10_00));

        assert_eq!(snapshot.tax_rate, Rate::from_bps(1000));
        assert_eq!(snapshot.tax_amount, cents(1_00));
        assert_eq!(snapshot.total, cents(11_00));
    }

    #[test]
    fn test_policy_matches_free_functions() {
        let policy = PricingPolicy::default();
        for c in [0, 19_99, 20_00, 49_99, 50_00, 100_00, 100_01, 150_00] {
            let sub = cents(c);
            let snapshot = policy.price_subtotal(sub);
            let disc = discount_amount(sub);
            let tax = tax_amount(sub, disc);
            assert_eq!(snapshot.discount_amount, disc);
            assert_eq!(snapshot.tax_amount, tax);
            assert_eq!(snapshot.total, total(sub, disc, tax));
        }
    }

    #[test]
    fn test_snapshot_serializes_amounts_as_strings() {
        let snapshot = PricingPolicy::standard().price_subtotal(cents(12_50));
        let json = serde_json::to_value(snapshot).unwrap();

        assert_eq!(json["subtotal"], "12.50");
        assert_eq!(json["discount_rate"], 0);
        assert_eq!(json["tax_rate"], 1800);
    }

    proptest! {
        #[test]
        fn prop_subtotal_is_sum_of_lines(ops in prop::collection::vec((1u32..10, 1i64..100), 0..30)) {
            let catalog = Catalog::seed();
            let mut cart = Cart::new();
            for (id, qty) in ops {
                cart.add(catalog.lookup(id).unwrap(), qty).unwrap();
            }

            let expected: i64 = cart
                .entries()
                .iter()
                .map(|e| e.unit_price_cents * e.quantity)
                .sum();
            prop_assert_eq!(subtotal(&cart), cents(expected));
        }

        #[test]
        fn prop_total_identity(c in 0i64..1_000_000) {
            let sub = cents(c);
            let disc = discount_amount(sub);
            let tax = tax_amount(sub, disc);
            let t = total(sub, disc, tax);

            prop_assert!(disc <= sub);
            prop_assert_eq!(t - tax + disc, sub);
            prop_assert!(!t.is_negative());
        }
    }
}
