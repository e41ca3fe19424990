//! # Domain Types
//!
//! Core domain types used throughout the Promo Engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartItem     │   │ CustomerProfile │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  product        │   │  id             │       │
//! │  │  brand          │   │  quantity       │   │  tier           │       │
//! │  │  category       │   │  size           │   │                 │       │
//! │  │  base_price     │   └─────────────────┘   └─────────────────┘       │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  DiscountRate   │   │   BrandTier     │   │  PaymentInfo    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  bps (u32)      │   │  Premium        │   │  method         │       │
//! │  │  4000 = 40%     │   │  Regular        │   │  bank_name?     │       │
//! │  └─────────────────┘   │  Budget         │   │  card_type?     │       │
//! │                        └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lifecycle
//! Everything here is a value object: built by the caller for one
//! calculation or validation call and discarded afterwards. Nothing in
//! this module is mutated by the engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Discount Rate
// =============================================================================

/// Discount rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 4000 bps = 40% (e.g., a seasonal brand promotion)
///
/// Rates never travel as floats; `from_percentage` exists for config
/// ergonomics and rounds once, at the edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountRate(u32);

impl DiscountRate {
    /// Creates a discount rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        DiscountRate(bps)
    }

    /// Creates a discount rate from a percentage (for convenience).
    pub fn from_percentage(pct: f64) -> Self {
        DiscountRate((pct * 100.0).round() as u32)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero discount rate.
    #[inline]
    pub const fn zero() -> Self {
        DiscountRate(0)
    }

    /// Checks if the rate is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Default for DiscountRate {
    fn default() -> Self {
        DiscountRate::zero()
    }
}

// =============================================================================
// Brand Tier
// =============================================================================

/// Market positioning of a product's brand.
///
/// Informational in the current rules: no rule predicate reads it, but it
/// rides along with the product so hosts can segment carts without a
/// second lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BrandTier {
    /// High-end brands.
    Premium,
    /// Mainstream brands.
    Regular,
    /// Value brands.
    Budget,
}

impl Default for BrandTier {
    fn default() -> Self {
        BrandTier::Regular
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product as it appears inside a cart line.
///
/// Brand and category are free text; the engine matches them against the
/// catalog case-insensitively, so `"PUMA"` and `"puma"` are the same brand.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Business identifier supplied by the host (not necessarily a UUID).
    pub id: String,

    /// Brand name, matched case-insensitively against brand rules.
    pub brand: String,

    /// Market tier of the brand (informational).
    pub brand_tier: BrandTier,

    /// Category name, matched case-insensitively against category rules.
    pub category: String,

    /// Undiscounted unit price in cents. Never negative.
    pub base_price_cents: i64,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn base_price(&self) -> Money {
        Money::from_cents(self.base_price_cents)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// A line in the customer's cart.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    /// The product being purchased.
    pub product: Product,

    /// Units of the product. Must be at least 1.
    pub quantity: i64,

    /// Size variant ("M", "L", "42", ...). Informational.
    pub size: String,
}

impl CartItem {
    /// Line subtotal before any discount (unit price × quantity).
    ///
    /// The cascade for this item starts from this amount.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.base_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Customer Profile
// =============================================================================

/// The customer the cart belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerProfile {
    /// Business identifier supplied by the host.
    pub id: String,

    /// Loyalty tier ("gold", "silver", ...), compared case-insensitively
    /// against a coupon's required tier.
    pub tier: String,
}

// =============================================================================
// Payment Info
// =============================================================================

/// How the customer intends to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Credit or debit card.
    Card,
    /// Direct bank transfer.
    NetBanking,
}

/// Payment details, supplied only when the customer has picked a method.
///
/// Absent payment info disables bank offers entirely; present info with no
/// bank name matches no offer.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentInfo {
    /// Selected payment method.
    pub method: PaymentMethod,

    /// Issuing bank, if known ("ICICI", "HDFC", ...).
    pub bank_name: Option<String>,

    /// Card type ("credit", "debit"), if known. Informational.
    pub card_type: Option<String>,
}

impl PaymentInfo {
    /// The bank name used for offer matching, if any.
    #[inline]
    pub fn bank_name(&self) -> Option<&str> {
        self.bank_name.as_deref()
    }
}

// =============================================================================
// Discounted Price
// =============================================================================

/// The result of a cart calculation: what the cart cost, what it costs
/// now, and which rule removed how much.
///
/// ## Invariants
/// - `final_price_cents <= original_price_cents`
/// - every breakdown amount is positive; rules that rounded to zero for
///   the whole cart are omitted
/// - amounts under one rule name accumulate across items, they are never
///   overwritten
///
/// The breakdown is a `BTreeMap` so iteration and JSON serialization are
/// deterministic.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiscountedPrice {
    /// Sum of undiscounted line totals, in cents.
    pub original_price_cents: i64,

    /// Price after the full cascade, in cents.
    pub final_price_cents: i64,

    /// Rule name → cumulative cents that rule removed.
    pub applied_discounts: BTreeMap<String, i64>,

    /// Human-readable outcome marker for the checkout UI.
    pub message: String,
}

impl DiscountedPrice {
    /// Returns the original price as Money.
    #[inline]
    pub fn original_price(&self) -> Money {
        Money::from_cents(self.original_price_cents)
    }

    /// Returns the final price as Money.
    #[inline]
    pub fn final_price(&self) -> Money {
        Money::from_cents(self.final_price_cents)
    }

    /// The amount a named rule removed, if it contributed at all.
    #[inline]
    pub fn applied_discount(&self, rule_name: &str) -> Option<Money> {
        self.applied_discounts
            .get(rule_name)
            .map(|cents| Money::from_cents(*cents))
    }

    /// Total amount removed by the whole cascade.
    #[inline]
    pub fn total_savings(&self) -> Money {
        self.original_price() - self.final_price()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discount_rate_from_bps() {
        let rate = DiscountRate::from_bps(4000);
        assert_eq!(rate.bps(), 4000);
        assert!((rate.percentage() - 40.0).abs() < 0.001);
    }

    #[test]
    fn test_discount_rate_from_percentage() {
        let rate = DiscountRate::from_percentage(40.0);
        assert_eq!(rate.bps(), 4000);

        let fractional = DiscountRate::from_percentage(8.25);
        assert_eq!(fractional.bps(), 825);
    }

    #[test]
    fn test_brand_tier_default() {
        assert_eq!(BrandTier::default(), BrandTier::Regular);
    }

    #[test]
    fn test_line_total() {
        let item = CartItem {
            product: Product {
                id: "1".to_string(),
                brand: "PUMA".to_string(),
                brand_tier: BrandTier::Regular,
                category: "T-shirts".to_string(),
                base_price_cents: 299,
            },
            quantity: 3,
            size: "M".to_string(),
        };
        assert_eq!(item.line_total().cents(), 897);
    }

    #[test]
    fn test_payment_info_bank_name() {
        let with_bank = PaymentInfo {
            method: PaymentMethod::Card,
            bank_name: Some("ICICI".to_string()),
            card_type: None,
        };
        assert_eq!(with_bank.bank_name(), Some("ICICI"));

        let without_bank = PaymentInfo {
            method: PaymentMethod::Cash,
            bank_name: None,
            card_type: None,
        };
        assert_eq!(without_bank.bank_name(), None);
    }

    #[test]
    fn test_discounted_price_accessors() {
        let mut applied = BTreeMap::new();
        applied.insert("PUMA 40%".to_string(), 400);

        let result = DiscountedPrice {
            original_price_cents: 1000,
            final_price_cents: 600,
            applied_discounts: applied,
            message: "ok".to_string(),
        };

        assert_eq!(result.original_price().cents(), 1000);
        assert_eq!(result.final_price().cents(), 600);
        assert_eq!(result.total_savings().cents(), 400);
        assert_eq!(result.applied_discount("PUMA 40%").unwrap().cents(), 400);
        assert!(result.applied_discount("Nike 30%").is_none());
    }
}
