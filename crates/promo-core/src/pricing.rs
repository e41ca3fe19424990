//! # Pricing Engine
//!
//! The discount cascade and the coupon validation entry point.
//!
//! ## The Cascade
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Discount Cascade                                     │
//! │                                                                         │
//! │  PER ITEM (working price starts at unit price × quantity):             │
//! │                                                                         │
//! │    line total ──► every matching brand rule ──► every matching         │
//! │                   (catalog order)               category rule          │
//! │                                                                         │
//! │    Each rule takes its percentage of the price LEFT by the previous    │
//! │    rule - discounts compound, they do not stack on the subtotal        │
//! │                                                                         │
//! │  PER CART (after all items are summed):                                │
//! │                                                                         │
//! │    cart total ──► the ONE submitted coupon ──► every matching          │
//! │                   (if any, by code)            bank offer              │
//! │                                                                         │
//! │  Every amount removed is recorded under the rule's display name,       │
//! │  summed across items that hit the same rule.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//! ```rust
//! use promo_core::catalog::{BrandRule, CategoryRule, RuleCatalog};
//! use promo_core::pricing::DiscountEngine;
//! use promo_core::types::{BrandTier, CartItem, CustomerProfile, Product};
//!
//! let catalog = RuleCatalog::new(
//!     vec![BrandRule { name: "PUMA 40%".into(), brand: "PUMA".into(), rate_bps: 4000 }],
//!     vec![CategoryRule { name: "T-Shirts 10%".into(), category: "T-shirts".into(), rate_bps: 1000 }],
//!     vec![],
//!     vec![],
//! )
//! .unwrap();
//! let engine = DiscountEngine::new(catalog);
//!
//! let cart = vec![CartItem {
//!     product: Product {
//!         id: "1".into(),
//!         brand: "PUMA".into(),
//!         brand_tier: BrandTier::Regular,
//!         category: "T-shirts".into(),
//!         base_price_cents: 1000,
//!     },
//!     quantity: 1,
//!     size: "M".into(),
//! }];
//! let customer = CustomerProfile { id: "cust-123".into(), tier: "gold".into() };
//!
//! let priced = engine
//!     .calculate_cart_discounts(&cart, &customer, None, None)
//!     .unwrap();
//! // 1000 → ×0.60 = 600 (brand) → ×0.90 = 540 (category)
//! assert_eq!(priced.original_price_cents, 1000);
//! assert_eq!(priced.final_price_cents, 540);
//! ```
//!
//! ## Concurrency
//! Both operations are pure, synchronous reads of an immutable catalog
//! and borrowed inputs; a single engine can be shared across threads
//! freely. There is nothing to lock, retry, or cancel.

use std::collections::BTreeMap;

use crate::catalog::{match_key, RuleCatalog};
use crate::error::{CoreError, CoreResult, CouponError, CouponResult};
use crate::money::Money;
use crate::types::{CartItem, CustomerProfile, DiscountRate, DiscountedPrice, PaymentInfo};
use crate::validation::{validate_price_cents, validate_quantity};
use crate::MAX_CART_ITEMS;

/// Outcome marker on every successful calculation.
const APPLIED_MESSAGE: &str = "Discounts applied successfully";

// =============================================================================
// Discount Engine
// =============================================================================

/// Applies the rule catalog to carts and validates submitted coupon codes.
///
/// Owns its catalog: construct one engine per catalog at startup and share
/// it (`&self` everywhere, no interior mutability, so the engine is
/// `Send + Sync` by construction).
#[derive(Debug, Clone)]
pub struct DiscountEngine {
    catalog: RuleCatalog,
}

impl DiscountEngine {
    /// Creates an engine over a validated catalog.
    #[inline]
    pub fn new(catalog: RuleCatalog) -> Self {
        DiscountEngine { catalog }
    }

    /// The catalog this engine prices against.
    #[inline]
    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    /// Prices a cart through the full discount cascade.
    ///
    /// ## Arguments
    /// * `cart_items` - the cart; empty is fine and prices to zero
    /// * `customer` - accepted for signature stability with
    ///   [`validate_discount_code`](Self::validate_discount_code); no
    ///   current rule reads it on the calculation path
    /// * `payment_info` - `None` disables bank offers entirely
    /// * `coupon_code` - the single, already-validated code to apply, if
    ///   the customer submitted one. Eligibility is NOT re-checked here;
    ///   run [`validate_discount_code`](Self::validate_discount_code)
    ///   first. An unknown code fails with `CodeNotFound`.
    ///
    /// ## Errors
    /// Only invalid input fails: oversized cart, quantity < 1, negative
    /// base price, or an unknown coupon code. A cart no rule matches is a
    /// success with `final == original`.
    ///
    /// ## Guarantees
    /// - `final_price <= original_price` always
    /// - the breakdown names only rules that removed a non-zero amount,
    ///   accumulated across items
    pub fn calculate_cart_discounts(
        &self,
        cart_items: &[CartItem],
        _customer: &CustomerProfile,
        payment_info: Option<&PaymentInfo>,
        coupon_code: Option<&str>,
    ) -> CoreResult<DiscountedPrice> {
        if cart_items.len() > MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }
        for item in cart_items {
            validate_quantity(item.quantity)?;
            validate_price_cents(item.product.base_price_cents)?;
        }

        let mut original_price = Money::zero();
        let mut final_price = Money::zero();
        let mut applied: BTreeMap<String, i64> = BTreeMap::new();

        for item in cart_items {
            let base = item.line_total();
            let brand_key = match_key(&item.product.brand);
            let category_key = match_key(&item.product.category);

            // Brand rules compound on the line total, category rules on
            // whatever the brand rules left over.
            let mut working = base;
            for rule in self.catalog.brand_rules() {
                if rule.matches(&brand_key) {
                    working = apply_and_record(&mut applied, working, &rule.name, rule.rate());
                }
            }
            for rule in self.catalog.category_rules() {
                if rule.matches(&category_key) {
                    working = apply_and_record(&mut applied, working, &rule.name, rule.rate());
                }
            }

            original_price += base;
            final_price += working;
        }

        // The one submitted coupon applies to the aggregate, not per item.
        if let Some(code) = coupon_code {
            let rule = self
                .catalog
                .find_coupon(code)
                .ok_or_else(|| CouponError::CodeNotFound {
                    code: code.to_string(),
                })?;
            final_price = apply_and_record(&mut applied, final_price, &rule.name, rule.rate());
        }

        // Bank offers need payment info AND a bank name; a missing bank
        // name matches nothing.
        if let Some(info) = payment_info {
            if let Some(bank) = info.bank_name() {
                let bank_key = match_key(bank);
                for offer in self.catalog.bank_offers() {
                    if offer.matches(&bank_key) {
                        final_price =
                            apply_and_record(&mut applied, final_price, &offer.name, offer.rate());
                    }
                }
            }
        }

        Ok(DiscountedPrice {
            original_price_cents: original_price.cents(),
            final_price_cents: final_price.cents(),
            applied_discounts: applied,
            message: APPLIED_MESSAGE.to_string(),
        })
    }

    /// Checks whether a submitted code exists and is eligible for this
    /// cart and customer.
    ///
    /// Independent of [`calculate_cart_discounts`](Self::calculate_cart_discounts):
    /// passing here does not reserve or apply the code, and the two calls
    /// are not transactionally linked.
    ///
    /// ## Errors
    /// - `CodeNotFound` - the code is not in the catalog
    /// - `BrandExcluded` / `BrandNotAllowed` / `CategoryNotAllowed` - a
    ///   cart item violates the coupon's restrictions
    /// - `TierInsufficient` - the customer's tier differs from the
    ///   required one
    pub fn validate_discount_code(
        &self,
        code: &str,
        cart_items: &[CartItem],
        customer: &CustomerProfile,
    ) -> CouponResult<()> {
        let rule = self
            .catalog
            .find_coupon(code)
            .ok_or_else(|| CouponError::CodeNotFound {
                code: code.to_string(),
            })?;

        rule.check_eligibility(cart_items, customer)
    }
}

/// Applies one rule to a working price: computes the discount, records it
/// under the rule's name when non-zero, and returns the remaining price.
///
/// Every rule kind (brand, category, coupon, bank) funnels through here,
/// so rounding and accumulation behave identically across the cascade.
fn apply_and_record(
    applied: &mut BTreeMap<String, i64>,
    price: Money,
    rule_name: &str,
    rate: DiscountRate,
) -> Money {
    let off = price.discount_amount(rate);
    if !off.is_zero() {
        *applied.entry(rule_name.to_string()).or_insert(0) += off.cents();
    }
    price - off
}

// =============================================================================
// Unit Tests
// =============================================================================
