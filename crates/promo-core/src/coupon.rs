//! # Coupon Eligibility
//!
//! The predicate checks a cart and customer must pass for a coupon code
//! to be accepted. Lookup lives on the catalog; the checks here are pure
//! functions of one rule plus the caller's cart and customer.
//!
//! ## Evaluation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Eligibility Evaluation                                │
//! │                                                                         │
//! │  For EACH cart item (short-circuits on the first violation):           │
//! │       │                                                                 │
//! │       ├── brand on the deny-list?          → BrandExcluded             │
//! │       ├── allow-list set, brand outside?   → BrandNotAllowed           │
//! │       └── category allow-list set,                                     │
//! │           category outside?                → CategoryNotAllowed        │
//! │                                                                         │
//! │  Then ONCE for the customer:                                           │
//! │       └── required tier set, customer tier                             │
//! │           differs (exact, case-folded)?    → TierInsufficient          │
//! │                                                                         │
//! │  All pass → Ok(())                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Eligibility never mutates the cart, the customer, or the catalog, and
//! passing it guarantees nothing about a later calculation call; the two
//! operations are not transactionally linked.

use crate::catalog::{match_key, CouponRule};
use crate::error::{CouponError, CouponResult};
use crate::types::{CartItem, CustomerProfile};

impl CouponRule {
    /// Checks whether this coupon may be applied to the given cart and
    /// customer, short-circuiting on the first violation.
    ///
    /// Errors name the offending brand/category in the caller's original
    /// casing so checkout can echo them back verbatim.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::catalog::CouponRule;
    /// use promo_core::error::CouponError;
    /// use promo_core::types::{BrandTier, CartItem, CustomerProfile, Product};
    ///
    /// let rule = CouponRule {
    ///     code: "super69".to_string(),
    ///     name: "SUPER69".to_string(),
    ///     rate_bps: 6900,
    ///     allowed_brands: vec![],
    ///     excluded_brands: vec!["nike".to_string()],
    ///     allowed_categories: vec![],
    ///     min_customer_tier: None,
    /// };
    ///
    /// let cart = vec![CartItem {
    ///     product: Product {
    ///         id: "2".to_string(),
    ///         brand: "Nike".to_string(),
    ///         brand_tier: BrandTier::Premium,
    ///         category: "T-shirts".to_string(),
    ///         base_price_cents: 2000,
    ///     },
    ///     quantity: 1,
    ///     size: "L".to_string(),
    /// }];
    /// let customer = CustomerProfile {
    ///     id: "cust-123".to_string(),
    ///     tier: "gold".to_string(),
    /// };
    ///
    /// let err = rule.check_eligibility(&cart, &customer).unwrap_err();
    /// assert!(matches!(err, CouponError::BrandExcluded { brand } if brand == "Nike"));
    /// ```
    pub fn check_eligibility(
        &self,
        cart_items: &[CartItem],
        customer: &CustomerProfile,
    ) -> CouponResult<()> {
        for item in cart_items {
            let brand_key = match_key(&item.product.brand);
            let category_key = match_key(&item.product.category);

            // Deny-list wins over everything else
            if self.excluded_brands.contains(&brand_key) {
                return Err(CouponError::BrandExcluded {
                    brand: item.product.brand.clone(),
                });
            }

            // Brand allow-list, when present, must contain every cart brand
            if !self.allowed_brands.is_empty() && !self.allowed_brands.contains(&brand_key) {
                return Err(CouponError::BrandNotAllowed {
                    brand: item.product.brand.clone(),
                });
            }

            // Category allow-list, when present, must contain every cart category
            if !self.allowed_categories.is_empty()
                && !self.allowed_categories.contains(&category_key)
            {
                return Err(CouponError::CategoryNotAllowed {
                    category: item.product.category.clone(),
                });
            }
        }

        // Tier requirement is exact-match, evaluated once for the customer.
        // Whether tiers form an order ("silver counts for gold carts"?) is a
        // product decision this engine does not make.
        if let Some(required) = &self.min_customer_tier {
            if match_key(&customer.tier) != *required {
                return Err(CouponError::TierInsufficient {
                    required: required.clone(),
                    actual: customer.tier.clone(),
                });
            }
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
