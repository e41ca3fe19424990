//! # Rule Catalog
//!
//! The static rule tables the engine consults: brand rules, category
//! rules, coupon rules, and bank offers.
//!
//! ## Catalog Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Catalog Lifecycle                                  │
//! │                                                                         │
//! │  Startup (host service)                                                │
//! │  ├── load catalog document from config store / file                    │
//! │  ├── RuleCatalog::from_json(...)  ← validation + normalization HERE   │
//! │  └── DiscountEngine::new(catalog)                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Runtime: read-only                                                    │
//! │  ├── calculate_cart_discounts reads brand/category/coupon/bank rules   │
//! │  ├── validate_discount_code reads coupon rules                         │
//! │  └── safe for unsynchronized concurrent reads (never mutated)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Normalization
//! Brand, category, code, bank, and tier matching is case-insensitive
//! everywhere in the engine. Instead of lower-casing on every comparison,
//! `RuleCatalog::new` canonicalizes every match field ONCE at
//! construction; the engine lower-cases each cart-side value once per item
//! and compares with plain equality. Rule names are display labels and
//! keep their original casing.
//!
//! ## Configuration Document Format
//! ```json
//! {
//!   "brand_rules":    [{ "name": "PUMA 40%", "brand": "PUMA", "rate_bps": 4000 }],
//!   "category_rules": [{ "name": "T-Shirts 10%", "category": "T-shirts", "rate_bps": 1000 }],
//!   "coupon_rules":   [{ "code": "SUPER69", "name": "SUPER69", "rate_bps": 6900,
//!                        "excluded_brands": ["Nike"],
//!                        "allowed_categories": ["t-shirts"],
//!                        "min_customer_tier": "gold" }],
//!   "bank_offers":    [{ "name": "ICICI Bank 10%", "bank": "ICICI", "rate_bps": 1000 }]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use ts_rs::TS;

use crate::error::CatalogError;
use crate::types::DiscountRate;
use crate::validation::{validate_coupon_code, validate_rate_bps, validate_rule_name};

// =============================================================================
// Match Key Normalization
// =============================================================================

/// Canonical form for every case-insensitive comparison in the engine.
///
/// One definition so catalog-side and cart-side values can never disagree
/// on what "equal" means.
#[inline]
pub(crate) fn match_key(s: &str) -> String {
    s.trim().to_lowercase()
}

// =============================================================================
// Brand Rule
// =============================================================================

/// A percentage discount on every item of one brand.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrandRule {
    /// Display label; the breakdown reports under this key.
    pub name: String,

    /// Brand to match. Lower-cased by `RuleCatalog::new`.
    pub brand: String,

    /// Discount rate in basis points (4000 = 40%).
    pub rate_bps: u32,
}

impl BrandRule {
    /// Returns the rate as a DiscountRate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.rate_bps)
    }

    /// Whether this rule applies to an item, given the item's
    /// already-normalized brand key.
    #[inline]
    pub fn matches(&self, brand_key: &str) -> bool {
        self.brand == brand_key
    }
}

// =============================================================================
// Category Rule
// =============================================================================

/// A percentage discount on every item of one category.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CategoryRule {
    /// Display label; the breakdown reports under this key.
    pub name: String,

    /// Category to match. Lower-cased by `RuleCatalog::new`.
    pub category: String,

    /// Discount rate in basis points (1000 = 10%).
    pub rate_bps: u32,
}

impl CategoryRule {
    /// Returns the rate as a DiscountRate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.rate_bps)
    }

    /// Whether this rule applies to an item, given the item's
    /// already-normalized category key.
    #[inline]
    pub fn matches(&self, category_key: &str) -> bool {
        self.category == category_key
    }
}

// =============================================================================
// Coupon Rule
// =============================================================================

/// A customer-submitted code with eligibility restrictions.
///
/// The percentage applies to the whole cart total (after brand and
/// category rules), not per item. Eligibility predicates live in
/// [`crate::coupon`].
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CouponRule {
    /// The code customers type. Unique per catalog, case-insensitive.
    /// Lower-cased by `RuleCatalog::new`.
    pub code: String,

    /// Display label; the breakdown reports under this key.
    pub name: String,

    /// Discount rate in basis points (6900 = 69%).
    pub rate_bps: u32,

    /// Allow-list: when non-empty, every cart brand must be a member.
    #[serde(default)]
    pub allowed_brands: Vec<String>,

    /// Deny-list: no cart brand may be a member.
    #[serde(default)]
    pub excluded_brands: Vec<String>,

    /// Allow-list: when non-empty, every cart category must be a member.
    #[serde(default)]
    pub allowed_categories: Vec<String>,

    /// Required customer tier, compared exactly (case-insensitive).
    /// Lower-cased by `RuleCatalog::new`.
    #[serde(default)]
    pub min_customer_tier: Option<String>,
}

impl CouponRule {
    /// Returns the rate as a DiscountRate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.rate_bps)
    }
}

// =============================================================================
// Bank Offer Rule
// =============================================================================

/// A percentage discount contingent on the paying bank, independent of
/// cart contents.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BankOfferRule {
    /// Display label; the breakdown reports under this key.
    pub name: String,

    /// Bank to match against `PaymentInfo.bank_name`.
    /// Lower-cased by `RuleCatalog::new`.
    pub bank: String,

    /// Discount rate in basis points (500 = 5%).
    pub rate_bps: u32,
}

impl BankOfferRule {
    /// Returns the rate as a DiscountRate.
    #[inline]
    pub fn rate(&self) -> DiscountRate {
        DiscountRate::from_bps(self.rate_bps)
    }

    /// Whether this offer applies, given the already-normalized bank key.
    #[inline]
    pub fn matches(&self, bank_key: &str) -> bool {
        self.bank == bank_key
    }
}

// =============================================================================
// Rule Catalog
// =============================================================================

/// The complete, immutable rule configuration the engine runs against.
///
/// Constructed once at startup and injected into
/// [`crate::pricing::DiscountEngine::new`]; alternate catalogs can be
/// injected in tests. Fields are private so a catalog that validated once
/// stays valid; there is no way to mutate rules afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RuleCatalog {
    brand_rules: Vec<BrandRule>,
    category_rules: Vec<CategoryRule>,
    coupon_rules: Vec<CouponRule>,
    bank_offers: Vec<BankOfferRule>,
}

/// Raw catalog document as it arrives from configuration, before
/// validation and normalization.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    brand_rules: Vec<BrandRule>,
    #[serde(default)]
    category_rules: Vec<CategoryRule>,
    #[serde(default)]
    coupon_rules: Vec<CouponRule>,
    #[serde(default)]
    bank_offers: Vec<BankOfferRule>,
}

impl RuleCatalog {
    /// Builds a catalog from rule tables, validating and normalizing
    /// every rule.
    ///
    /// ## Validation
    /// - every rate within 0..=10000 bps
    /// - every rule name non-empty
    /// - every coupon code non-empty, ≤ 50 chars, alphanumeric/`-`/`_`
    /// - coupon codes unique after case folding
    ///
    /// ## Normalization
    /// Match fields (brands, categories, codes, banks, tiers) are
    /// lower-cased in place; display names are left alone.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::catalog::{BrandRule, RuleCatalog};
    ///
    /// let catalog = RuleCatalog::new(
    ///     vec![BrandRule {
    ///         name: "PUMA 40%".to_string(),
    ///         brand: "PUMA".to_string(),
    ///         rate_bps: 4000,
    ///     }],
    ///     vec![],
    ///     vec![],
    ///     vec![],
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.brand_rules()[0].brand, "puma");
    /// ```
    pub fn new(
        mut brand_rules: Vec<BrandRule>,
        mut category_rules: Vec<CategoryRule>,
        mut coupon_rules: Vec<CouponRule>,
        mut bank_offers: Vec<BankOfferRule>,
    ) -> Result<Self, CatalogError> {
        for rule in &mut brand_rules {
            validate_rule_name(&rule.name)?;
            validate_rate_bps(rule.rate_bps)?;
            rule.brand = match_key(&rule.brand);
        }

        for rule in &mut category_rules {
            validate_rule_name(&rule.name)?;
            validate_rate_bps(rule.rate_bps)?;
            rule.category = match_key(&rule.category);
        }

        let mut seen_codes: HashSet<String> = HashSet::new();
        for rule in &mut coupon_rules {
            validate_coupon_code(&rule.code)?;
            validate_rule_name(&rule.name)?;
            validate_rate_bps(rule.rate_bps)?;

            rule.code = match_key(&rule.code);
            if !seen_codes.insert(rule.code.clone()) {
                return Err(CatalogError::DuplicateCouponCode(rule.code.clone()));
            }

            for brand in &mut rule.allowed_brands {
                *brand = match_key(brand);
            }
            for brand in &mut rule.excluded_brands {
                *brand = match_key(brand);
            }
            for category in &mut rule.allowed_categories {
                *category = match_key(category);
            }
            if let Some(tier) = &mut rule.min_customer_tier {
                *tier = match_key(tier);
            }
        }

        for rule in &mut bank_offers {
            validate_rule_name(&rule.name)?;
            validate_rate_bps(rule.rate_bps)?;
            rule.bank = match_key(&rule.bank);
        }

        Ok(RuleCatalog {
            brand_rules,
            category_rules,
            coupon_rules,
            bank_offers,
        })
    }

    /// Parses and validates a catalog configuration document.
    ///
    /// Pure string-in, catalog-out: reading the document from disk or a
    /// config service is the host's job.
    ///
    /// ## Example
    /// ```rust
    /// use promo_core::catalog::RuleCatalog;
    ///
    /// let catalog = RuleCatalog::from_json(
    ///     r#"{ "brand_rules": [{ "name": "PUMA 40%", "brand": "PUMA", "rate_bps": 4000 }] }"#,
    /// )
    /// .unwrap();
    /// assert_eq!(catalog.brand_rules().len(), 1);
    /// ```
    pub fn from_json(document: &str) -> Result<Self, CatalogError> {
        let doc: CatalogDocument = serde_json::from_str(document)?;
        Self::new(
            doc.brand_rules,
            doc.category_rules,
            doc.coupon_rules,
            doc.bank_offers,
        )
    }

    /// Brand rules in catalog order (the order they apply in).
    #[inline]
    pub fn brand_rules(&self) -> &[BrandRule] {
        &self.brand_rules
    }

    /// Category rules in catalog order.
    #[inline]
    pub fn category_rules(&self) -> &[CategoryRule] {
        &self.category_rules
    }

    /// Coupon rules in catalog order.
    #[inline]
    pub fn coupon_rules(&self) -> &[CouponRule] {
        &self.coupon_rules
    }

    /// Bank offers in catalog order.
    #[inline]
    pub fn bank_offers(&self) -> &[BankOfferRule] {
        &self.bank_offers
    }

    /// Looks up a coupon by code, case-insensitively.
    ///
    /// Both public operations resolve submitted codes through this one
    /// helper.
    pub fn find_coupon(&self, code: &str) -> Option<&CouponRule> {
        let key = match_key(code);
        self.coupon_rules.iter().find(|rule| rule.code == key)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn coupon(code: &str) -> CouponRule {
        CouponRule {
            code: code.to_string(),
            name: code.to_string(),
            rate_bps: 1000,
            allowed_brands: vec![],
            excluded_brands: vec![],
            allowed_categories: vec![],
            min_customer_tier: None,
        }
    }

    #[test]
    fn test_construction_normalizes_match_fields() {
        let catalog = RuleCatalog::new(
            vec![BrandRule {
                name: "PUMA 40%".to_string(),
                brand: " PUMA ".to_string(),
                rate_bps: 4000,
            }],
            vec![CategoryRule {
                name: "T-Shirts 10%".to_string(),
                category: "T-Shirts".to_string(),
                rate_bps: 1000,
            }],
            vec![CouponRule {
                excluded_brands: vec!["Nike".to_string()],
                allowed_categories: vec!["T-shirts".to_string()],
                min_customer_tier: Some("Gold".to_string()),
                ..coupon("SUPER69")
            }],
            vec![BankOfferRule {
                name: "ICICI Bank 10%".to_string(),
                bank: "ICICI".to_string(),
                rate_bps: 1000,
            }],
        )
        .unwrap();

        assert_eq!(catalog.brand_rules()[0].brand, "puma");
        assert_eq!(catalog.category_rules()[0].category, "t-shirts");
        assert_eq!(catalog.bank_offers()[0].bank, "icici");

        let rule = &catalog.coupon_rules()[0];
        assert_eq!(rule.code, "super69");
        assert_eq!(rule.excluded_brands, vec!["nike"]);
        assert_eq!(rule.allowed_categories, vec!["t-shirts"]);
        assert_eq!(rule.min_customer_tier.as_deref(), Some("gold"));

        // Display names keep their casing
        assert_eq!(catalog.brand_rules()[0].name, "PUMA 40%");
    }

    #[test]
    fn test_matches_uses_normalized_keys() {
        let rule = BrandRule {
            name: "PUMA 40%".to_string(),
            brand: "puma".to_string(),
            rate_bps: 4000,
        };
        assert!(rule.matches(&match_key("PUMA")));
        assert!(rule.matches(&match_key("puma ")));
        assert!(!rule.matches(&match_key("Nike")));
    }

    #[test]
    fn test_duplicate_coupon_code_rejected() {
        let result = RuleCatalog::new(
            vec![],
            vec![],
            vec![coupon("SUPER69"), coupon("super69")],
            vec![],
        );
        assert!(matches!(
            result,
            Err(CatalogError::DuplicateCouponCode(code)) if code == "super69"
        ));
    }

    #[test]
    fn test_rate_out_of_range_rejected() {
        let result = RuleCatalog::new(
            vec![BrandRule {
                name: "Too deep".to_string(),
                brand: "puma".to_string(),
                rate_bps: 10001,
            }],
            vec![],
            vec![],
            vec![],
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = RuleCatalog::new(
            vec![],
            vec![],
            vec![],
            vec![BankOfferRule {
                name: "  ".to_string(),
                bank: "icici".to_string(),
                rate_bps: 500,
            }],
        );
        assert!(matches!(result, Err(CatalogError::Validation(_))));
    }

    #[test]
    fn test_find_coupon_is_case_insensitive() {
        let catalog =
            RuleCatalog::new(vec![], vec![], vec![coupon("SUPER69")], vec![]).unwrap();

        assert!(catalog.find_coupon("super69").is_some());
        assert!(catalog.find_coupon("SUPER69").is_some());
        assert!(catalog.find_coupon(" Super69 ").is_some());
        assert!(catalog.find_coupon("FAKECODE").is_none());
    }

    #[test]
    fn test_from_json() {
        let catalog = RuleCatalog::from_json(
            r#"{
                "brand_rules":    [{ "name": "PUMA 40%", "brand": "PUMA", "rate_bps": 4000 }],
                "category_rules": [{ "name": "T-Shirts 10%", "category": "T-shirts", "rate_bps": 1000 }],
                "coupon_rules":   [{ "code": "SUPER69", "name": "SUPER69", "rate_bps": 6900,
                                     "excluded_brands": ["Nike"],
                                     "allowed_categories": ["t-shirts"],
                                     "min_customer_tier": "gold" }],
                "bank_offers":    [{ "name": "ICICI Bank 10%", "bank": "ICICI", "rate_bps": 1000 }]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.brand_rules().len(), 1);
        assert_eq!(catalog.category_rules().len(), 1);
        assert_eq!(catalog.coupon_rules().len(), 1);
        assert_eq!(catalog.bank_offers().len(), 1);
        assert!(catalog.find_coupon("super69").is_some());
    }

    #[test]
    fn test_from_json_missing_sections_default_empty() {
        let catalog = RuleCatalog::from_json("{}").unwrap();
        assert!(catalog.brand_rules().is_empty());
        assert!(catalog.coupon_rules().is_empty());
    }

    #[test]
    fn test_from_json_rejects_malformed_document() {
        assert!(matches!(
            RuleCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }
}
