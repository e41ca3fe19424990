//! # Error Types
//!
//! Domain-specific error types for promo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  promo-core errors (this file)                                         │
//! │  ├── CoreError        - Engine-level failures (calculate path)         │
//! │  ├── CouponError      - Coupon lookup/eligibility rejections           │
//! │  ├── CatalogError     - Rule catalog construction failures             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Flow: ValidationError ─┐                                              │
//! │        CouponError ─────┴──► CoreError ──► host service ──► caller     │
//! │                                                                         │
//! │  A CouponError is a rejected business decision, not a system fault:    │
//! │  none of these is retried internally and none is fatal.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (brand, category, tier, code)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Coupon Error
// =============================================================================

/// Why a coupon code was rejected.
///
/// Produced by `validate_discount_code` and, for the lookup step only, by
/// `calculate_cart_discounts` when a code is supplied. The message names
/// the offending brand/category/tier so checkout can show it verbatim.
#[derive(Debug, Error)]
pub enum CouponError {
    /// The submitted code does not exist in the catalog.
    #[error("Discount code not found: {code}")]
    CodeNotFound { code: String },

    /// The cart contains an item whose brand the coupon excludes.
    ///
    /// ## User Workflow
    /// ```text
    /// Validate "SUPER69" (excludes Nike)
    ///      │
    ///      ▼
    /// Cart contains a Nike Air Max
    ///      │
    ///      ▼
    /// BrandExcluded { brand: "Nike" }
    ///      │
    ///      ▼
    /// UI shows: "SUPER69 is not valid for brand Nike"
    /// ```
    #[error("Discount code is not valid for brand {brand}")]
    BrandExcluded { brand: String },

    /// The coupon restricts itself to an allow-list of brands and the cart
    /// contains an item outside it.
    #[error("Discount code is not valid for brand {brand}")]
    BrandNotAllowed { brand: String },

    /// The coupon restricts itself to an allow-list of categories and the
    /// cart contains an item outside it.
    #[error("Discount code is not valid for category {category}")]
    CategoryNotAllowed { category: String },

    /// The coupon requires a customer tier the customer does not hold.
    /// Tier comparison is exact (case-insensitive), not ordered.
    #[error("Discount code requires customer tier {required}, customer is {actual}")]
    TierInsufficient { required: String, actual: String },
}

// =============================================================================
// Catalog Error
// =============================================================================

/// Rule catalog construction failures.
///
/// Raised once, at startup, when the host hands the engine a bad rule
/// table. A catalog that constructs successfully can never fail a lookup
/// structurally afterwards.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Two coupon rules share a code (codes are case-insensitive).
    #[error("Duplicate coupon code: {0}")]
    DuplicateCouponCode(String),

    /// The catalog config document did not parse.
    #[error("Invalid catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// A rule field failed validation (rate out of range, empty name, ...).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Core Error
// =============================================================================

/// Engine-level errors for the calculation path.
///
/// `calculate_cart_discounts` has no catalog-lookup step that can miss
/// except the optional coupon, so everything here is either an invalid
/// input or that one lookup. "No discounts applicable" is NOT an error.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Cart has exceeded maximum allowed items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// The supplied coupon code failed lookup.
    #[error("Coupon error: {0}")]
    Coupon(#[from] CouponError),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input or rule configuration doesn't meet
/// requirements. Used for early validation before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., bad characters in a coupon code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for coupon eligibility checks.
pub type CouponResult<T> = Result<T, CouponError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coupon_error_messages() {
        let err = CouponError::BrandExcluded {
            brand: "Nike".to_string(),
        };
        assert_eq!(err.to_string(), "Discount code is not valid for brand Nike");

        let err = CouponError::TierInsufficient {
            required: "gold".to_string(),
            actual: "silver".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Discount code requires customer tier gold, customer is silver"
        );

        let err = CouponError::CodeNotFound {
            code: "FAKECODE".to_string(),
        };
        assert_eq!(err.to_string(), "Discount code not found: FAKECODE");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_coupon_converts_to_core_error() {
        let coupon_err = CouponError::CodeNotFound {
            code: "FAKECODE".to_string(),
        };
        let core_err: CoreError = coupon_err.into();
        assert!(matches!(
            core_err,
            CoreError::Coupon(CouponError::CodeNotFound { .. })
        ));
    }
}
