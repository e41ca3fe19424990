//! # promo-core: Pure Business Logic for the Promo Engine
//!
//! This crate is the **heart** of the Promo Engine. It contains all
//! discount and coupon business logic as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Promo Engine Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Host Checkout Service                           │   │
//! │  │    cart endpoint ──► price preview ──► coupon box ──► payment   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ injects catalog, borrows inputs        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ promo-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  catalog  │  │  pricing  │  │   │
//! │  │   │  Product  │  │   Money   │  │ RuleCata- │  │ Discount- │  │   │
//! │  │   │  CartItem │  │ RateMath  │  │ log+rules │  │  Engine   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                       ┌───────────┐  ┌───────────┐             │   │
//! │  │                       │  coupon   │  │ validation│             │   │
//! │  │                       │ eligibil- │  │   rules   │             │   │
//! │  │                       │ ity       │  │   checks  │             │   │
//! │  │                       └───────────┘  └───────────┘             │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  Rule tables, carts, and customers come IN; a DiscountedPrice or a     │
//! │  typed rejection goes OUT. Persistence and transport live in hosts.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartItem, CustomerProfile, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - The immutable rule catalog and its config loading
//! - [`pricing`] - The discount cascade engine
//! - [`coupon`] - Coupon eligibility predicates
//! - [`error`] - Domain error types
//! - [`validation`] - Input and rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//! 5. **Injected Config**: The rule catalog is a value the host constructs
//!    once and hands in - no globals, so tests inject whatever rules they need
//!
//! ## Example Usage
//!
//! ```rust
//! use promo_core::{DiscountEngine, RuleCatalog};
//!
//! // The host loads this document from its config store at startup
//! let catalog = RuleCatalog::from_json(
//!     r#"{ "brand_rules": [{ "name": "PUMA 40%", "brand": "PUMA", "rate_bps": 4000 }] }"#,
//! )
//! .unwrap();
//!
//! let engine = DiscountEngine::new(catalog);
//! // engine.calculate_cart_discounts(...) / engine.validate_discount_code(...)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod catalog;
pub mod coupon;
pub mod error;
pub mod money;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use promo_core::Money` instead of
// `use promo_core::money::Money`

pub use catalog::{BankOfferRule, BrandRule, CategoryRule, CouponRule, RuleCatalog};
pub use error::{CatalogError, CoreError, CouponError, ValidationError};
pub use money::Money;
pub use pricing::DiscountEngine;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum lines allowed in a single cart calculation
///
/// ## Business Reason
/// Prevents runaway carts and keeps a single pricing call cheap enough to
/// run on every cart change. Can be made configurable per-tenant in
/// future versions.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart line
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// Configurable per-tenant in future versions.
pub const MAX_ITEM_QUANTITY: i64 = 999;
