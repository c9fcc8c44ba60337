//! # vibez-core: Pure Business Logic for the Vibez Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart,
//! the catalog pipeline and the marketplace rules as pure functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vibez Architecture                               │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Frontend (SPA)                               │   │
//! │  │    Shop Page ──► Product Card ──► Cart Drawer ──► Dashboards   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ JSON commands                          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    browse_catalog, add_to_cart, moderate_product, etc.         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ vibez-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │  catalog  │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Filter   │  │   │
//! │  │   │  Vendor   │  │  TaxRate  │  │    GST    │  │   Sort    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │ discount  │  │  banner   │  │ dashboard │  │ validation│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vibez-catalog (Data Layer)                      │   │
//! │  │          Seeded catalog, record loading, repositories           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Vendor, Category, etc.)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The shopping cart and its GST breakdown
//! - [`catalog`] - Shop page filtering and sorting
//! - [`discount`] - Vendor discounts
//! - [`banner`] - Advertisement banners and the carousel
//! - [`dashboard`] - Admin and vendor dashboard counts
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, derived values are
//!    recomputed on every read
//! 2. **No I/O**: file system, network and logging live in the outer crates
//! 3. **Integer Money**: prices are paise (i64); tax is an exact decimal
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use vibez_core::{Cart, Money};
//!
//! let mut cart = Cart::new();
//! cart.add_item(1, "vendor1", "M", 2, Money::from_rupees(499)).unwrap();
//! cart.add_item(1, "vendor1", "L", 1, Money::from_rupees(499)).unwrap();
//!
//! assert_eq!(cart.count(), 3);
//! assert_eq!(cart.subtotal(), Money::from_rupees(1497));
//! assert_eq!(cart.tax_breakdown().cgst, Decimal::new(13473, 2)); // ₹134.73
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod banner;
pub mod cart;
pub mod catalog;
pub mod dashboard;
pub mod discount;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use vibez_core::Money` instead of
// `use vibez_core::money::Money`

pub use banner::{Banner, BannerPackage, BannerPlacement, BannerRotation, BannerStatus};
pub use cart::{Cart, CartLineItem, CartTotals, GstBreakdown, LineKey, CGST_RATE, SGST_RATE};
pub use catalog::{filter_and_sort, Criterion, FilterCriteria, SortKey};
pub use dashboard::{DashboardStats, VendorStats};
pub use discount::{Discount, DiscountKind};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a customer may request in one action.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
/// The cart itself saturates rather than failing.
pub const MAX_ITEM_QUANTITY: i64 = 999;
