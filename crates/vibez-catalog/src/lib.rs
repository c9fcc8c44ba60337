//! # vibez-catalog: Catalog Data Layer for the Vibez Storefront
//!
//! This crate holds the marketplace data the storefront works on: vendors,
//! products and advertisement banners. Everything lives in memory; every
//! restart starts again from the seed data (or the configured catalog file).
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vibez Data Flow                                  │
//! │                                                                         │
//! │  Storefront Command (browse_catalog)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vibez-catalog (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Catalog    │    │  Repositories │    │    Loader    │  │   │
//! │  │   │  (store.rs)   │    │               │    │ (loader.rs)  │  │   │
//! │  │   │               │    │ ProductRepo   │    │              │  │   │
//! │  │   │ seeded()      │◄───│ VendorRepo    │    │ RawProduct ──┼──┼── JSON
//! │  │   │ load(path)    │    │ BannerRepo    │    │  → Product   │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  vibez-core (filter/sort pipeline, moderation rules)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - The `Catalog` that owns the repositories
//! - [`loader`] - Raw record → typed product boundary
//! - [`seed`] - Built-in marketplace data
//! - [`error`] - Catalog error types
//! - [`repository`] - Repository implementations (product, vendor, banner)
//!
//! ## Usage
//!
//! ```rust
//! use vibez_catalog::Catalog;
//! use vibez_core::ProductStatus;
//!
//! let mut catalog = Catalog::seeded();
//!
//! // Admin approves the pending Summer Dress
//! catalog.products_mut().set_status(5, ProductStatus::Approved).unwrap();
//! assert_eq!(catalog.dashboard().pending_products, 0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod loader;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use loader::RawProduct;
pub use store::Catalog;

// Repository re-exports for convenience
pub use repository::banner::BannerRepository;
pub use repository::product::{NewProduct, ProductRepository, ProductUpdate};
pub use repository::vendor::{NewVendor, VendorRepository};
