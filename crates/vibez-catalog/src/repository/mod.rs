//! # Repository Module
//!
//! In-memory repository implementations for the storefront catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern keeps catalog access behind a clean API.       │
//! │                                                                         │
//! │  Storefront Command                                                    │
//! │       │                                                                 │
//! │       │  catalog.products_mut().set_status(5, Approved)                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── by_vendor(&self, vendor_id)                                       │
//! │  ├── create(&mut self, new)                                            │
//! │  └── set_status(&mut self, id, status)                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product> owned by the Catalog (reset on restart)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD, moderation, discounts
//! - [`VendorRepository`](vendor::VendorRepository) - Vendor registration and approval
//! - [`BannerRepository`](banner::BannerRepository) - Banner requests and tracking

pub mod banner;
pub mod product;
pub mod vendor;
