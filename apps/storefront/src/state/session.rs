//! # Session State
//!
//! Everything that belongs to one shopper: the cart, the shop page
//! criteria and the banner carousel position.
//!
//! ## Ownership
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Command loop (lib.rs)                                                  │
//! │     owns ──► Catalog        (shared marketplace data)                   │
//! │     owns ──► Session        (this file, one per shopper)                │
//! │     owns ──► ConfigState    (read-only)                                 │
//! │                                                                         │
//! │  Each command borrows only what it needs:                               │
//! │     add_to_cart(&Catalog, &mut Session, args)                           │
//! │     moderate_product(&mut Catalog, args)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No mutex: the loop is single-threaded and hands out `&mut Session`
//! explicitly. A host serving several shoppers keeps one `Session` each.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;
use vibez_catalog::Catalog;
use vibez_core::{BannerPlacement, BannerRotation, Cart, FilterCriteria, Money};

use super::ConfigState;

/// State scoped to one shopping session.
#[derive(Debug, Clone)]
pub struct Session {
    id: Uuid,
    started_at: DateTime<Utc>,
    pub cart: Cart,
    pub criteria: FilterCriteria,
    pub placement: BannerPlacement,
    pub rotation: BannerRotation,
}

impl Session {
    /// Starts a session with an empty cart, default criteria and the
    /// configured banner carousel.
    pub fn new(config: &ConfigState, catalog: &Catalog) -> Self {
        let placement = config.banner_placement;
        Session {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            cart: Cart::new(),
            criteria: Self::default_criteria(config),
            placement,
            rotation: BannerRotation::for_placement(
                catalog.banners().list(),
                placement,
                config.banner_interval(),
            ),
        }
    }

    /// Shop page criteria for a fresh session: everything, featured order,
    /// price slider at the configured maximum.
    pub fn default_criteria(config: &ConfigState) -> FilterCriteria {
        FilterCriteria::default().with_price_range(Money::zero(), config.price_max())
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Rebuilds the carousel, e.g. after moderation changed the live set.
    pub fn reload_banners(&mut self, catalog: &Catalog, placement: BannerPlacement, config: &ConfigState) {
        self.placement = placement;
        self.rotation = BannerRotation::for_placement(
            catalog.banners().list(),
            placement,
            config.banner_interval(),
        );
    }

    pub fn info(&self) -> SessionInfo {
        SessionInfo {
            id: self.id,
            started_at: self.started_at,
            cart_count: self.cart.count(),
        }
    }
}

/// Session summary included in responses.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub cart_count: u64,
}
