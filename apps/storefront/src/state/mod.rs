//! # State Management
//!
//! Three focused state types, each borrowed only by the commands that need
//! it:
//!
//! - [`ConfigState`] - read-only configuration
//! - [`Session`] - one shopper's cart, criteria and banner carousel
//! - `vibez_catalog::Catalog` - the marketplace data
//!
//! [`Storefront`] bundles them for the command loop.

mod config;
mod session;

pub use config::{ConfigError, ConfigState};
pub use session::{Session, SessionInfo};

use chrono::{Local, NaiveDate};
use tracing::info;
use vibez_catalog::{Catalog, CatalogResult};

/// Everything the command loop owns.
#[derive(Debug, Clone)]
pub struct Storefront {
    pub config: ConfigState,
    pub catalog: Catalog,
    pub session: Session,
}

impl Storefront {
    /// Loads the configured catalog (or the seed data) and opens a session.
    pub fn open(config: ConfigState) -> CatalogResult<Self> {
        let catalog = match &config.catalog_path {
            Some(path) => Catalog::load(path)?,
            None => Catalog::seeded(),
        };
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: ConfigState, catalog: Catalog) -> Self {
        let session = Session::new(&config, &catalog);
        info!(session_id = %session.id(), store = %config.store_name, "Session started");
        Storefront {
            config,
            catalog,
            session,
        }
    }

    /// Business date for discount windows and banner schedules.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
