//! # Configuration State
//!
//! Stores storefront configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VIBEZ_*`)
//! 2. Config file (`storefront.toml`)
//! 3. Defaults (this file)
//!
//! ## Example `storefront.toml`
//! ```toml
//! storeName = "Vibez Fashion"
//! priceRangeMax = 10000
//! bannerIntervalSecs = 5
//! catalogPath = "/srv/vibez/catalog.json"
//! ```
//!
//! Configuration is read-only after startup and passed by reference into
//! the commands that need it.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use vibez_core::{BannerPlacement, Money};

/// Largest `priceRangeMax` (rupees) whose paise value fits an `i64`.
const MAX_PRICE_RANGE_RUPEES: i64 = i64::MAX / 100;

/// Reasons a config file is refused.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid storefront configuration: {0}")]
    Invalid(String),
}

/// Storefront configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigState {
    /// Store name (shown in the page header)
    pub store_name: String,

    /// Currency code (ISO 4217)
    pub currency_code: String,

    /// Currency symbol (for display)
    pub currency_symbol: String,

    /// Number of decimal places for currency
    pub currency_decimals: u8,

    /// Upper end of the shop page price slider, in whole rupees
    pub price_range_max: i64,

    /// Seconds each banner stays on screen
    pub banner_interval_secs: u64,

    /// Slot the session's banner carousel shows at startup
    pub banner_placement: BannerPlacement,

    /// JSON catalog to load instead of the built-in seed data
    pub catalog_path: Option<PathBuf>,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Vibez"
    /// - Currency: INR (₹), two decimals
    /// - Price slider: ₹0 - ₹10000
    /// - Banners: homepage carousel, 5 seconds each
    /// - Catalog: built-in seed data
    fn default() -> Self {
        ConfigState {
            store_name: "Vibez".to_string(),
            currency_code: "INR".to_string(),
            currency_symbol: "₹".to_string(),
            currency_decimals: 2,
            price_range_max: 10_000,
            banner_interval_secs: 5,
            banner_placement: BannerPlacement::Homepage,
            catalog_path: None,
        }
    }
}

impl ConfigState {
    // =========================================================================
    // Loading
    // =========================================================================

    /// Loads configuration: defaults, then the TOML file (explicit path or
    /// the platform config dir), then `VIBEZ_*` environment overrides.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::read_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a TOML document. Missing keys keep their defaults.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store_name.trim().is_empty() {
            return Err(ConfigError::Invalid("storeName must not be empty".into()));
        }

        if self.currency_decimals > 4 {
            return Err(ConfigError::Invalid(format!(
                "currencyDecimals must be at most 4, got {}",
                self.currency_decimals
            )));
        }

        if !(1..=MAX_PRICE_RANGE_RUPEES).contains(&self.price_range_max) {
            return Err(ConfigError::Invalid(format!(
                "priceRangeMax must be between 1 and {}, got {}",
                MAX_PRICE_RANGE_RUPEES, self.price_range_max
            )));
        }

        if self.banner_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "bannerIntervalSecs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    ///
    /// ## Environment Variables
    /// - `VIBEZ_STORE_NAME`: Override store name
    /// - `VIBEZ_CATALOG_PATH`: Load the catalog from this JSON file
    /// - `VIBEZ_BANNER_INTERVAL_SECS`: Override banner rotation interval
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(name) = lookup("VIBEZ_STORE_NAME") {
            self.store_name = name;
        }

        if let Some(path) = lookup("VIBEZ_CATALOG_PATH") {
            debug!(path = %path, "Overriding catalog path from environment");
            self.catalog_path = Some(PathBuf::from(path));
        }

        if let Some(secs) = lookup("VIBEZ_BANNER_INTERVAL_SECS") {
            match secs.parse::<u64>() {
                Ok(secs) => self.banner_interval_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid VIBEZ_BANNER_INTERVAL_SECS"),
            }
        }
    }

    /// Gets the default config file path.
    ///
    /// - **macOS**: `~/Library/Application Support/com.vibez.storefront/storefront.toml`
    /// - **Windows**: `%APPDATA%\vibez\storefront\config\storefront.toml`
    /// - **Linux**: `~/.config/storefront/storefront.toml`
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vibez", "storefront")
            .map(|dirs| dirs.config_dir().join("storefront.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// Upper end of the price slider.
    pub fn price_max(&self) -> Money {
        Money::from_rupees(self.price_range_max)
    }

    pub fn banner_interval(&self) -> Duration {
        Duration::from_secs(self.banner_interval_secs)
    }

    /// Formats an amount as a currency string.
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::Money;
    /// use vibez_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(Money::from_paise(49950)), "₹499.50");
    /// ```
    pub fn format_currency(&self, amount: Money) -> String {
        self.format_minor_units(amount.paise())
    }

    /// Formats an exact amount (e.g. a GST component), rounding half away
    /// from zero to the currency's decimals.
    pub fn format_decimal(&self, amount: Decimal) -> String {
        let scale = Decimal::from(10_i64.pow(u32::from(self.currency_decimals)));
        let minor = (amount * scale)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_i64()
            .unwrap_or(i64::MAX);
        self.format_minor_units(minor)
    }

    fn format_minor_units(&self, minor: i64) -> String {
        let divisor = 10_i64.pow(u32::from(self.currency_decimals));
        let whole = minor / divisor;
        let frac = (minor % divisor).abs();

        format!(
            "{}{}{}",
            if minor < 0 { "-" } else { "" },
            self.currency_symbol,
            if self.currency_decimals > 0 {
                format!(
                    "{}.{:0width$}",
                    whole.abs(),
                    frac,
                    width = self.currency_decimals as usize
                )
            } else {
                whole.abs().to_string()
            }
        )
    }
}
