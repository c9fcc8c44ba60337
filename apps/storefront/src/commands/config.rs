//! # Config Commands
//!
//! Commands for retrieving storefront configuration.

use serde::Serialize;
use tracing::debug;

use crate::state::{ConfigState, Session, SessionInfo};

/// Configuration plus the session it applies to.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigResponse<'a> {
    #[serde(flatten)]
    pub config: &'a ConfigState,
    pub session: SessionInfo,
}

/// Gets the current storefront configuration.
///
/// ## When Used
/// - Client startup (store name, currency symbol, price slider bounds)
/// - Carousel timer setup (banner interval)
pub fn get_config<'a>(config: &'a ConfigState, session: &Session) -> ConfigResponse<'a> {
    debug!("get_config command");
    ConfigResponse {
        config,
        session: session.info(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibez_catalog::Catalog;

    #[test]
    fn test_get_config_shape() {
        let config = ConfigState::default();
        let session = Session::new(&config, &Catalog::seeded());

        let json = serde_json::to_value(get_config(&config, &session)).unwrap();
        assert_eq!(json["currencySymbol"], "₹");
        assert_eq!(json["priceRangeMax"], 10_000);
        assert_eq!(json["bannerIntervalSecs"], 5);
        assert_eq!(json["session"]["cartCount"], 0);
        assert_eq!(json["session"]["id"], session.id().to_string());
    }
}
