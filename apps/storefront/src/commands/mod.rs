//! # Storefront Commands Module
//!
//! All commands exposed to the storefront client.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (request routing)
//! ├── cart.rs     ◄─── Cart manipulation
//! ├── catalog.rs  ◄─── Shop page, filters, product detail
//! ├── vendor.rs   ◄─── Vendor dashboard, submissions, discounts
//! ├── admin.rs    ◄─── Moderation, admin dashboard
//! ├── banner.rs   ◄─── Carousel, banner requests and moderation
//! └── config.rs   ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Client writes one line:                                                │
//! │  {"id": 7, "command": "add_to_cart",                                    │
//! │   "args": {"productId": 1, "size": "M", "quantity": 2}}                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch() ──► parse args into AddToCartArgs                          │
//! │         │       borrow only the state the command needs:               │
//! │         │       cart::add_to_cart(&catalog, &mut session, &config, ..) │
//! │         ▼                                                               │
//! │  Result<T, ApiError> ──► JSON                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Client reads one line:                                                 │
//! │  {"id": 7, "ok": true, "data": {"items": [...], "totals": {...}}}       │
//! │  {"id": 7, "ok": false, "error": {"code": "CART_ERROR", ...}}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod admin;
pub mod banner;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod vendor;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::state::Storefront;

/// Every command name `dispatch` understands.
pub const COMMANDS: &[&str] = &[
    "get_cart",
    "add_to_cart",
    "update_cart_item",
    "remove_from_cart",
    "clear_cart",
    "browse_catalog",
    "set_filter",
    "reset_filter",
    "get_product",
    "register_vendor",
    "vendor_products",
    "submit_product",
    "update_product",
    "delete_product",
    "set_discount",
    "moderate_product",
    "moderate_vendor",
    "delete_vendor",
    "search_vendors",
    "dashboard",
    "list_banners",
    "rotate_banner",
    "click_banner",
    "submit_banner",
    "moderate_banner",
    "expire_banners",
    "get_config",
];

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    /// Echoed back so clients can match responses to requests.
    #[serde(default)]
    pub id: Option<Value>,
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

/// One response line.
#[derive(Debug, Clone, Serialize)]
pub struct Response {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiError>,
}

impl Response {
    pub fn success(id: Option<Value>, data: Value) -> Self {
        Response {
            id,
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(id: Option<Value>, error: ApiError) -> Self {
        Response {
            id,
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Parses and runs one request line.
pub fn handle_line(state: &mut Storefront, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => handle(state, request),
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            Response::failure(None, ApiError::bad_request(format!("Malformed request: {}", e)))
        }
    }
}

/// Runs one request.
pub fn handle(state: &mut Storefront, request: Request) -> Response {
    let Request { id, command, args } = request;
    match dispatch(state, &command, args) {
        Ok(data) => Response::success(id, data),
        Err(err) => {
            warn!(command = %command, error = %err, "Command failed");
            Response::failure(id, err)
        }
    }
}

/// Routes a command to its handler.
pub fn dispatch(state: &mut Storefront, command: &str, args: Value) -> Result<Value, ApiError> {
    debug!(command = %command, "Dispatching command");

    let today = state.today();
    let Storefront {
        config,
        catalog,
        session,
    } = state;

    match command {
        // Cart
        "get_cart" => respond(cart::get_cart(catalog, session, config)),
        "add_to_cart" => respond(cart::add_to_cart(catalog, session, config, parse(args)?)?),
        "update_cart_item" => respond(cart::update_cart_item(catalog, session, config, parse(args)?)?),
        "remove_from_cart" => respond(cart::remove_from_cart(catalog, session, config, parse(args)?)?),
        "clear_cart" => respond(cart::clear_cart(catalog, session, config)),

        // Shop page
        "browse_catalog" => respond(catalog::browse_catalog(catalog, session, config, today)),
        "set_filter" => respond(catalog::set_filter(catalog, session, config, today, parse(args)?)?),
        "reset_filter" => respond(catalog::reset_filter(catalog, session, config, today)),
        "get_product" => respond(catalog::get_product(catalog, config, today, parse(args)?)?),

        // Vendor dashboard
        "register_vendor" => respond(vendor::register_vendor(catalog, parse(args)?)?),
        "vendor_products" => respond(vendor::vendor_products(catalog, config, today, parse(args)?)?),
        "submit_product" => respond(vendor::submit_product(catalog, parse(args)?)?),
        "update_product" => respond(vendor::update_product(catalog, parse(args)?)?),
        "delete_product" => respond(vendor::delete_product(catalog, parse(args)?)?),
        "set_discount" => respond(vendor::set_discount(catalog, parse(args)?)?),

        // Admin
        "moderate_product" => respond(admin::moderate_product(catalog, parse(args)?)?),
        "moderate_vendor" => respond(admin::moderate_vendor(catalog, parse(args)?)?),
        "delete_vendor" => respond(admin::delete_vendor(catalog, parse(args)?)?),
        "search_vendors" => respond(admin::search_vendors(catalog, parse(args)?)),
        "dashboard" => respond(admin::dashboard(catalog)),

        // Banners
        "list_banners" => respond(banner::list_banners(catalog, session, config, parse(args)?)),
        "rotate_banner" => respond(banner::rotate_banner(catalog, session, parse(args)?)?),
        "click_banner" => respond(banner::click_banner(catalog, parse(args)?)?),
        "submit_banner" => respond(banner::submit_banner(catalog, today, parse(args)?)?),
        "moderate_banner" => respond(banner::moderate_banner(catalog, session, config, parse(args)?)?),
        "expire_banners" => respond(banner::expire_banners(catalog, session, config, today)),

        // Config
        "get_config" => respond(config::get_config(config, session)),

        other => Err(ApiError::bad_request(format!(
            "Unknown command '{}'. Known commands: {}",
            other,
            COMMANDS.join(", ")
        ))),
    }
}

/// Missing or `null` args read as `{}` so commands whose fields all have
/// defaults can be called bare.
fn parse<T: DeserializeOwned>(args: Value) -> Result<T, ApiError> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    Ok(serde_json::from_value(args)?)
}

fn respond<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value)
        .map_err(|e| ApiError::internal(format!("Failed to encode response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;
    use vibez_catalog::Catalog;

    fn storefront() -> Storefront {
        Storefront::with_catalog(ConfigState::default(), Catalog::seeded())
    }

    fn ok(state: &mut Storefront, line: &str) -> Value {
        let response = handle_line(state, line);
        assert!(response.ok, "{} failed: {:?}", line, response.error);
        response.data.unwrap()
    }

    fn err(state: &mut Storefront, line: &str) -> ApiError {
        let response = handle_line(state, line);
        assert!(!response.ok, "{} unexpectedly succeeded", line);
        response.error.unwrap()
    }

    #[test]
    fn test_cart_flow() {
        let mut state = storefront();

        ok(&mut state, r#"{"command": "add_to_cart", "args": {"productId": 1, "size": "M"}}"#);
        ok(&mut state, r#"{"command": "add_to_cart", "args": {"productId": 1, "size": "M", "quantity": 2}}"#);
        let cart = ok(&mut state, r#"{"command": "get_cart"}"#);

        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["lineId"], "1-M-vendor1");
        assert_eq!(cart["items"][0]["quantity"], 3);
        assert_eq!(cart["totals"]["count"], 3);
        assert_eq!(cart["totals"]["subtotal"], 149_700);
        assert_eq!(cart["totals"]["gst"]["cgst"], "134.73");
        assert_eq!(cart["display"]["total"], "₹1766.46");

        let cart = ok(
            &mut state,
            r#"{"command": "update_cart_item", "args": {"lineId": "1-M-vendor1", "quantity": 0}}"#,
        );
        assert!(cart["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_shop_flow() {
        let mut state = storefront();

        let page = ok(
            &mut state,
            r#"{"command": "set_filter", "args": {"category": "bottoms", "sort": "price-low"}}"#,
        );
        let names: Vec<&str> = page["products"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, vec!["Casual Shorts", "Slim Fit Jeans"]);
        assert_eq!(page["criteria"]["category"], "bottoms");

        // Criteria persist in the session
        let page = ok(&mut state, r#"{"command": "browse_catalog"}"#);
        assert_eq!(page["resultCount"], 2);

        let page = ok(&mut state, r#"{"command": "reset_filter"}"#);
        assert_eq!(page["resultCount"], 7);
    }

    #[test]
    fn test_moderation_flow() {
        let mut state = storefront();

        let e = err(&mut state, r#"{"command": "add_to_cart", "args": {"productId": 5, "size": "M"}}"#);
        assert_eq!(e.code, ErrorCode::CartError);

        ok(
            &mut state,
            r#"{"command": "moderate_product", "args": {"productId": 5, "status": "approved"}}"#,
        );
        ok(&mut state, r#"{"command": "add_to_cart", "args": {"productId": 5, "size": "M"}}"#);

        let dashboard = ok(&mut state, r#"{"command": "dashboard"}"#);
        assert_eq!(dashboard["stats"]["pendingProducts"], 0);
    }

    #[test]
    fn test_request_id_is_echoed() {
        let mut state = storefront();
        let response = handle_line(&mut state, r#"{"id": "abc", "command": "get_config"}"#);
        assert_eq!(response.id, Some(Value::from("abc")));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ok"], true);
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_bad_requests() {
        let mut state = storefront();

        let e = err(&mut state, "not json");
        assert_eq!(e.code, ErrorCode::BadRequest);

        let e = err(&mut state, r#"{"command": "checkout"}"#);
        assert_eq!(e.code, ErrorCode::BadRequest);
        assert!(e.message.contains("get_cart"));

        let e = err(&mut state, r#"{"command": "add_to_cart", "args": {"productId": "one"}}"#);
        assert_eq!(e.code, ErrorCode::BadRequest);

        let e = err(&mut state, r#"{"command": "get_product"}"#);
        assert_eq!(e.code, ErrorCode::BadRequest);
    }

    #[test]
    fn test_every_command_is_routed() {
        let mut state = storefront();
        for command in COMMANDS {
            let result = dispatch(&mut state, command, Value::Null);
            if let Err(e) = result {
                assert!(
                    !e.message.starts_with("Unknown command"),
                    "{} is listed but not routed",
                    command
                );
            }
        }
    }
}
