//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐                        │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │                        │
//! │  │  Cart    │     │          │     │ (client) │                        │
//! │  └──────────┘     └──────────┘     └──────────┘                        │
//! │                        │                                                │
//! │                   add_to_cart                                           │
//! │                   update_cart_item                                      │
//! │                   remove_from_cart                                      │
//! │                        │                                                │
//! │                        ▼                                                │
//! │                   clear_cart ──────────────────────►                   │
//! │                                                      (back to empty)   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every command answers with the whole cart so the client can redraw it in
//! one go.

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;
use vibez_catalog::Catalog;
use vibez_core::validation::validate_quantity;
use vibez_core::{CartLineItem, CartTotals, CoreError, LineKey, Money, ProductId};

use crate::error::ApiError;
use crate::state::{ConfigState, Session};

/// One cart line as the client renders it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineView<'a> {
    /// `"{productId}-{size}-{vendorId}"`, the handle for update/remove.
    pub line_id: String,
    #[serde(flatten)]
    pub item: &'a CartLineItem,
    pub product_name: Option<&'a str>,
    pub image: Option<&'a str>,
    pub line_total: Money,
}

/// Cart lines shipped by one vendor.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorCartView<'a> {
    pub vendor_id: &'a str,
    pub vendor_name: Option<&'a str>,
    pub line_ids: Vec<String>,
    pub subtotal: Money,
}

/// Formatted amounts for the order summary.
///
/// Tax lines are rounded to the paisa here and nowhere earlier; the total is
/// the subtotal plus the rounded tax lines so the summary adds up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDisplay {
    pub subtotal: String,
    pub cgst: String,
    pub sgst: String,
    pub total: String,
}

/// Cart response including items, vendor grouping and totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse<'a> {
    pub session_id: Uuid,
    pub items: Vec<CartLineView<'a>>,
    pub by_vendor: Vec<VendorCartView<'a>>,
    pub totals: CartTotals,
    pub display: CartDisplay,
}

impl<'a> CartResponse<'a> {
    pub fn build(catalog: &'a Catalog, session: &'a Session, config: &ConfigState) -> Self {
        let cart = &session.cart;

        let items = cart
            .items()
            .iter()
            .map(|item| {
                let product = catalog.products().get_by_id(item.key.product_id);
                CartLineView {
                    line_id: item.key.to_string(),
                    item,
                    product_name: product.map(|p| p.name.as_str()),
                    image: product.and_then(|p| p.image.as_deref()),
                    line_total: item.line_total(),
                }
            })
            .collect();

        let by_vendor = cart
            .group_by_vendor()
            .into_iter()
            .map(|group| VendorCartView {
                vendor_id: group.vendor_id,
                vendor_name: catalog.vendors().get(group.vendor_id).map(|v| v.name.as_str()),
                line_ids: group.items.iter().map(|i| i.key.to_string()).collect(),
                subtotal: group.subtotal,
            })
            .collect();

        let totals = CartTotals::from(cart);
        let display = CartDisplay {
            subtotal: config.format_currency(totals.subtotal),
            cgst: config.format_currency(totals.gst_rounded.cgst),
            sgst: config.format_currency(totals.gst_rounded.sgst),
            total: config.format_currency(totals.subtotal + totals.gst_rounded.total),
        };

        CartResponse {
            session_id: session.id(),
            items,
            by_vendor,
            totals,
            display,
        }
    }
}

fn default_quantity() -> i64 {
    1
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartArgs {
    pub product_id: ProductId,
    /// Defaults to the product's first size.
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartItemArgs {
    pub line_id: String,
    pub quantity: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineArgs {
    pub line_id: String,
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  CART                                                   3 items        │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Fashion Hub                                                            │
/// │    Classic Cotton T-Shirt (M)       x2                 ₹998.00         │
/// │  Style Studio                                                           │
/// │    Leather Wallet (One Size)        x1                 ₹899.00         │
/// ├─────────────────────────────────────────────────────────────────────────┤
/// │  Subtotal                                              ₹1897.00        │
/// │  CGST (9%)                                             ₹170.73         │
/// │  SGST (9%)                                             ₹170.73         │
/// │  TOTAL                                                 ₹2238.46        │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart<'a>(catalog: &'a Catalog, session: &'a Session, config: &ConfigState) -> CartResponse<'a> {
    debug!("get_cart command");
    CartResponse::build(catalog, session, config)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - Same product, size and vendor already in cart: quantity increases
/// - Otherwise: added as a new line at the list price
/// - Only approved products, in a size they offer
/// - `quantity` defaults to 1 and must be 1-999
pub fn add_to_cart<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    args: AddToCartArgs,
) -> Result<CartResponse<'a>, ApiError> {
    debug!(
        product_id = args.product_id,
        size = ?args.size,
        quantity = args.quantity,
        "add_to_cart command"
    );

    validate_quantity(args.quantity)?;

    let product = catalog
        .products()
        .get_by_id(args.product_id)
        .ok_or(CoreError::ProductNotFound(args.product_id))?;

    let key = session
        .cart
        .add_product(product, args.size.as_deref(), args.quantity)?;
    debug!(line_id = %key, "Cart line updated");

    Ok(CartResponse::build(catalog, session, config))
}

/// Sets a line's quantity.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Quantity above 999: rejected
/// - Unknown line: cart unchanged
pub fn update_cart_item<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    args: UpdateCartItemArgs,
) -> Result<CartResponse<'a>, ApiError> {
    debug!(line_id = %args.line_id, quantity = args.quantity, "update_cart_item command");

    if args.quantity > 0 {
        validate_quantity(args.quantity)?;
    }
    let key: LineKey = args.line_id.parse()?;
    session.cart.set_quantity(&key, args.quantity);

    Ok(CartResponse::build(catalog, session, config))
}

/// Removes a line from the cart. Unknown lines leave the cart unchanged.
pub fn remove_from_cart<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    args: LineArgs,
) -> Result<CartResponse<'a>, ApiError> {
    debug!(line_id = %args.line_id, "remove_from_cart command");

    let key: LineKey = args.line_id.parse()?;
    if session.cart.remove_item(&key).is_none() {
        debug!(line_id = %key, "Line not in cart");
    }

    Ok(CartResponse::build(catalog, session, config))
}

/// Clears all items from the cart.
pub fn clear_cart<'a>(catalog: &'a Catalog, session: &'a mut Session, config: &ConfigState) -> CartResponse<'a> {
    debug!("clear_cart command");

    session.cart.clear();
    CartResponse::build(catalog, session, config)
}
