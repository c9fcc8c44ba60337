//! # Cart Aggregator
//!
//! Owns the line items of one shopping session and derives the totals shown
//! in the cart drawer.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Storefront Action        Operation               Line Item Change      │
//! │  ─────────────────        ─────────               ────────────────      │
//! │                                                                         │
//! │  Add to Cart ────────────► add_item() ──────────► insert or qty += n   │
//! │                                                                         │
//! │  Change Quantity ────────► set_quantity() ──────► qty = n (n ≤ 0 ⇒ rm) │
//! │                                                                         │
//! │  Click Remove ───────────► remove_item() ───────► delete (absent: no-op)│
//! │                                                                         │
//! │  Checkout / Clear ───────► clear() ─────────────► items.clear()        │
//! │                                                                         │
//! │  Badge / Drawer ─────────► count(), subtotal(), tax_breakdown()        │
//! │                            (recomputed on every read, never cached)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Line Identity
//! A line item is identified by `(product_id, size, vendor_id)`, not by the
//! product alone: the same T-shirt in M and L is two lines.
//!
//! ## GST
//! Two co-equal components, CGST 9% and SGST 9%, both applied to the same
//! subtotal. The split is fixed; it is not configurable per product or
//! vendor.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::{Product, ProductId, TaxRate};
use crate::validation::{validate_price, validate_vendor_id};

/// Central GST component (9%).
pub const CGST_RATE: TaxRate = TaxRate::from_bps(900);

/// State GST component (9%).
pub const SGST_RATE: TaxRate = TaxRate::from_bps(900);

// =============================================================================
// Line Key
// =============================================================================

/// Composite identity of a cart line: `(product_id, size, vendor_id)`.
///
/// The text form `"{product_id}-{size}-{vendor_id}"` is the line id used by
/// the storefront. Vendor ids never contain `-`; sizes may.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    pub size: String,
    pub vendor_id: String,
}

impl LineKey {
    pub fn new(product_id: ProductId, size: impl Into<String>, vendor_id: impl Into<String>) -> Self {
        LineKey {
            product_id,
            size: size.into(),
            vendor_id: vendor_id.into(),
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.product_id, self.size, self.vendor_id)
    }
}

impl FromStr for LineKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFormat {
            field: "line id".to_string(),
            reason: format!("expected <product>-<size>-<vendor>, got '{}'", s),
        };

        let (product, rest) = s.split_once('-').ok_or_else(invalid)?;
        let (size, vendor) = rest.rsplit_once('-').ok_or_else(invalid)?;
        let product_id = product.parse::<ProductId>().map_err(|_| invalid())?;

        if size.is_empty() || vendor.is_empty() {
            return Err(invalid());
        }

        Ok(LineKey::new(product_id, size, vendor))
    }
}

// =============================================================================
// Cart Line Item
// =============================================================================

/// One distinct (product, size, vendor) combination in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub key: LineKey,

    /// Always at least 1 while the line exists.
    pub quantity: u32,

    /// Unit price captured when the line was first added.
    pub unit_price: Money,
}

impl CartLineItem {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// GST Breakdown
// =============================================================================

/// The two-part GST on a cart subtotal.
///
/// Amounts are exact (in rupees); call [`GstBreakdown::rounded`] at the
/// presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct GstBreakdown {
    /// Base the tax was computed on.
    pub subtotal: Money,
    #[ts(as = "String")]
    pub cgst: Decimal,
    #[ts(as = "String")]
    pub sgst: Decimal,
    /// `cgst + sgst`.
    #[ts(as = "String")]
    pub total: Decimal,
}

impl GstBreakdown {
    /// Computes the fixed 9% + 9% split on `subtotal`.
    pub fn on(subtotal: Money) -> Self {
        let cgst = subtotal.tax_exact(CGST_RATE);
        let sgst = subtotal.tax_exact(SGST_RATE);
        GstBreakdown {
            subtotal,
            cgst,
            sgst,
            total: cgst + sgst,
        }
    }

    /// Rounds each component to the paisa for display. The rounded total is
    /// the sum of the rounded components so receipt lines add up.
    pub fn rounded(&self) -> RoundedGst {
        let cgst = self.subtotal.calculate_tax(CGST_RATE);
        let sgst = self.subtotal.calculate_tax(SGST_RATE);
        RoundedGst {
            cgst,
            sgst,
            total: cgst + sgst,
        }
    }
}

/// GST components rounded to two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RoundedGst {
    pub cgst: Money,
    pub sgst: Money,
    pub total: Money,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart of one session.
///
/// ## Invariants
/// - At most one line per [`LineKey`] (adding an existing key adds quantity)
/// - Every line has quantity ≥ 1
/// - Lines keep insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Adds `quantity` units of a line, merging with an existing line of the
    /// same key.
    ///
    /// ## Behavior
    /// - Key already in cart: quantity increases (the stored price is kept)
    /// - Key not in cart: a new line is appended
    /// - `quantity <= 0`, a negative price or a vendor id containing `-`:
    ///   rejected, cart unchanged
    /// - Quantity overflow saturates instead of failing
    pub fn add_item(
        &mut self,
        product_id: ProductId,
        vendor_id: &str,
        size: &str,
        quantity: i64,
        unit_price: Money,
    ) -> CoreResult<()> {
        if quantity <= 0 {
            return Err(ValidationError::must_be_positive("quantity").into());
        }
        validate_price(unit_price)?;
        validate_vendor_id(vendor_id)?;

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let key = LineKey::new(product_id, size, vendor_id);

        if let Some(item) = self.items.iter_mut().find(|i| i.key == key) {
            item.quantity = item.quantity.saturating_add(quantity);
            return Ok(());
        }

        self.items.push(CartLineItem {
            key,
            quantity,
            unit_price,
        });
        Ok(())
    }

    /// Adds a catalog product in `size` (or its default size) at list price.
    ///
    /// ## Errors
    /// - [`CoreError::ProductUnavailable`] if the product is not approved
    /// - [`CoreError::SizeUnavailable`] if the size is not offered
    pub fn add_product(
        &mut self,
        product: &Product,
        size: Option<&str>,
        quantity: i64,
    ) -> CoreResult<LineKey> {
        if !product.is_visible() {
            return Err(CoreError::ProductUnavailable(product.id));
        }

        let size = size.unwrap_or_else(|| product.default_size());
        if !product.offers_size(size) {
            return Err(CoreError::SizeUnavailable {
                product_id: product.id,
                size: size.to_string(),
            });
        }

        self.add_item(product.id, &product.vendor_id, size, quantity, product.price)?;
        Ok(LineKey::new(product.id, size, product.vendor_id.as_str()))
    }

    /// Removes a line. Absent keys are a no-op.
    pub fn remove_item(&mut self, key: &LineKey) -> Option<CartLineItem> {
        let index = self.items.iter().position(|i| &i.key == key)?;
        Some(self.items.remove(index))
    }

    /// Replaces a line's quantity; `quantity <= 0` removes the line.
    /// Absent keys are a no-op.
    pub fn set_quantity(&mut self, key: &LineKey, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(key);
            return;
        }

        if let Some(item) = self.items.iter_mut().find(|i| &i.key == key) {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Lines in insertion order.
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Looks up a line.
    pub fn get(&self, key: &LineKey) -> Option<&CartLineItem> {
        self.items.iter().find(|i| &i.key == key)
    }

    /// Total units across all lines (the cart badge number).
    pub fn count(&self) -> u64 {
        self.items.iter().map(|i| i.quantity as u64).sum()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Σ unit price × quantity, exact in paise.
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(CartLineItem::line_total).sum()
    }

    /// CGST and SGST on the subtotal.
    pub fn tax_breakdown(&self) -> GstBreakdown {
        GstBreakdown::on(self.subtotal())
    }

    /// Subtotal plus GST, exact.
    pub fn grand_total(&self) -> Decimal {
        let gst = self.tax_breakdown();
        gst.subtotal.to_decimal() + gst.total
    }

    /// Lines grouped by vendor, vendors in the order they first appear.
    pub fn group_by_vendor(&self) -> Vec<VendorGroup<'_>> {
        let mut groups: Vec<VendorGroup<'_>> = Vec::new();

        for item in &self.items {
            match groups.iter_mut().find(|g| g.vendor_id == item.key.vendor_id) {
                Some(group) => {
                    group.subtotal += item.line_total();
                    group.items.push(item);
                }
                None => groups.push(VendorGroup {
                    vendor_id: &item.key.vendor_id,
                    subtotal: item.line_total(),
                    items: vec![item],
                }),
            }
        }

        groups
    }
}

/// Cart lines belonging to one vendor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorGroup<'a> {
    pub vendor_id: &'a str,
    pub items: Vec<&'a CartLineItem>,
    pub subtotal: Money,
}

/// Cart totals summary for responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub count: u64,
    pub subtotal: Money,
    pub gst: GstBreakdown,
    pub gst_rounded: RoundedGst,
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let gst = cart.tax_breakdown();
        CartTotals {
            line_count: cart.line_count(),
            count: cart.count(),
            subtotal: gst.subtotal,
            gst,
            gst_rounded: gst.rounded(),
            grand_total: gst.subtotal.to_decimal() + gst.total,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Category, Gender, ProductStatus};

    fn key(product_id: ProductId, size: &str, vendor: &str) -> LineKey {
        LineKey::new(product_id, size, vendor)
    }

    fn tee(status: ProductStatus) -> Product {
        Product {
            id: 1,
            name: "Classic Cotton T-Shirt".to_string(),
            price: Money::from_rupees(499),
            category: Category::Tops,
            gender: Gender::Men,
            vendor_id: "vendor1".to_string(),
            status,
            sizes: vec!["S".into(), "M".into(), "L".into()],
            rating: Some(4.5),
            description: None,
            image: None,
            badge: None,
            trending: false,
            discount: None,
        }
    }

    #[test]
    fn test_same_key_adds_into_one_line() {
        let mut cart = Cart::new();
        for qty in [1, 2, 4] {
            cart.add_item(1, "v1", "M", qty, Money::from_rupees(499)).unwrap();
        }

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.count(), 7);
        assert_eq!(cart.get(&key(1, "M", "v1")).unwrap().quantity, 7);
    }

    #[test]
    fn test_different_size_is_a_different_line() {
        // A: (1, v1, M) ×2 @ 499, B: (1, v1, L) ×1 @ 499
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        cart.add_item(1, "v1", "L", 1, Money::from_rupees(499)).unwrap();

        assert_eq!(cart.line_count(), 2);
        assert_eq!(cart.count(), 3);
        assert_eq!(cart.subtotal(), Money::from_rupees(1497));

        let gst = cart.tax_breakdown();
        assert_eq!(gst.cgst, Decimal::new(13473, 2));
        assert_eq!(gst.sgst, Decimal::new(13473, 2));
        assert_eq!(gst.total, Decimal::new(26946, 2));
        assert_eq!(cart.grand_total(), Decimal::new(176646, 2));
    }

    #[test]
    fn test_different_vendor_is_a_different_line() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 1, Money::from_rupees(499)).unwrap();
        cart.add_item(1, "v2", "M", 1, Money::from_rupees(499)).unwrap();
        assert_eq!(cart.line_count(), 2);
    }

    #[test]
    fn test_non_positive_add_is_rejected() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();

        let err = cart.add_item(1, "v1", "M", 0, Money::from_rupees(499));
        assert!(matches!(err, Err(CoreError::Validation(_))));
        assert!(cart.add_item(1, "v1", "M", -3, Money::from_rupees(499)).is_err());
        assert!(cart.add_item(2, "v1", "M", 1, Money::from_paise(-1)).is_err());

        assert_eq!(cart.count(), 2);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_existing_line_keeps_its_price() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 1, Money::from_rupees(499)).unwrap();
        cart.add_item(1, "v1", "M", 1, Money::from_rupees(399)).unwrap();
        assert_eq!(cart.subtotal(), Money::from_rupees(998));
    }

    #[test]
    fn test_quantity_overflow_saturates() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", i64::MAX, Money::from_paise(1)).unwrap();
        cart.add_item(1, "v1", "M", 5, Money::from_paise(1)).unwrap();
        assert_eq!(cart.get(&key(1, "M", "v1")).unwrap().quantity, u32::MAX);
    }

    #[test]
    fn test_extreme_prices_saturate_subtotal() {
        let price = Money::from_paise(i64::MAX / 2);
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 3, price).unwrap();
        cart.add_item(2, "v1", "M", 3, price).unwrap();

        assert_eq!(cart.subtotal().paise(), i64::MAX);
        assert_eq!(cart.group_by_vendor()[0].subtotal.paise(), i64::MAX);

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.gst.cgst, totals.gst.sgst);
        assert!(totals.grand_total > totals.subtotal.to_decimal());
    }

    #[test]
    fn test_subtotal_is_order_invariant() {
        let adds = [
            (1, "M", "v1", 2, 499),
            (2, "32", "v1", 1, 1299),
            (3, "9", "v2", 3, 2499),
            (1, "M", "v1", 1, 499),
        ];

        let mut forward = Cart::new();
        for (id, size, vendor, qty, price) in adds {
            forward.add_item(id, vendor, size, qty, Money::from_rupees(price)).unwrap();
        }

        let mut backward = Cart::new();
        for (id, size, vendor, qty, price) in adds.into_iter().rev() {
            backward.add_item(id, vendor, size, qty, Money::from_rupees(price)).unwrap();
        }

        assert_eq!(forward.subtotal(), backward.subtotal());
        assert_eq!(forward.count(), backward.count());
        assert_eq!(forward.tax_breakdown(), backward.tax_breakdown());
    }

    #[test]
    fn test_set_quantity_zero_equals_remove() {
        let mut removed = Cart::new();
        removed.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        removed.add_item(2, "v1", "S", 1, Money::from_rupees(899)).unwrap();
        let mut zeroed = removed.clone();

        removed.remove_item(&key(1, "M", "v1"));
        zeroed.set_quantity(&key(1, "M", "v1"), 0);

        assert_eq!(removed, zeroed);
        assert!(zeroed.get(&key(1, "M", "v1")).is_none());

        zeroed.set_quantity(&key(2, "S", "v1"), -4);
        assert!(zeroed.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        cart.set_quantity(&key(1, "M", "v1"), 5);
        assert_eq!(cart.count(), 5);

        // unknown key: no-op
        cart.set_quantity(&key(9, "M", "v1"), 5);
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 1, Money::from_rupees(499)).unwrap();
        assert!(cart.remove_item(&key(1, "L", "v1")).is_none());
        assert_eq!(cart.line_count(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.count(), 0);
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.tax_breakdown().total, Decimal::ZERO);
    }

    #[test]
    fn test_gst_components_are_equal_nine_percent() {
        for paise in [0, 1, 49_950, 149_700, 1_234_567] {
            let gst = GstBreakdown::on(Money::from_paise(paise));
            let nine_percent = Money::from_paise(paise).to_decimal() * Decimal::new(9, 2);
            assert_eq!(gst.cgst, gst.sgst);
            assert_eq!(gst.cgst, nine_percent);
        }
    }

    #[test]
    fn test_rounded_gst() {
        // ₹499.50 × 9% = ₹44.955 → ₹44.96 per component
        let rounded = GstBreakdown::on(Money::from_paise(49_950)).rounded();
        assert_eq!(rounded.cgst.paise(), 4_496);
        assert_eq!(rounded.sgst.paise(), 4_496);
        assert_eq!(rounded.total.paise(), 8_992);
    }

    #[test]
    fn test_group_by_vendor() {
        let mut cart = Cart::new();
        cart.add_item(3, "vendor2", "9", 1, Money::from_rupees(2499)).unwrap();
        cart.add_item(1, "vendor1", "M", 2, Money::from_rupees(499)).unwrap();
        cart.add_item(4, "vendor2", "One Size", 1, Money::from_rupees(899)).unwrap();

        let groups = cart.group_by_vendor();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].vendor_id, "vendor2");
        assert_eq!(groups[0].items.len(), 2);
        assert_eq!(groups[0].subtotal, Money::from_rupees(3398));
        assert_eq!(groups[1].vendor_id, "vendor1");
        assert_eq!(groups[1].subtotal, Money::from_rupees(998));
    }

    #[test]
    fn test_add_product() {
        let mut cart = Cart::new();
        let line = cart
            .add_product(&tee(ProductStatus::Approved), None, 1)
            .unwrap();
        assert_eq!(line, key(1, "S", "vendor1"));

        cart.add_product(&tee(ProductStatus::Approved), Some("M"), 2).unwrap();
        assert_eq!(cart.count(), 3);

        assert!(matches!(
            cart.add_product(&tee(ProductStatus::Approved), Some("XXL"), 1),
            Err(CoreError::SizeUnavailable { .. })
        ));
        assert!(matches!(
            cart.add_product(&tee(ProductStatus::Pending), Some("M"), 1),
            Err(CoreError::ProductUnavailable(1))
        ));
    }

    #[test]
    fn test_line_key_text_form() {
        let k = key(12, "One Size", "vendor2");
        assert_eq!(k.to_string(), "12-One Size-vendor2");
        assert_eq!("12-One Size-vendor2".parse::<LineKey>().unwrap(), k);

        // sizes may contain dashes
        let k = key(5, "X-Large", "vendor1");
        assert_eq!(k.to_string().parse::<LineKey>().unwrap(), k);

        assert!("abc-M-v1".parse::<LineKey>().is_err());
        assert!("1-v1".parse::<LineKey>().is_err());

        // a dashed vendor id could not be parsed back
        let mut cart = Cart::new();
        assert!(cart.add_item(1, "fashion-hub", "M", 1, Money::from_rupees(499)).is_err());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        cart.add_item(1, "v1", "L", 1, Money::from_rupees(499)).unwrap();

        let totals = CartTotals::from(&cart);
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.count, 3);
        assert_eq!(totals.subtotal, Money::from_rupees(1497));
        assert_eq!(totals.gst_rounded.cgst.paise(), 13_473);
        assert_eq!(totals.grand_total, Decimal::new(176646, 2));
    }

    #[test]
    fn test_line_item_serializes_flat() {
        let mut cart = Cart::new();
        cart.add_item(1, "v1", "M", 2, Money::from_rupees(499)).unwrap();
        let json = serde_json::to_value(&cart.items()[0]).unwrap();
        assert_eq!(json["productId"], 1);
        assert_eq!(json["size"], "M");
        assert_eq!(json["vendorId"], "v1");
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["unitPrice"], 49_900);
    }
}
