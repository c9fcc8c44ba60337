//! # Domain Types
//!
//! Core domain types used throughout the storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │     Vendor      │   │    TaxRate      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u32)       │   │  id (string)    │   │  bps (u32)      │       │
//! │  │  name, price    │   │  name, email    │   │  900 = 9%       │       │
//! │  │  category       │   │  status         │   └─────────────────┘       │
//! │  │  gender, status │   │  commission     │                             │
//! │  │  sizes, rating? │   │  plan           │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   Category      │   │     Gender      │   │ ProductStatus   │       │
//! │  │  tops, bottoms, │   │  Men            │   │  Approved       │       │
//! │  │  shoes, ...     │   │  Women, Unisex  │   │  Pending        │       │
//! │  └─────────────────┘   └─────────────────┘   │  Rejected       │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are externally supplied and read-only to the catalog pipeline.
//! Optional fields of the raw catalog records get their defaults at the
//! loading boundary (`vibez-catalog`), so every `Product` here is complete.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::discount::Discount;
use crate::error::ValidationError;
use crate::money::Money;

/// Product identifier. Higher ids are newer products.
pub type ProductId = u32;

/// Size assigned to products whose record lists no sizes.
pub const DEFAULT_SIZE: &str = "One Size";

// =============================================================================
// Tax Rate
// =============================================================================

/// Tax rate represented in basis points (bps).
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000
/// 900 bps = 9% (one half of the 18% GST slab)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxRate(u32);

impl TaxRate {
    /// Creates a tax rate from basis points.
    #[inline]
    pub const fn from_bps(bps: u32) -> Self {
        TaxRate(bps)
    }

    /// Returns the rate in basis points.
    #[inline]
    pub const fn bps(&self) -> u32 {
        self.0
    }

    /// Returns the rate as an exact fraction (900 bps → 0.09).
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0 as i64, 4)
    }

    /// Returns the rate as a percentage (for display only).
    #[inline]
    pub fn percentage(&self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Zero tax rate.
    #[inline]
    pub const fn zero() -> Self {
        TaxRate(0)
    }
}

impl Default for TaxRate {
    fn default() -> Self {
        TaxRate::zero()
    }
}

// =============================================================================
// Category
// =============================================================================

/// Product category as shown in the storefront category tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Tops,
    Bottoms,
    Outerwear,
    Dresses,
    Shoes,
    Accessories,
    Activewear,
    Swimwear,
}

impl Category {
    /// All categories in tab order.
    pub const ALL: [Category; 8] = [
        Category::Tops,
        Category::Bottoms,
        Category::Outerwear,
        Category::Dresses,
        Category::Shoes,
        Category::Accessories,
        Category::Activewear,
        Category::Swimwear,
    ];

    /// Returns the wire name (`"tops"`, `"bottoms"`, ...).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Outerwear => "outerwear",
            Category::Dresses => "dresses",
            Category::Shoes => "shoes",
            Category::Accessories => "accessories",
            Category::Activewear => "activewear",
            Category::Swimwear => "swimwear",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                ValidationError::not_allowed("category", &names)
            })
    }
}

// =============================================================================
// Gender
// =============================================================================

/// Target audience of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    Men,
    Women,
    /// Default for catalog records that name no gender.
    #[default]
    Unisex,
}

impl Gender {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
            Gender::Unisex => "unisex",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "men" | "male" => Ok(Gender::Men),
            "women" | "female" => Ok(Gender::Women),
            "unisex" => Ok(Gender::Unisex),
            _ => Err(ValidationError::not_allowed(
                "gender",
                &["men", "women", "unisex"],
            )),
        }
    }
}

// =============================================================================
// Product Status
// =============================================================================

/// Moderation status of a product.
///
/// ## Lifecycle
/// ```text
/// vendor submits ──► Pending ──admin──► Approved  (visible to customers)
///                       │
///                       └────admin──► Rejected  (never visible)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    Approved,
    #[default]
    Pending,
    Rejected,
}

impl ProductStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProductStatus::Approved => "approved",
            ProductStatus::Pending => "pending",
            ProductStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(ProductStatus::Approved),
            "pending" => Ok(ProductStatus::Pending),
            "rejected" => Ok(ProductStatus::Rejected),
            _ => Err(ValidationError::not_allowed(
                "status",
                &["approved", "pending", "rejected"],
            )),
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product listed by a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Catalog id; doubles as a recency proxy (higher = newer).
    pub id: ProductId,

    /// Display name, matched by the storefront search box.
    pub name: String,

    /// List price.
    pub price: Money,

    pub category: Category,

    pub gender: Gender,

    /// Vendor that listed the product.
    pub vendor_id: String,

    /// Moderation status. Only approved products reach customers.
    pub status: ProductStatus,

    /// Sizes on offer. Never empty once loaded.
    pub sizes: Vec<String>,

    /// Average review rating (0-5), if the product has been reviewed.
    pub rating: Option<f64>,

    pub description: Option<String>,

    pub image: Option<String>,

    /// Merchandising badge ("HOT", "TRENDING", ...).
    pub badge: Option<String>,

    pub trending: bool,

    /// Vendor discount on the list price.
    pub discount: Option<Discount>,
}

impl Product {
    /// Rating used for sorting; unrated products count as 0.
    #[inline]
    pub fn rating_or_default(&self) -> f64 {
        self.rating.unwrap_or(0.0)
    }

    /// Whether customers may see and buy this product.
    #[inline]
    pub fn is_visible(&self) -> bool {
        self.status == ProductStatus::Approved
    }

    /// Checks whether the product is offered in `size`.
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    /// The size preselected on the product card.
    pub fn default_size(&self) -> &str {
        self.sizes.first().map(String::as_str).unwrap_or(DEFAULT_SIZE)
    }

    /// Price of a single unit on `date`: the discounted price when a
    /// discount applies to one unit, otherwise the list price. Bulk
    /// discounts (minimum quantity above 1) keep the list price here.
    pub fn display_price(&self, date: NaiveDate) -> Money {
        match &self.discount {
            Some(discount) if discount.applies(date, 1) => discount.discounted_price(self.price),
            _ => self.price,
        }
    }
}

// =============================================================================
// Vendor
// =============================================================================

/// Approval status of a vendor account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VendorStatus {
    Approved,
    #[default]
    Pending,
    Rejected,
}

impl VendorStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            VendorStatus::Approved => "approved",
            VendorStatus::Pending => "pending",
            VendorStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for VendorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VendorStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(VendorStatus::Approved),
            "pending" => Ok(VendorStatus::Pending),
            "rejected" => Ok(VendorStatus::Rejected),
            _ => Err(ValidationError::not_allowed(
                "status",
                &["approved", "pending", "rejected"],
            )),
        }
    }
}

/// Vendor subscription tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Basic,
    Premium,
    Enterprise,
}

/// A seller on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Vendor {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: VendorStatus,
    /// Marketplace commission in percent.
    pub commission: u8,
    #[serde(default)]
    pub subscription_plan: SubscriptionPlan,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(sizes: &[&str]) -> Product {
        Product {
            id: 1,
            name: "Classic Cotton T-Shirt".to_string(),
            price: Money::from_rupees(499),
            category: Category::Tops,
            gender: Gender::Men,
            vendor_id: "vendor1".to_string(),
            status: ProductStatus::Approved,
            sizes: sizes.iter().map(|s| s.to_string()).collect(),
            rating: None,
            description: None,
            image: None,
            badge: None,
            trending: false,
            discount: None,
        }
    }

    #[test]
    fn test_display_price_follows_discount() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 6, d).unwrap();
        let mut tee = product(&["M"]);
        assert_eq!(tee.display_price(day(1)), Money::from_rupees(499));

        tee.discount = Some(Discount::fixed(Money::from_rupees(100)).between(Some(day(10)), None));
        assert_eq!(tee.display_price(day(9)), Money::from_rupees(499));
        assert_eq!(tee.display_price(day(10)), Money::from_rupees(399));

        tee.discount = Some(Discount::fixed(Money::from_rupees(100)).with_min_quantity(2));
        assert_eq!(tee.display_price(day(10)), Money::from_rupees(499));
    }

    #[test]
    fn test_tax_rate_from_bps() {
        let rate = TaxRate::from_bps(900);
        assert_eq!(rate.bps(), 900);
        assert_eq!(rate.to_decimal(), Decimal::new(9, 2));
        assert!((rate.percentage() - 9.0).abs() < 0.001);
    }

    #[test]
    fn test_category_parsing() {
        assert_eq!("tops".parse::<Category>().unwrap(), Category::Tops);
        assert_eq!(" Swimwear ".parse::<Category>().unwrap(), Category::Swimwear);
        assert!("hats".parse::<Category>().is_err());
        assert_eq!(Category::Activewear.to_string(), "activewear");
    }

    #[test]
    fn test_gender_parsing() {
        assert_eq!("women".parse::<Gender>().unwrap(), Gender::Women);
        assert_eq!("MEN".parse::<Gender>().unwrap(), Gender::Men);
        assert!("kids".parse::<Gender>().is_err());
        assert_eq!(Gender::default(), Gender::Unisex);
    }

    #[test]
    fn test_status_defaults_to_pending() {
        assert_eq!(ProductStatus::default(), ProductStatus::Pending);
        assert_eq!(VendorStatus::default(), VendorStatus::Pending);
        assert_eq!("rejected".parse::<ProductStatus>().unwrap(), ProductStatus::Rejected);
    }

    #[test]
    fn test_rating_defaults_to_zero() {
        let mut p = product(&["M"]);
        assert_eq!(p.rating_or_default(), 0.0);
        p.rating = Some(4.5);
        assert_eq!(p.rating_or_default(), 4.5);
    }

    #[test]
    fn test_sizes() {
        let p = product(&["S", "M", "L"]);
        assert!(p.offers_size("M"));
        assert!(!p.offers_size("XXL"));
        assert_eq!(p.default_size(), "S");

        let empty = product(&[]);
        assert_eq!(empty.default_size(), DEFAULT_SIZE);
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_value(product(&["M"])).unwrap();
        assert_eq!(json["vendorId"], "vendor1");
        assert_eq!(json["category"], "tops");
        assert_eq!(json["status"], "approved");
    }
}
