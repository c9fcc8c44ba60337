//! # Catalog Record Loading
//!
//! The boundary where loosely-shaped catalog records become complete
//! [`Product`] values.
//!
//! ## Defaults Applied Here
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  raw field          missing / empty        typed field                 │
//! │  ─────────          ───────────────        ───────────                 │
//! │  sizes              ──► ["One Size"]       Vec<String> (never empty)   │
//! │  gender             ──► unisex             Gender                      │
//! │  status             ──► pending            ProductStatus               │
//! │  rating             ──► None               Option<f64> (0 when sorted) │
//! │  trending           ──► false              bool                        │
//! │  price  "499.5"/499 ──► exact paise        Money                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything past this module can rely on a product being complete.

use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::warn;
use vibez_core::validation::{
    validate_price, validate_product_name, validate_rating, validate_vendor_id,
};
use vibez_core::{
    Banner, Category, Discount, Gender, Money, Product, ProductId, ProductStatus, Vendor,
    DEFAULT_SIZE,
};

use crate::error::{CatalogError, CatalogResult};

/// A product record as it appears in a catalog file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProduct {
    pub id: ProductId,
    pub name: String,
    /// Rupees, as a JSON number or a decimal string.
    pub price: Decimal,
    pub category: String,
    #[serde(alias = "vendor")]
    pub vendor_id: String,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub sizes: Option<Vec<String>>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub trending: Option<bool>,
    #[serde(default)]
    pub discount: Option<Discount>,
}

impl TryFrom<RawProduct> for Product {
    type Error = CatalogError;

    fn try_from(raw: RawProduct) -> Result<Self, Self::Error> {
        let id = raw.id;
        let invalid = |reason: String| CatalogError::InvalidRecord {
            id: id.to_string(),
            reason,
        };

        validate_product_name(&raw.name).map_err(|e| invalid(e.to_string()))?;
        validate_vendor_id(&raw.vendor_id).map_err(|e| invalid(e.to_string()))?;

        let price = Money::try_from_decimal(raw.price).map_err(|e| invalid(e.to_string()))?;
        validate_price(price).map_err(|e| invalid(e.to_string()))?;

        let category = raw
            .category
            .parse::<Category>()
            .map_err(|e| invalid(e.to_string()))?;

        let gender = match raw.gender.as_deref() {
            Some(g) => g
                .parse::<Gender>()
                .map_err(|e| invalid(e.to_string()))?,
            None => Gender::default(),
        };

        let status = match raw.status.as_deref() {
            Some(s) => s
                .parse::<ProductStatus>()
                .map_err(|e| invalid(e.to_string()))?,
            None => ProductStatus::default(),
        };

        if let Some(rating) = raw.rating {
            validate_rating(rating).map_err(|e| invalid(e.to_string()))?;
        }

        if let Some(discount) = &raw.discount {
            discount.validate(price).map_err(|e| invalid(e.to_string()))?;
        }

        let sizes: Vec<String> = raw
            .sizes
            .unwrap_or_default()
            .into_iter()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let sizes = if sizes.is_empty() {
            vec![DEFAULT_SIZE.to_string()]
        } else {
            sizes
        };

        Ok(Product {
            id,
            name: raw.name.trim().to_string(),
            price,
            category,
            gender,
            vendor_id: raw.vendor_id,
            status,
            sizes,
            rating: raw.rating,
            description: raw.description,
            image: raw.image,
            badge: raw.badge,
            trending: raw.trending.unwrap_or(false),
            discount: raw.discount,
        })
    }
}

/// A whole catalog file: `{ "vendors": [...], "products": [...], "banners": [...] }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCatalog {
    pub vendors: Vec<Vendor>,
    pub products: Vec<RawProduct>,
    pub banners: Vec<Banner>,
}

/// Converts raw product records, rejecting the whole batch on the first bad
/// record or repeated id.
pub fn load_products(raw: Vec<RawProduct>) -> CatalogResult<Vec<Product>> {
    let mut products: Vec<Product> = Vec::with_capacity(raw.len());

    for record in raw {
        if products.iter().any(|p| p.id == record.id) {
            return Err(CatalogError::duplicate("product id", record.id.to_string()));
        }

        let product = Product::try_from(record)?;
        if product.rating.is_none() {
            warn!(product_id = product.id, "Product has no rating, sorts as 0");
        }
        products.push(product);
    }

    Ok(products)
}

/// Checks vendor records: ids must be usable inside cart line ids and
/// must not repeat.
pub fn load_vendors(vendors: Vec<Vendor>) -> CatalogResult<Vec<Vendor>> {
    for (i, vendor) in vendors.iter().enumerate() {
        validate_vendor_id(&vendor.id).map_err(|e| CatalogError::InvalidRecord {
            id: vendor.id.clone(),
            reason: e.to_string(),
        })?;

        if vendors[..i].iter().any(|v| v.id == vendor.id) {
            return Err(CatalogError::duplicate("vendor id", vendor.id.clone()));
        }
    }

    Ok(vendors)
}
