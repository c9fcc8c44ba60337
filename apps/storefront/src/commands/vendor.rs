//! # Vendor Commands
//!
//! The vendor dashboard: registration, product submissions, edits and
//! discounts.
//!
//! A vendor may only touch its own products; acting on another vendor's
//! product answers `FORBIDDEN`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use vibez_catalog::{Catalog, NewProduct, NewVendor, ProductUpdate};
use vibez_core::banner::BannerReport;
use vibez_core::{Banner, Discount, DiscountKind, Product, ProductId, Vendor, VendorStats};

use super::catalog::ProductCard;
use crate::error::ApiError;
use crate::state::ConfigState;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorArgs {
    pub vendor_id: String,
}

/// Everything on the vendor dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorDashboard<'a> {
    pub vendor: &'a Vendor,
    pub stats: VendorStats,
    /// All of the vendor's products, whatever their review status.
    pub products: Vec<ProductCard<'a>>,
    pub banners: Vec<&'a Banner>,
    pub banner_report: BannerReport,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VendorProductArgs {
    pub vendor_id: String,
    pub product_id: ProductId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductArgs {
    pub vendor_id: String,
    pub product_id: ProductId,
    #[serde(flatten)]
    pub update: ProductUpdate,
}

/// Discount terms as sent by the vendor form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountTerms {
    pub kind: DiscountKind,
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
    #[serde(default)]
    pub ends_on: Option<NaiveDate>,
    #[serde(default)]
    pub min_quantity: Option<u32>,
}

impl From<DiscountTerms> for Discount {
    fn from(terms: DiscountTerms) -> Self {
        let discount = match terms.kind {
            DiscountKind::Percentage(bps) => Discount::percentage(bps),
            DiscountKind::Fixed(amount) => Discount::fixed(amount),
        }
        .between(terms.starts_on, terms.ends_on);

        match terms.min_quantity {
            Some(min) => discount.with_min_quantity(min),
            None => discount,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDiscountArgs {
    pub vendor_id: String,
    pub product_id: ProductId,
    /// `null` removes the current discount.
    #[serde(default)]
    pub discount: Option<DiscountTerms>,
}

/// Registers a new vendor account. It waits for admin approval.
pub fn register_vendor(catalog: &mut Catalog, args: NewVendor) -> Result<&Vendor, ApiError> {
    debug!(name = %args.name, "register_vendor command");
    Ok(catalog.vendors_mut().create(args)?)
}

/// The vendor dashboard.
pub fn vendor_products<'a>(
    catalog: &'a Catalog,
    config: &ConfigState,
    today: NaiveDate,
    args: VendorArgs,
) -> Result<VendorDashboard<'a>, ApiError> {
    debug!(vendor_id = %args.vendor_id, "vendor_products command");

    let vendor = catalog.vendors().require(&args.vendor_id)?;
    let stats = catalog.vendor_stats(&args.vendor_id)?;

    Ok(VendorDashboard {
        vendor,
        stats,
        products: catalog
            .products()
            .by_vendor(&args.vendor_id)
            .into_iter()
            .map(|p| ProductCard::new(p, config, today))
            .collect(),
        banners: catalog.banners().by_vendor(&args.vendor_id),
        banner_report: catalog.banners().report(Some(&args.vendor_id)),
    })
}

/// Submits a new product. It stays hidden from customers until an admin
/// approves it.
pub fn submit_product(catalog: &mut Catalog, args: NewProduct) -> Result<&Product, ApiError> {
    debug!(vendor_id = %args.vendor_id, name = %args.name, "submit_product command");
    Ok(catalog.submit_product(args)?)
}

/// Edits one of the vendor's products.
pub fn update_product(catalog: &mut Catalog, args: UpdateProductArgs) -> Result<&Product, ApiError> {
    debug!(vendor_id = %args.vendor_id, product_id = args.product_id, "update_product command");

    require_owner(catalog, &args.vendor_id, args.product_id)?;
    Ok(catalog.products_mut().update(args.product_id, args.update)?)
}

/// Withdraws one of the vendor's products from the catalog. Carts that
/// hold it keep their lines at the captured price.
pub fn delete_product(catalog: &mut Catalog, args: VendorProductArgs) -> Result<Product, ApiError> {
    debug!(vendor_id = %args.vendor_id, product_id = args.product_id, "delete_product command");

    require_owner(catalog, &args.vendor_id, args.product_id)?;
    Ok(catalog.products_mut().delete(args.product_id)?)
}

/// Puts a discount on (or takes it off) one of the vendor's products.
///
/// ## Example
/// ```json
/// {"command": "set_discount", "args": {
///   "vendorId": "vendor1", "productId": 1,
///   "discount": {"kind": {"type": "percentage", "value": 2000}, "endsOn": "2024-12-31"}
/// }}
/// ```
pub fn set_discount(catalog: &mut Catalog, args: SetDiscountArgs) -> Result<&Product, ApiError> {
    debug!(vendor_id = %args.vendor_id, product_id = args.product_id, "set_discount command");

    require_owner(catalog, &args.vendor_id, args.product_id)?;

    let products = catalog.products_mut();
    match args.discount {
        Some(terms) => {
            let discount = Discount::from(terms);
            info!(product_id = args.product_id, discount = %discount.label(), "Vendor discount set");
            Ok(products.set_discount(args.product_id, discount)?)
        }
        None => Ok(products.clear_discount(args.product_id)?),
    }
}

fn require_owner(catalog: &Catalog, vendor_id: &str, product_id: ProductId) -> Result<(), ApiError> {
    let product = catalog.products().require(product_id)?;
    if product.vendor_id != vendor_id {
        return Err(ApiError::forbidden(format!(
            "Product {} does not belong to vendor {}",
            product_id, vendor_id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vibez_core::{Category, Gender, Money, ProductStatus, SubscriptionPlan, VendorStatus};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn test_vendor_dashboard() {
        let catalog = Catalog::seeded();
        let config = ConfigState::default();

        let dashboard = vendor_products(
            &catalog,
            &config,
            today(),
            VendorArgs {
                vendor_id: "vendor3".to_string(),
            },
        )
        .unwrap();

        assert_eq!(dashboard.vendor.name, "Trend Zone");
        // Vendors see their pending products too
        assert_eq!(dashboard.products.len(), 2);
        assert_eq!(dashboard.stats.pending_products, 1);
        assert_eq!(dashboard.banners.len(), 1);
        assert_eq!(dashboard.banner_report.total_revenue, Money::from_rupees(14999));

        let err = vendor_products(
            &catalog,
            &config,
            today(),
            VendorArgs {
                vendor_id: "vendor9".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_register_vendor() {
        let mut catalog = Catalog::seeded();
        let vendor = register_vendor(
            &mut catalog,
            NewVendor {
                name: "Urban Threads".to_string(),
                email: "hello@urbanthreads.in".to_string(),
                commission: Some(15),
                subscription_plan: SubscriptionPlan::Basic,
            },
        )
        .unwrap();
        assert_eq!(vendor.id, "vendor4");
        assert_eq!(vendor.status, VendorStatus::Pending);
    }

    #[test]
    fn test_submit_product() {
        let mut catalog = Catalog::seeded();
        let args: NewProduct = serde_json::from_str(
            r#"{"name": "Denim Jacket", "price": 249900, "category": "tops", "gender": "women", "vendorId": "vendor2", "sizes": ["S", "M"]}"#,
        )
        .unwrap();

        let product = submit_product(&mut catalog, args).unwrap();
        assert_eq!(product.id, 9);
        assert_eq!(product.status, ProductStatus::Pending);
        assert_eq!(product.price, Money::from_rupees(2499));
        assert_eq!(product.gender, Gender::Women);
        assert_eq!(product.category, Category::Tops);
    }

    #[test]
    fn test_update_product_checks_owner() {
        let mut catalog = Catalog::seeded();
        let args = |vendor_id: &str| UpdateProductArgs {
            vendor_id: vendor_id.to_string(),
            product_id: 1,
            update: ProductUpdate {
                price: Some(Money::from_rupees(549)),
                ..ProductUpdate::default()
            },
        };

        let err = update_product(&mut catalog, args("vendor2")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let product = update_product(&mut catalog, args("vendor1")).unwrap();
        assert_eq!(product.price, Money::from_rupees(549));
    }

    #[test]
    fn test_delete_product_checks_owner() {
        let mut catalog = Catalog::seeded();
        let args = |vendor_id: &str| VendorProductArgs {
            vendor_id: vendor_id.to_string(),
            product_id: 3,
        };

        let err = delete_product(&mut catalog, args("vendor1")).unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let removed = delete_product(&mut catalog, args("vendor2")).unwrap();
        assert_eq!(removed.id, 3);
        assert!(catalog.products().get_by_id(3).is_none());

        let err = delete_product(&mut catalog, args("vendor2")).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_set_and_clear_discount() {
        let mut catalog = Catalog::seeded();
        let args: SetDiscountArgs = serde_json::from_str(
            r#"{"vendorId": "vendor1", "productId": 6,
                "discount": {"kind": {"type": "fixed", "value": 50000}, "minQuantity": 2}}"#,
        )
        .unwrap();

        let product = set_discount(&mut catalog, args).unwrap();
        let discount = product.discount.unwrap();
        assert_eq!(discount.kind, DiscountKind::Fixed(Money::from_rupees(500)));
        assert_eq!(discount.min_quantity, 2);

        let product = set_discount(
            &mut catalog,
            SetDiscountArgs {
                vendor_id: "vendor1".to_string(),
                product_id: 6,
                discount: None,
            },
        )
        .unwrap();
        assert!(product.discount.is_none());
    }

    #[test]
    fn test_set_discount_rejections() {
        let mut catalog = Catalog::seeded();
        let terms = |bps| DiscountTerms {
            kind: DiscountKind::Percentage(bps),
            starts_on: None,
            ends_on: None,
            min_quantity: None,
        };

        let err = set_discount(
            &mut catalog,
            SetDiscountArgs {
                vendor_id: "vendor1".to_string(),
                product_id: 3,
                discount: Some(terms(1000)),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::Forbidden);

        let err = set_discount(
            &mut catalog,
            SetDiscountArgs {
                vendor_id: "vendor2".to_string(),
                product_id: 3,
                discount: Some(terms(0)),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
