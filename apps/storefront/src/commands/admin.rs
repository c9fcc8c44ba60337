//! # Admin Commands
//!
//! Product and vendor moderation plus the admin dashboard.
//!
//! ## Moderation
//! ```text
//! vendor submits ──► pending ──moderate_product(approved)──► shop page
//!                       │
//!                       └─────moderate_product(rejected)──► hidden
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use vibez_catalog::Catalog;
use vibez_core::banner::{package_revenue, top_by_clicks, BannerReport};
use vibez_core::{
    Banner, BannerPackage, DashboardStats, Money, Product, ProductId, ProductStatus, Vendor,
    VendorStatus,
};

use crate::error::ApiError;

/// Banners listed under "top performers".
const TOP_BANNER_COUNT: usize = 3;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateProductArgs {
    pub product_id: ProductId,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateVendorArgs {
    pub vendor_id: String,
    pub status: VendorStatus,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteVendorArgs {
    pub vendor_id: String,
}

/// A removed vendor and the ids of the products that went with it.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedVendor {
    pub vendor: Vendor,
    pub removed_products: Vec<ProductId>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchVendorsArgs {
    pub term: String,
    pub status: Option<VendorStatus>,
}

/// Everything on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard<'a> {
    pub stats: DashboardStats,
    pub pending_products: Vec<&'a Product>,
    pub pending_vendors: Vec<&'a Vendor>,
    pub banner_report: BannerReport,
    /// Percent, across every banner.
    pub click_through_rate: f64,
    pub top_banners: Vec<&'a Banner>,
    /// Billed banner revenue per package.
    pub package_revenue: Vec<PackageRevenue>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRevenue {
    pub package: BannerPackage,
    pub name: &'static str,
    pub revenue: Money,
}

/// Approves, rejects or re-queues a product.
pub fn moderate_product(catalog: &mut Catalog, args: ModerateProductArgs) -> Result<&Product, ApiError> {
    debug!(product_id = args.product_id, status = %args.status, "moderate_product command");
    Ok(catalog.products_mut().set_status(args.product_id, args.status)?)
}

/// Approves or rejects a vendor account.
pub fn moderate_vendor(catalog: &mut Catalog, args: ModerateVendorArgs) -> Result<&Vendor, ApiError> {
    debug!(vendor_id = %args.vendor_id, status = %args.status, "moderate_vendor command");
    Ok(catalog.vendors_mut().set_status(&args.vendor_id, args.status)?)
}

/// Removes a vendor account and all of its products.
pub fn delete_vendor(catalog: &mut Catalog, args: DeleteVendorArgs) -> Result<DeletedVendor, ApiError> {
    debug!(vendor_id = %args.vendor_id, "delete_vendor command");

    let (vendor, products) = catalog.delete_vendor(&args.vendor_id)?;
    Ok(DeletedVendor {
        vendor,
        removed_products: products.iter().map(|p| p.id).collect(),
    })
}

/// Vendor management search (name or email).
pub fn search_vendors(catalog: &Catalog, args: SearchVendorsArgs) -> Vec<&Vendor> {
    debug!(term = %args.term, status = ?args.status, "search_vendors command");
    catalog.vendors().search(&args.term, args.status)
}

/// The admin dashboard.
pub fn dashboard(catalog: &Catalog) -> AdminDashboard<'_> {
    debug!("dashboard command");

    let banner_report = catalog.banners().report(None);
    AdminDashboard {
        stats: catalog.dashboard(),
        pending_products: catalog.products().list(Some(ProductStatus::Pending)),
        pending_vendors: catalog.vendors().search("", Some(VendorStatus::Pending)),
        click_through_rate: banner_report.click_through_rate(),
        banner_report,
        top_banners: top_by_clicks(catalog.banners().list(), TOP_BANNER_COUNT),
        package_revenue: BannerPackage::ALL
            .iter()
            .map(|&package| PackageRevenue {
                package,
                name: package.name(),
                revenue: package_revenue(catalog.banners().list(), package),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vibez_core::FilterCriteria;

    #[test]
    fn test_moderate_product() {
        let mut catalog = Catalog::seeded();
        let args: ModerateProductArgs =
            serde_json::from_str(r#"{"productId": 5, "status": "approved"}"#).unwrap();

        let product = moderate_product(&mut catalog, args).unwrap();
        assert_eq!(product.status, ProductStatus::Approved);
        assert_eq!(catalog.browse(&FilterCriteria::default()).len(), 8);

        moderate_product(
            &mut catalog,
            ModerateProductArgs {
                product_id: 3,
                status: ProductStatus::Rejected,
            },
        )
        .unwrap();
        assert_eq!(catalog.browse(&FilterCriteria::default()).len(), 7);

        let err = moderate_product(
            &mut catalog,
            ModerateProductArgs {
                product_id: 42,
                status: ProductStatus::Approved,
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_moderate_vendor() {
        let mut catalog = Catalog::seeded();
        let vendor = moderate_vendor(
            &mut catalog,
            ModerateVendorArgs {
                vendor_id: "vendor3".to_string(),
                status: VendorStatus::Approved,
            },
        )
        .unwrap();
        assert_eq!(vendor.status, VendorStatus::Approved);
        assert_eq!(catalog.dashboard().pending_vendors, 0);
    }

    #[test]
    fn test_delete_vendor() {
        let mut catalog = Catalog::seeded();
        let deleted = delete_vendor(
            &mut catalog,
            DeleteVendorArgs {
                vendor_id: "vendor3".to_string(),
            },
        )
        .unwrap();
        assert_eq!(deleted.vendor.id, "vendor3");
        assert_eq!(deleted.removed_products.len(), 2);
        assert_eq!(catalog.dashboard().total_vendors, 2);

        let err = delete_vendor(
            &mut catalog,
            DeleteVendorArgs {
                vendor_id: "vendor3".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_search_vendors() {
        let catalog = Catalog::seeded();
        let found = search_vendors(
            &catalog,
            SearchVendorsArgs {
                term: "ZONE".to_string(),
                status: None,
            },
        );
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "vendor3");
    }

    #[test]
    fn test_dashboard() {
        let catalog = Catalog::seeded();
        let dashboard = dashboard(&catalog);

        assert_eq!(dashboard.stats.total_products, 8);
        assert_eq!(dashboard.pending_products.len(), 1);
        assert_eq!(dashboard.pending_products[0].name, "Summer Dress");
        assert_eq!(dashboard.pending_vendors.len(), 1);
        assert_eq!(dashboard.banner_report.active, 3);

        let top: Vec<&str> = dashboard.top_banners.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(top, vec!["banner3", "banner1", "banner2"]);
        assert!(dashboard.click_through_rate > 6.0 && dashboard.click_through_rate < 7.0);

        assert_eq!(dashboard.package_revenue.len(), BannerPackage::ALL.len());
        let platinum = dashboard
            .package_revenue
            .iter()
            .find(|r| r.package == BannerPackage::Platinum)
            .unwrap();
        assert_eq!(platinum.revenue, Money::from_rupees(14999));
        let summed: Money = dashboard.package_revenue.iter().map(|r| r.revenue).sum();
        assert_eq!(summed, dashboard.banner_report.total_revenue);
    }
}
