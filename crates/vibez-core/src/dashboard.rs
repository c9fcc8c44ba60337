//! # Dashboard Statistics
//!
//! Summary counts shown on the admin and vendor dashboards.

use serde::Serialize;
use ts_rs::TS;

use crate::types::{Product, ProductStatus, Vendor, VendorStatus};

/// Marketplace-wide counts for the admin dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_vendors: usize,
    pub approved_vendors: usize,
    pub pending_vendors: usize,
    pub total_products: usize,
    pub approved_products: usize,
    pub pending_products: usize,
    pub rejected_products: usize,
}

impl DashboardStats {
    pub fn compute(vendors: &[Vendor], products: &[Product]) -> Self {
        let mut stats = DashboardStats {
            total_vendors: vendors.len(),
            total_products: products.len(),
            ..Default::default()
        };

        for vendor in vendors {
            match vendor.status {
                VendorStatus::Approved => stats.approved_vendors += 1,
                VendorStatus::Pending => stats.pending_vendors += 1,
                VendorStatus::Rejected => {}
            }
        }

        for product in products {
            match product.status {
                ProductStatus::Approved => stats.approved_products += 1,
                ProductStatus::Pending => stats.pending_products += 1,
                ProductStatus::Rejected => stats.rejected_products += 1,
            }
        }

        stats
    }
}

/// Per-vendor counts for the vendor dashboard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct VendorStats {
    pub vendor_id: String,
    pub total_products: usize,
    pub approved_products: usize,
    pub pending_products: usize,
    pub rejected_products: usize,
    /// Mean rating over rated products; `None` if nothing is rated yet.
    pub average_rating: Option<f64>,
}

impl VendorStats {
    pub fn compute(vendor_id: &str, products: &[Product]) -> Self {
        let mut stats = VendorStats {
            vendor_id: vendor_id.to_string(),
            ..Default::default()
        };
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for product in products.iter().filter(|p| p.vendor_id == vendor_id) {
            stats.total_products += 1;
            match product.status {
                ProductStatus::Approved => stats.approved_products += 1,
                ProductStatus::Pending => stats.pending_products += 1,
                ProductStatus::Rejected => stats.rejected_products += 1,
            }
            if let Some(rating) = product.rating {
                rating_sum += rating;
                rated += 1;
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum / rated as f64);
        }
        stats
    }
}
