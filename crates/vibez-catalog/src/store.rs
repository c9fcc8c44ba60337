//! # Catalog Store
//!
//! Owns the three repositories and knows how to fill them: from the built-in
//! seed data or from a JSON catalog file.

use std::fs;
use std::path::Path;

use tracing::{debug, info};
use vibez_core::{DashboardStats, FilterCriteria, Product, ProductId, Vendor, VendorStats};

use crate::error::{CatalogError, CatalogResult};
use crate::loader::{load_products, load_vendors, RawCatalog};
use crate::repository::banner::BannerRepository;
use crate::repository::product::{NewProduct, ProductRepository};
use crate::repository::vendor::VendorRepository;
use crate::seed;

/// The in-memory marketplace.
///
/// ## Usage
/// ```rust
/// use vibez_catalog::Catalog;
/// use vibez_core::FilterCriteria;
///
/// let catalog = Catalog::seeded();
/// let shop_page = catalog.browse(&FilterCriteria::default());
/// assert_eq!(shop_page.len(), 7);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: ProductRepository,
    vendors: VendorRepository,
    banners: BannerRepository,
}

impl Catalog {
    /// The built-in seeded marketplace.
    pub fn seeded() -> Self {
        Catalog {
            products: ProductRepository::new(seed::products()),
            vendors: VendorRepository::new(seed::vendors()),
            banners: BannerRepository::new(seed::banners()),
        }
    }

    /// Parses a JSON catalog document.
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        let raw: RawCatalog = serde_json::from_str(json)?;
        let vendors = load_vendors(raw.vendors)?;
        let products = load_products(raw.products)?;

        debug!(
            vendors = vendors.len(),
            products = products.len(),
            banners = raw.banners.len(),
            "Catalog parsed"
        );

        Ok(Catalog {
            products: ProductRepository::new(products),
            vendors: VendorRepository::new(vendors),
            banners: BannerRepository::new(raw.banners),
        })
    }

    /// Reads a JSON catalog file.
    pub fn load(path: impl AsRef<Path>) -> CatalogResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let catalog = Catalog::from_json(&json)?;
        info!(path = %path.display(), "Catalog loaded");
        Ok(catalog)
    }

    pub fn products(&self) -> &ProductRepository {
        &self.products
    }

    pub fn products_mut(&mut self) -> &mut ProductRepository {
        &mut self.products
    }

    pub fn vendors(&self) -> &VendorRepository {
        &self.vendors
    }

    pub fn vendors_mut(&mut self) -> &mut VendorRepository {
        &mut self.vendors
    }

    pub fn banners(&self) -> &BannerRepository {
        &self.banners
    }

    pub fn banners_mut(&mut self) -> &mut BannerRepository {
        &mut self.banners
    }

    /// The customer shop page for `criteria`.
    pub fn browse(&self, criteria: &FilterCriteria) -> Vec<&Product> {
        criteria.apply(self.products.all())
    }

    /// A vendor submission; the vendor must be registered.
    pub fn submit_product(&mut self, new: NewProduct) -> CatalogResult<&Product> {
        self.vendors.require(&new.vendor_id)?;
        self.products.create(new)
    }

    /// Removes a vendor together with its products. Its banners stay for
    /// the revenue history.
    pub fn delete_vendor(&mut self, vendor_id: &str) -> CatalogResult<(Vendor, Vec<Product>)> {
        let vendor = self.vendors.delete(vendor_id)?;

        let ids: Vec<ProductId> = self
            .products
            .by_vendor(vendor_id)
            .iter()
            .map(|p| p.id)
            .collect();
        let products = ids
            .into_iter()
            .map(|id| self.products.delete(id))
            .collect::<CatalogResult<Vec<Product>>>()?;

        info!(vendor_id = %vendor_id, products = products.len(), "Vendor removed from catalog");
        Ok((vendor, products))
    }

    /// Admin dashboard counts.
    pub fn dashboard(&self) -> DashboardStats {
        DashboardStats::compute(self.vendors.list(), self.products.all())
    }

    /// Vendor dashboard counts.
    pub fn vendor_stats(&self, vendor_id: &str) -> CatalogResult<VendorStats> {
        self.vendors.require(vendor_id)?;
        Ok(VendorStats::compute(vendor_id, self.products.all()))
    }
}
