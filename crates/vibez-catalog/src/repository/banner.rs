//! # Banner Repository
//!
//! Banner requests, admin moderation and view/click tracking.

use chrono::NaiveDate;
use tracing::{debug, info};
use vibez_core::banner::{banners_for_placement, BannerReport};
use vibez_core::{Banner, BannerPackage, BannerPlacement, CoreResult};

use crate::error::{CatalogError, CatalogResult};

const BANNER_ID_PREFIX: &str = "banner";

/// Repository for advertisement banners.
#[derive(Debug, Clone, Default)]
pub struct BannerRepository {
    banners: Vec<Banner>,
}

impl BannerRepository {
    pub fn new(banners: Vec<Banner>) -> Self {
        BannerRepository { banners }
    }

    pub fn list(&self) -> &[Banner] {
        &self.banners
    }

    pub fn get(&self, id: &str) -> Option<&Banner> {
        self.banners.iter().find(|b| b.id == id)
    }

    /// Banners requested by one vendor.
    pub fn by_vendor(&self, vendor_id: &str) -> Vec<&Banner> {
        self.banners.iter().filter(|b| b.vendor_id == vendor_id).collect()
    }

    /// Active banners for a storefront slot, highest priority first.
    pub fn for_placement(&self, placement: BannerPlacement) -> Vec<&Banner> {
        banners_for_placement(&self.banners, placement)
    }

    /// Files a new pending banner request.
    pub fn submit(
        &mut self,
        vendor_id: &str,
        title: &str,
        description: &str,
        package: BannerPackage,
        starts_on: NaiveDate,
    ) -> CatalogResult<&Banner> {
        let id = self.next_id();
        let banner = Banner::request(id.as_str(), vendor_id, title, description, package, starts_on)?;

        info!(banner_id = %id, vendor_id = %vendor_id, package = package.name(), "Banner requested");
        self.banners.push(banner);
        self.require(&id)
    }

    /// Pending → Active.
    pub fn approve(&mut self, id: &str) -> CatalogResult<&Banner> {
        self.moderate(id, Banner::approve)
    }

    /// Pending → Rejected.
    pub fn reject(&mut self, id: &str) -> CatalogResult<&Banner> {
        self.moderate(id, Banner::reject)
    }

    /// Active → Expired.
    pub fn expire(&mut self, id: &str) -> CatalogResult<&Banner> {
        self.moderate(id, Banner::expire)
    }

    /// Expires every active banner whose end date is before `today`.
    /// Returns how many were expired.
    pub fn expire_past_end(&mut self, today: NaiveDate) -> usize {
        let mut expired = 0;
        for banner in self.banners.iter_mut().filter(|b| b.is_past_end(today)) {
            if banner.expire().is_ok() {
                expired += 1;
            }
        }
        if expired > 0 {
            info!(count = expired, %today, "Banners expired");
        }
        expired
    }

    pub fn record_view(&mut self, id: &str) -> CatalogResult<()> {
        self.require_mut(id)?.record_view();
        Ok(())
    }

    pub fn record_click(&mut self, id: &str) -> CatalogResult<()> {
        self.require_mut(id)?.record_click();
        debug!(banner_id = %id, "Banner clicked");
        Ok(())
    }

    /// Totals across every banner, or one vendor's banners.
    pub fn report(&self, vendor_id: Option<&str>) -> BannerReport {
        BannerReport::compute(
            self.banners
                .iter()
                .filter(|b| vendor_id.map_or(true, |v| b.vendor_id == v)),
        )
    }

    fn moderate(&mut self, id: &str, action: fn(&mut Banner) -> CoreResult<()>) -> CatalogResult<&Banner> {
        let banner = self.require_mut(id)?;
        action(banner)?;

        info!(banner_id = %id, status = %banner.status, "Banner moderated");
        Ok(&*banner)
    }

    fn require(&self, id: &str) -> CatalogResult<&Banner> {
        self.get(id).ok_or_else(|| CatalogError::not_found("Banner", id))
    }

    fn require_mut(&mut self, id: &str) -> CatalogResult<&mut Banner> {
        self.banners
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| CatalogError::not_found("Banner", id))
    }

    fn next_id(&self) -> String {
        let next = self
            .banners
            .iter()
            .filter_map(|b| b.id.strip_prefix(BANNER_ID_PREFIX))
            .filter_map(|n| n.parse::<u32>().ok())
            .max()
            .map_or(1, |max| max + 1);
        format!("{}{}", BANNER_ID_PREFIX, next)
    }
}
