//! # Advertisement Banners
//!
//! Vendors buy banner slots as packages; admins approve them; the storefront
//! rotates active banners in a carousel.
//!
//! ## Banner Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  vendor request ──► Pending ──approve──► Active ──expire──► Expired    │
//! │                        │                                                │
//! │                        └──reject──► Rejected                            │
//! │                                                                         │
//! │  Revenue counts Active + Expired banners (the vendor has paid).        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Packages
//! | Package  | Price   | Days | Priority |
//! |----------|---------|------|----------|
//! | Basic    | ₹2999   | 7    | 1        |
//! | Premium  | ₹6999   | 14   | 2        |
//! | Platinum | ₹14999  | 30   | 3        |

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;

/// Default carousel interval.
pub const DEFAULT_ROTATION_INTERVAL: Duration = Duration::from_secs(5);

/// Minimum priority for banners outside the homepage.
const NON_HOMEPAGE_MIN_PRIORITY: u8 = 2;

// =============================================================================
// Package
// =============================================================================

/// A purchasable banner package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BannerPackage {
    Basic,
    Premium,
    Platinum,
}

impl BannerPackage {
    pub const ALL: [BannerPackage; 3] = [
        BannerPackage::Basic,
        BannerPackage::Premium,
        BannerPackage::Platinum,
    ];

    /// Display name ("Premium Banner").
    pub const fn name(&self) -> &'static str {
        match self {
            BannerPackage::Basic => "Basic Banner",
            BannerPackage::Premium => "Premium Banner",
            BannerPackage::Platinum => "Platinum Banner",
        }
    }

    pub const fn price(&self) -> Money {
        match self {
            BannerPackage::Basic => Money::from_rupees(2999),
            BannerPackage::Premium => Money::from_rupees(6999),
            BannerPackage::Platinum => Money::from_rupees(14999),
        }
    }

    pub const fn duration_days(&self) -> u64 {
        match self {
            BannerPackage::Basic => 7,
            BannerPackage::Premium => 14,
            BannerPackage::Platinum => 30,
        }
    }

    /// Higher priority banners show first and on more placements.
    pub const fn priority(&self) -> u8 {
        match self {
            BannerPackage::Basic => 1,
            BannerPackage::Premium => 2,
            BannerPackage::Platinum => 3,
        }
    }
}

impl FromStr for BannerPackage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().trim_end_matches(" banner") {
            "basic" => Ok(BannerPackage::Basic),
            "premium" => Ok(BannerPackage::Premium),
            "platinum" => Ok(BannerPackage::Platinum),
            _ => Err(ValidationError::not_allowed(
                "package",
                &["basic", "premium", "platinum"],
            )),
        }
    }
}

// =============================================================================
// Status & Placement
// =============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BannerStatus {
    #[default]
    Pending,
    Active,
    Rejected,
    Expired,
}

impl BannerStatus {
    pub const fn as_str(&self) -> &'static str {
        match self {
            BannerStatus::Pending => "pending",
            BannerStatus::Active => "active",
            BannerStatus::Rejected => "rejected",
            BannerStatus::Expired => "expired",
        }
    }

    /// Whether the vendor has been charged for the banner.
    pub const fn is_billed(&self) -> bool {
        matches!(self, BannerStatus::Active | BannerStatus::Expired)
    }
}

impl fmt::Display for BannerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where on the storefront a banner slot is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BannerPlacement {
    #[default]
    Homepage,
    Category,
    Product,
    Sidebar,
}

impl FromStr for BannerPlacement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "homepage" => Ok(BannerPlacement::Homepage),
            "category" => Ok(BannerPlacement::Category),
            "product" => Ok(BannerPlacement::Product),
            "sidebar" => Ok(BannerPlacement::Sidebar),
            _ => Err(ValidationError::not_allowed(
                "placement",
                &["homepage", "category", "product", "sidebar"],
            )),
        }
    }
}

// =============================================================================
// Banner
// =============================================================================

/// A banner request and, once approved, a live banner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    pub id: String,
    pub title: String,
    pub description: String,
    pub vendor_id: String,
    pub package: BannerPackage,
    #[serde(default)]
    pub status: BannerStatus,
    #[ts(as = "String")]
    pub starts_on: NaiveDate,
    #[ts(as = "String")]
    pub ends_on: NaiveDate,
    /// Amount the vendor pays for the package.
    pub amount: Money,
    #[serde(default)]
    pub views: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
}

impl Banner {
    /// A new pending request for `package`, running from `starts_on` for the
    /// package duration and priced at the package price.
    pub fn request(
        id: impl Into<String>,
        vendor_id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        package: BannerPackage,
        starts_on: NaiveDate,
    ) -> CoreResult<Self> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "title".to_string(),
            }
            .into());
        }

        let ends_on = starts_on
            .checked_add_days(Days::new(package.duration_days()))
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "start date".to_string(),
                reason: format!("{} is out of range", starts_on),
            })?;

        Ok(Banner {
            id: id.into(),
            title,
            description: description.into(),
            vendor_id: vendor_id.into(),
            package,
            status: BannerStatus::Pending,
            starts_on,
            ends_on,
            amount: package.price(),
            views: 0,
            clicks: 0,
            image: None,
            link: None,
        })
    }

    #[inline]
    pub fn priority(&self) -> u8 {
        self.package.priority()
    }

    /// Pending → Active.
    pub fn approve(&mut self) -> CoreResult<()> {
        self.transition(BannerStatus::Pending, BannerStatus::Active)
    }

    /// Pending → Rejected.
    pub fn reject(&mut self) -> CoreResult<()> {
        self.transition(BannerStatus::Pending, BannerStatus::Rejected)
    }

    /// Active → Expired.
    pub fn expire(&mut self) -> CoreResult<()> {
        self.transition(BannerStatus::Active, BannerStatus::Expired)
    }

    fn transition(&mut self, from: BannerStatus, to: BannerStatus) -> CoreResult<()> {
        if self.status != from {
            return Err(CoreError::InvalidStatusTransition {
                entity: "banner",
                id: self.id.clone(),
                from: self.status.to_string(),
                to: to.to_string(),
            });
        }
        self.status = to;
        Ok(())
    }

    /// Whether an active banner has run past its end date.
    pub fn is_past_end(&self, today: NaiveDate) -> bool {
        self.status == BannerStatus::Active && today > self.ends_on
    }

    pub fn record_view(&mut self) {
        self.views = self.views.saturating_add(1);
    }

    pub fn record_click(&mut self) {
        self.clicks = self.clicks.saturating_add(1);
    }

    /// Click-through rate in percent (0 when never viewed).
    pub fn click_through_rate(&self) -> f64 {
        if self.views == 0 {
            0.0
        } else {
            self.clicks as f64 / self.views as f64 * 100.0
        }
    }
}

// =============================================================================
// Placement & Rotation
// =============================================================================

/// Active banners eligible for `placement`, highest priority first.
///
/// The homepage shows every active banner; other placements only show
/// priority 2 and up. Equal priorities keep their input order.
pub fn banners_for_placement(banners: &[Banner], placement: BannerPlacement) -> Vec<&Banner> {
    let mut eligible: Vec<&Banner> = banners
        .iter()
        .filter(|b| b.status == BannerStatus::Active)
        .filter(|b| placement == BannerPlacement::Homepage || b.priority() >= NON_HOMEPAGE_MIN_PRIORITY)
        .collect();
    eligible.sort_by(|a, b| b.priority().cmp(&a.priority()));
    eligible
}

/// Fixed-interval carousel over a list of banner ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerRotation {
    banner_ids: Vec<String>,
    #[serde(skip)]
    interval: Duration,
    index: usize,
}

impl BannerRotation {
    pub fn new(banner_ids: Vec<String>, interval: Duration) -> Self {
        BannerRotation {
            banner_ids,
            interval,
            index: 0,
        }
    }

    /// Rotation over the banners eligible for `placement`.
    pub fn for_placement(banners: &[Banner], placement: BannerPlacement, interval: Duration) -> Self {
        let ids = banners_for_placement(banners, placement)
            .into_iter()
            .map(|b| b.id.clone())
            .collect();
        BannerRotation::new(ids, interval)
    }

    pub fn len(&self) -> usize {
        self.banner_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.banner_ids.is_empty()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// The banner currently shown; `None` when there is nothing to show.
    pub fn current(&self) -> Option<&str> {
        self.banner_ids.get(self.index).map(String::as_str)
    }

    /// Moves to the next banner, wrapping around.
    pub fn advance(&mut self) -> Option<&str> {
        if !self.is_empty() {
            self.index = (self.index + 1) % self.len();
        }
        self.current()
    }

    /// Moves to the previous banner, wrapping around.
    pub fn previous(&mut self) -> Option<&str> {
        if !self.is_empty() {
            self.index = (self.index + self.len() - 1) % self.len();
        }
        self.current()
    }

    /// Slot shown `elapsed` after the carousel started.
    ///
    /// A single banner never rotates. A zero interval never advances.
    pub fn index_at(&self, elapsed: Duration) -> Option<usize> {
        if self.is_empty() {
            return None;
        }
        if self.len() == 1 || self.interval.is_zero() {
            return Some(0);
        }
        let ticks = elapsed.as_nanos() / self.interval.as_nanos();
        Some((ticks % self.len() as u128) as usize)
    }

    /// Jumps to the slot for `elapsed` and returns its banner.
    pub fn sync_to(&mut self, elapsed: Duration) -> Option<&str> {
        if let Some(index) = self.index_at(elapsed) {
            self.index = index;
        }
        self.current()
    }
}

// =============================================================================
// Analytics
// =============================================================================

/// Banner marketing totals for the admin and vendor dashboards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BannerReport {
    pub total_revenue: Money,
    pub active: usize,
    pub pending: usize,
    pub total_views: u64,
    pub total_clicks: u64,
}

impl BannerReport {
    pub fn compute<'a, I>(banners: I) -> Self
    where
        I: IntoIterator<Item = &'a Banner>,
    {
        banners.into_iter().fold(BannerReport::default(), |mut report, b| {
            if b.status.is_billed() {
                report.total_revenue += b.amount;
            }
            match b.status {
                BannerStatus::Active => report.active += 1,
                BannerStatus::Pending => report.pending += 1,
                _ => {}
            }
            report.total_views = report.total_views.saturating_add(b.views);
            report.total_clicks = report.total_clicks.saturating_add(b.clicks);
            report
        })
    }

    /// Overall click-through rate in percent.
    pub fn click_through_rate(&self) -> f64 {
        if self.total_views == 0 {
            0.0
        } else {
            self.total_clicks as f64 / self.total_views as f64 * 100.0
        }
    }
}

/// Revenue earned from one package.
pub fn package_revenue(banners: &[Banner], package: BannerPackage) -> Money {
    banners
        .iter()
        .filter(|b| b.package == package && b.status.is_billed())
        .map(|b| b.amount)
        .sum()
}

/// The `limit` banners with the most clicks.
pub fn top_by_clicks(banners: &[Banner], limit: usize) -> Vec<&Banner> {
    let mut sorted: Vec<&Banner> = banners.iter().collect();
    sorted.sort_by(|a, b| b.clicks.cmp(&a.clicks));
    sorted.truncate(limit);
    sorted
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn banner(id: &str, package: BannerPackage, status: BannerStatus) -> Banner {
        let mut b = Banner::request(id, "vendor1", id, "", package, day(2024, 1, 10)).unwrap();
        b.status = status;
        b
    }

    #[test]
    fn test_request_uses_package_terms() {
        let b = Banner::request(
            "b1",
            "vendor1",
            "Summer Sale",
            "Up to 50% off",
            BannerPackage::Premium,
            day(2024, 1, 15),
        )
        .unwrap();
        assert_eq!(b.status, BannerStatus::Pending);
        assert_eq!(b.ends_on, day(2024, 1, 29));
        assert_eq!(b.amount, Money::from_rupees(6999));
        assert_eq!(b.priority(), 2);

        assert!(Banner::request("b2", "v", "  ", "", BannerPackage::Basic, day(2024, 1, 1)).is_err());
    }

    #[test]
    fn test_transitions() {
        let mut b = banner("b1", BannerPackage::Basic, BannerStatus::Pending);
        b.approve().unwrap();
        assert_eq!(b.status, BannerStatus::Active);
        assert!(matches!(
            b.approve(),
            Err(CoreError::InvalidStatusTransition { .. })
        ));
        assert!(b.reject().is_err());
        b.expire().unwrap();
        assert_eq!(b.status, BannerStatus::Expired);

        let mut b = banner("b2", BannerPackage::Basic, BannerStatus::Pending);
        assert!(b.expire().is_err());
        b.reject().unwrap();
        assert_eq!(b.status, BannerStatus::Rejected);
    }

    #[test]
    fn test_is_past_end() {
        let b = banner("b1", BannerPackage::Basic, BannerStatus::Active);
        assert!(!b.is_past_end(day(2024, 1, 17)));
        assert!(b.is_past_end(day(2024, 1, 18)));
    }

    #[test]
    fn test_placement_filtering() {
        let banners = vec![
            banner("premium", BannerPackage::Premium, BannerStatus::Active),
            banner("basic", BannerPackage::Basic, BannerStatus::Active),
            banner("platinum", BannerPackage::Platinum, BannerStatus::Active),
            banner("waiting", BannerPackage::Platinum, BannerStatus::Pending),
        ];

        let home: Vec<&str> = banners_for_placement(&banners, BannerPlacement::Homepage)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(home, vec!["platinum", "premium", "basic"]);

        let sidebar: Vec<&str> = banners_for_placement(&banners, BannerPlacement::Sidebar)
            .iter()
            .map(|b| b.id.as_str())
            .collect();
        assert_eq!(sidebar, vec!["platinum", "premium"]);
    }

    #[test]
    fn test_rotation_wraps() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut rotation = BannerRotation::new(ids, DEFAULT_ROTATION_INTERVAL);
        assert_eq!(rotation.current(), Some("a"));
        assert_eq!(rotation.advance(), Some("b"));
        assert_eq!(rotation.advance(), Some("c"));
        assert_eq!(rotation.advance(), Some("a"));
        assert_eq!(rotation.previous(), Some("c"));
    }

    #[test]
    fn test_rotation_index_at() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        let mut rotation = BannerRotation::new(ids, DEFAULT_ROTATION_INTERVAL);
        assert_eq!(rotation.index_at(Duration::from_secs(0)), Some(0));
        assert_eq!(rotation.index_at(Duration::from_millis(4_999)), Some(0));
        assert_eq!(rotation.index_at(Duration::from_secs(5)), Some(1));
        assert_eq!(rotation.index_at(Duration::from_secs(16)), Some(0));
        assert_eq!(rotation.sync_to(Duration::from_secs(11)), Some("c"));

        // sub-millisecond intervals still divide cleanly
        let ids = vec!["a".to_string(), "b".to_string()];
        let fast = BannerRotation::new(ids, Duration::from_micros(500));
        assert_eq!(fast.index_at(Duration::from_micros(400)), Some(0));
        assert_eq!(fast.index_at(Duration::from_micros(700)), Some(1));
        assert_eq!(fast.index_at(Duration::from_micros(1_000)), Some(0));
    }

    #[test]
    fn test_single_and_empty_rotation() {
        let mut single = BannerRotation::new(vec!["a".to_string()], DEFAULT_ROTATION_INTERVAL);
        assert_eq!(single.index_at(Duration::from_secs(60)), Some(0));
        assert_eq!(single.advance(), Some("a"));

        let mut empty = BannerRotation::new(Vec::new(), DEFAULT_ROTATION_INTERVAL);
        assert_eq!(empty.current(), None);
        assert_eq!(empty.advance(), None);
        assert_eq!(empty.index_at(Duration::from_secs(5)), None);
    }

    #[test]
    fn test_report_counts_billed_revenue() {
        let mut live = banner("live", BannerPackage::Platinum, BannerStatus::Active);
        live.views = 45_600;
        live.clicks = 3_200;
        let mut done = banner("done", BannerPackage::Basic, BannerStatus::Expired);
        done.views = 12_500;
        done.clicks = 890;
        let waiting = banner("waiting", BannerPackage::Premium, BannerStatus::Pending);
        let banners = vec![live, done, waiting];

        let report = BannerReport::compute(&banners);
        assert_eq!(report.total_revenue, Money::from_rupees(14999 + 2999));
        assert_eq!(report.active, 1);
        assert_eq!(report.pending, 1);
        assert_eq!(report.total_views, 58_100);
        assert_eq!(report.total_clicks, 4_090);

        assert_eq!(package_revenue(&banners, BannerPackage::Premium), Money::zero());
        assert_eq!(top_by_clicks(&banners, 1)[0].id, "live");
    }

    #[test]
    fn test_click_through_rate() {
        let mut b = banner("b", BannerPackage::Basic, BannerStatus::Active);
        assert_eq!(b.click_through_rate(), 0.0);
        b.views = 200;
        b.clicks = 10;
        assert!((b.click_through_rate() - 5.0).abs() < f64::EPSILON);
        b.record_view();
        b.record_click();
        assert_eq!((b.views, b.clicks), (201, 11));
    }

    #[test]
    fn test_package_parsing() {
        assert_eq!("Premium Banner".parse::<BannerPackage>().unwrap(), BannerPackage::Premium);
        assert_eq!("platinum".parse::<BannerPackage>().unwrap(), BannerPackage::Platinum);
        assert!("gold".parse::<BannerPackage>().is_err());
    }
}
