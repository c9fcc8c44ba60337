//! # Banner Commands
//!
//! The advertisement carousel, banner requests and banner moderation.
//!
//! ## Carousel
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ◄  [ Mega Fashion Festival ]  ►        ● ○ ○                          │
//! │                                                                         │
//! │  list_banners   ──► session.rotation = active banners for placement    │
//! │  rotate_banner  ──► next / previous / jump to elapsed time             │
//! │                     (counts a view on the banner now shown)            │
//! │  click_banner   ──► counts a click, returns the link                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Duration;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vibez_catalog::Catalog;
use vibez_core::{Banner, BannerPackage, BannerPlacement, BannerRotation};

use crate::error::ApiError;
use crate::state::{ConfigState, Session};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ListBannersArgs {
    /// Keeps the session's current placement when absent.
    pub placement: Option<BannerPlacement>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotateDirection {
    #[default]
    Next,
    Previous,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RotateBannerArgs {
    pub direction: RotateDirection,
    /// Jump to the slot for this much time since the carousel started,
    /// instead of stepping.
    pub elapsed_ms: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerArgs {
    pub banner_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBannerArgs {
    pub vendor_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub package: BannerPackage,
    /// Defaults to today.
    #[serde(default)]
    pub starts_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationAction {
    Approve,
    Reject,
    Expire,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerateBannerArgs {
    pub banner_id: String,
    pub action: ModerationAction,
}

/// The session's carousel.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerCarousel<'a> {
    pub placement: BannerPlacement,
    pub interval_secs: u64,
    pub rotation: &'a BannerRotation,
    pub current: Option<&'a Banner>,
    pub banners: Vec<&'a Banner>,
}

impl<'a> BannerCarousel<'a> {
    fn build(catalog: &'a Catalog, session: &'a Session) -> Self {
        BannerCarousel {
            placement: session.placement,
            interval_secs: session.rotation.interval().as_secs(),
            rotation: &session.rotation,
            current: session.rotation.current().and_then(|id| catalog.banners().get(id)),
            banners: catalog.banners().for_placement(session.placement),
        }
    }
}

/// What the client needs after a click.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BannerClick<'a> {
    pub banner_id: &'a str,
    pub link: Option<&'a str>,
    pub clicks: u64,
}

/// Loads the live banners for a placement into the session carousel.
pub fn list_banners<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    args: ListBannersArgs,
) -> BannerCarousel<'a> {
    debug!(placement = ?args.placement, "list_banners command");

    let placement = args.placement.unwrap_or(session.placement);
    session.reload_banners(catalog, placement, config);
    BannerCarousel::build(catalog, session)
}

/// Moves the carousel and counts a view for the banner now shown.
pub fn rotate_banner<'a>(
    catalog: &'a mut Catalog,
    session: &'a mut Session,
    args: RotateBannerArgs,
) -> Result<BannerCarousel<'a>, ApiError> {
    debug!(direction = ?args.direction, elapsed_ms = ?args.elapsed_ms, "rotate_banner command");

    let shown = match (args.elapsed_ms, args.direction) {
        (Some(ms), _) => session.rotation.sync_to(Duration::from_millis(ms)),
        (None, RotateDirection::Next) => session.rotation.advance(),
        (None, RotateDirection::Previous) => session.rotation.previous(),
    }
    .map(str::to_string);

    if let Some(id) = &shown {
        catalog.banners_mut().record_view(id)?;
    }

    let catalog: &'a Catalog = catalog;
    Ok(BannerCarousel::build(catalog, session))
}

/// Counts a click and hands back the banner's link.
pub fn click_banner(catalog: &mut Catalog, args: BannerArgs) -> Result<BannerClick<'_>, ApiError> {
    debug!(banner_id = %args.banner_id, "click_banner command");

    catalog.banners_mut().record_click(&args.banner_id)?;
    let banner = catalog
        .banners()
        .get(&args.banner_id)
        .ok_or_else(|| ApiError::not_found("Banner", &args.banner_id))?;

    Ok(BannerClick {
        banner_id: &banner.id,
        link: banner.link.as_deref(),
        clicks: banner.clicks,
    })
}

/// Files a banner request for a registered vendor. It runs for the
/// package's duration once an admin approves it.
pub fn submit_banner(
    catalog: &mut Catalog,
    today: NaiveDate,
    args: SubmitBannerArgs,
) -> Result<&Banner, ApiError> {
    debug!(vendor_id = %args.vendor_id, package = ?args.package, "submit_banner command");

    catalog.vendors().require(&args.vendor_id)?;
    Ok(catalog.banners_mut().submit(
        &args.vendor_id,
        &args.title,
        &args.description,
        args.package,
        args.starts_on.unwrap_or(today),
    )?)
}

/// Approves, rejects or expires a banner, then refreshes the session
/// carousel so the change shows immediately.
pub fn moderate_banner<'a>(
    catalog: &'a mut Catalog,
    session: &mut Session,
    config: &ConfigState,
    args: ModerateBannerArgs,
) -> Result<&'a Banner, ApiError> {
    debug!(banner_id = %args.banner_id, action = ?args.action, "moderate_banner command");

    let banners = catalog.banners_mut();
    match args.action {
        ModerationAction::Approve => banners.approve(&args.banner_id)?,
        ModerationAction::Reject => banners.reject(&args.banner_id)?,
        ModerationAction::Expire => banners.expire(&args.banner_id)?,
    };

    let placement = session.placement;
    session.reload_banners(catalog, placement, config);

    let catalog: &'a Catalog = catalog;
    catalog
        .banners()
        .get(&args.banner_id)
        .ok_or_else(|| ApiError::not_found("Banner", &args.banner_id))
}

/// Expires every active banner whose run has ended.
pub fn expire_banners(
    catalog: &mut Catalog,
    session: &mut Session,
    config: &ConfigState,
    today: NaiveDate,
) -> usize {
    debug!(%today, "expire_banners command");

    let expired = catalog.banners_mut().expire_past_end(today);
    if expired > 0 {
        let placement = session.placement;
        session.reload_banners(catalog, placement, config);
    }
    expired
}
