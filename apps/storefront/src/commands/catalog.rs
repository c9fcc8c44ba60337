//! # Catalog Commands
//!
//! The customer shop page: browsing, filtering, sorting and product detail.
//!
//! ## Shop Page Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Sidebar                        │  Results                              │
//! │  ───────                        │  ───────                              │
//! │  Search  [ shirt        ]       │  Sort: [Price: Low to High ▼]         │
//! │  Category ( ) All (•) Tops      │                                       │
//! │  Gender   (•) All ( ) Men       │  ┌────────┐ ┌────────┐ ┌────────┐    │
//! │  Price    ₹0 ────●──── ₹10000   │  │ ₹499   │ │ ₹1599  │ │ ₹2999  │    │
//! │                                 │  └────────┘ └────────┘ └────────┘    │
//! │  set_filter({...}) ─────────────┼──► session.criteria ──► browse       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The criteria live in the session, so every call answers with the page
//! for the criteria after the change.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;
use vibez_catalog::Catalog;
use vibez_core::validation::validate_search_query;
use vibez_core::{
    Category, CoreError, Criterion, FilterCriteria, Gender, Money, Product, ProductId, SortKey, Vendor,
};

use crate::error::ApiError;
use crate::state::{ConfigState, Session};

/// A product as it appears on a listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard<'a> {
    #[serde(flatten)]
    pub product: &'a Product,
    /// Price of one unit after any discount that applies to it.
    pub display_price: Money,
    pub price_label: String,
    /// Per-unit saving when a discount applies to a single unit.
    pub savings: Option<Money>,
    /// Badge for any running discount, bulk offers included.
    pub discount_label: Option<String>,
}

impl<'a> ProductCard<'a> {
    pub fn new(product: &'a Product, config: &ConfigState, today: NaiveDate) -> Self {
        let display_price = product.display_price(today);
        let running = product.discount.as_ref().filter(|d| d.is_active_on(today));
        let savings = running
            .filter(|d| d.applies(today, 1))
            .map(|d| d.savings(product.price));

        ProductCard {
            product,
            display_price,
            price_label: config.format_currency(display_price),
            savings,
            discount_label: running.map(|d| d.label()),
        }
    }
}

/// Option for the sort dropdown.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SortOption {
    pub value: SortKey,
    pub label: &'static str,
}

/// The shop page for the session's current criteria.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopPage<'a> {
    pub criteria: &'a FilterCriteria,
    pub result_count: usize,
    pub products: Vec<ProductCard<'a>>,
    pub sort_options: Vec<SortOption>,
    pub categories: &'static [Category],
}

impl<'a> ShopPage<'a> {
    pub fn build(catalog: &'a Catalog, session: &'a Session, config: &ConfigState, today: NaiveDate) -> Self {
        let products: Vec<ProductCard<'a>> = catalog
            .browse(&session.criteria)
            .into_iter()
            .map(|p| ProductCard::new(p, config, today))
            .collect();

        ShopPage {
            criteria: &session.criteria,
            result_count: products.len(),
            products,
            sort_options: SortKey::ALL
                .iter()
                .map(|&value| SortOption {
                    value,
                    label: value.label(),
                })
                .collect(),
            categories: &Category::ALL,
        }
    }
}

/// A partial criteria update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterPatch {
    pub search_term: Option<String>,
    pub category: Option<Criterion<Category>>,
    pub gender: Option<Criterion<Gender>>,
    /// Paise.
    pub min_price: Option<Money>,
    /// Paise.
    pub max_price: Option<Money>,
    pub sort: Option<SortKey>,
}

impl FilterPatch {
    fn apply_to(self, criteria: &mut FilterCriteria) -> Result<(), ApiError> {
        if let Some(term) = self.search_term {
            criteria.search_term = validate_search_query(&term)?.to_string();
        }
        if let Some(category) = self.category {
            criteria.category = category;
        }
        if let Some(gender) = self.gender {
            criteria.gender = gender;
        }
        if let Some(min) = self.min_price {
            criteria.min_price = min;
        }
        if let Some(max) = self.max_price {
            criteria.max_price = max;
        }
        if let Some(sort) = self.sort {
            criteria.sort = sort;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductArgs {
    pub product_id: ProductId,
}

/// Product detail page.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail<'a> {
    #[serde(flatten)]
    pub card: ProductCard<'a>,
    pub default_size: &'a str,
    pub vendor: Option<&'a Vendor>,
}

/// The shop page for the session's current criteria.
pub fn browse_catalog<'a>(
    catalog: &'a Catalog,
    session: &'a Session,
    config: &ConfigState,
    today: NaiveDate,
) -> ShopPage<'a> {
    debug!(criteria = ?session.criteria, "browse_catalog command");
    ShopPage::build(catalog, session, config, today)
}

/// Changes some criteria and returns the new page.
///
/// ## Example
/// ```json
/// {"command": "set_filter", "args": {"category": "bottoms", "sort": "price-low"}}
/// ```
///
/// A minimum above the maximum is accepted and yields an empty page.
pub fn set_filter<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    today: NaiveDate,
    patch: FilterPatch,
) -> Result<ShopPage<'a>, ApiError> {
    debug!(patch = ?patch, "set_filter command");

    let mut criteria = session.criteria.clone();
    patch.apply_to(&mut criteria)?;
    session.criteria = criteria;

    Ok(ShopPage::build(catalog, session, config, today))
}

/// Back to every product, featured order, full price range.
pub fn reset_filter<'a>(
    catalog: &'a Catalog,
    session: &'a mut Session,
    config: &ConfigState,
    today: NaiveDate,
) -> ShopPage<'a> {
    debug!("reset_filter command");

    session.criteria = Session::default_criteria(config);
    ShopPage::build(catalog, session, config, today)
}

/// Product detail for customers. Products awaiting review or rejected
/// are reported as not found.
pub fn get_product<'a>(
    catalog: &'a Catalog,
    config: &ConfigState,
    today: NaiveDate,
    args: ProductArgs,
) -> Result<ProductDetail<'a>, ApiError> {
    debug!(product_id = args.product_id, "get_product command");

    let product = catalog
        .products()
        .get_by_id(args.product_id)
        .filter(|p| p.is_visible())
        .ok_or(CoreError::ProductNotFound(args.product_id))?;

    Ok(ProductDetail {
        card: ProductCard::new(product, config, today),
        default_size: product.default_size(),
        vendor: catalog.vendors().get(&product.vendor_id),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use vibez_core::Discount;

    fn setup() -> (Catalog, Session, ConfigState) {
        let config = ConfigState::default();
        let catalog = Catalog::seeded();
        let session = Session::new(&config, &catalog);
        (catalog, session, config)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    fn ids(page: &ShopPage<'_>) -> Vec<ProductId> {
        page.products.iter().map(|c| c.product.id).collect()
    }

    #[test]
    fn test_browse_shows_approved_only() {
        let (catalog, session, config) = setup();
        let page = browse_catalog(&catalog, &session, &config, today());

        assert_eq!(page.result_count, 7);
        assert_eq!(ids(&page), vec![1, 2, 3, 4, 6, 7, 8]);
        assert_eq!(page.products[0].price_label, "₹499.00");
        assert_eq!(page.sort_options.len(), SortKey::ALL.len());
    }

    #[test]
    fn test_set_filter_is_incremental() {
        let (catalog, mut session, config) = setup();

        let patch: FilterPatch = serde_json::from_str(r#"{"category": "bottoms"}"#).unwrap();
        let page = set_filter(&catalog, &mut session, &config, today(), patch).unwrap();
        assert_eq!(ids(&page), vec![2, 7]);

        let patch: FilterPatch = serde_json::from_str(r#"{"sort": "price-low"}"#).unwrap();
        let page = set_filter(&catalog, &mut session, &config, today(), patch).unwrap();
        assert_eq!(ids(&page), vec![7, 2]);
        assert_eq!(page.criteria.category, Criterion::Only(Category::Bottoms));
    }

    #[test]
    fn test_set_filter_price_and_search() {
        let (catalog, mut session, config) = setup();

        let patch: FilterPatch =
            serde_json::from_str(r#"{"minPrice": 50000, "maxPrice": 130000, "sort": "price-high"}"#)
                .unwrap();
        let page = set_filter(&catalog, &mut session, &config, today(), patch).unwrap();
        assert_eq!(ids(&page), vec![2, 4, 7, 8]);

        let patch: FilterPatch = serde_json::from_str(r#"{"searchTerm": "JEANS"}"#).unwrap();
        let page = set_filter(&catalog, &mut session, &config, today(), patch).unwrap();
        assert_eq!(ids(&page), vec![2]);
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let (catalog, mut session, config) = setup();
        let patch = FilterPatch {
            min_price: Some(Money::from_rupees(2000)),
            max_price: Some(Money::from_rupees(1000)),
            ..FilterPatch::default()
        };
        let page = set_filter(&catalog, &mut session, &config, today(), patch).unwrap();
        assert_eq!(page.result_count, 0);
    }

    #[test]
    fn test_overlong_search_is_rejected() {
        let (catalog, mut session, config) = setup();
        let patch = FilterPatch {
            search_term: Some("x".repeat(101)),
            ..FilterPatch::default()
        };
        let err = set_filter(&catalog, &mut session, &config, today(), patch).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(session.criteria, Session::default_criteria(&config));
    }

    #[test]
    fn test_reset_filter() {
        let (catalog, mut session, config) = setup();
        session.criteria = FilterCriteria::default().with_gender(Gender::Women);
        assert_eq!(browse_catalog(&catalog, &session, &config, today()).result_count, 0);

        let page = reset_filter(&catalog, &mut session, &config, today());
        assert_eq!(page.result_count, 7);
    }

    #[test]
    fn test_discounted_card() {
        let (mut catalog, session, config) = setup();
        catalog
            .products_mut()
            .set_discount(1, Discount::percentage(2000))
            .unwrap();

        let page = browse_catalog(&catalog, &session, &config, today());
        let card = &page.products[0];
        assert_eq!(card.display_price, Money::from_paise(39_920));
        assert_eq!(card.price_label, "₹399.20");
        assert_eq!(card.savings, Some(Money::from_paise(9_980)));
        assert_eq!(card.discount_label.as_deref(), Some("20% OFF"));
    }

    #[test]
    fn test_bulk_discount_keeps_card_price() {
        let (mut catalog, session, config) = setup();
        catalog
            .products_mut()
            .set_discount(1, Discount::percentage(1000).with_min_quantity(3))
            .unwrap();

        let page = browse_catalog(&catalog, &session, &config, today());
        let card = &page.products[0];
        assert_eq!(card.display_price, Money::from_rupees(499));
        assert_eq!(card.savings, None);
        assert_eq!(card.discount_label.as_deref(), Some("10% OFF on 3+"));
    }

    #[test]
    fn test_get_product() {
        let (catalog, _, config) = setup();

        let detail = get_product(&catalog, &config, today(), ProductArgs { product_id: 3 }).unwrap();
        assert_eq!(detail.card.product.name, "Running Shoes");
        assert_eq!(detail.default_size, "7");
        assert_eq!(detail.vendor.map(|v| v.name.as_str()), Some("Style Studio"));

        let err = get_product(&catalog, &config, today(), ProductArgs { product_id: 5 }).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
