//! # Catalog Filter/Sort Pipeline
//!
//! Turns the product catalog plus the customer's current criteria into the
//! ordered list shown on the shop page.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products ──► filter (all must hold) ──► stable sort ──► result        │
//! │                                                                         │
//! │  Filter                                 Sort                            │
//! │  ──────                                 ────                            │
//! │  name contains term (case-insens.)      featured    input order        │
//! │  category == selected  (or All)         price-low   price ascending    │
//! │  gender   == selected  (or All)         price-high  price descending   │
//! │  min ≤ price ≤ max     (inclusive)      rating      rating desc (0)    │
//! │  status == approved                     newest      id descending      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The pipeline never fails. A price range with `min > max` simply matches
//! nothing.
//!
//! ## Example
//! ```rust
//! use vibez_core::catalog::{FilterCriteria, SortKey};
//! use vibez_core::types::Category;
//!
//! let criteria = FilterCriteria::default()
//!     .with_category(Category::Shoes)
//!     .sorted_by(SortKey::PriceLow);
//! assert_eq!(criteria.sort, SortKey::PriceLow);
//! ```

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Category, Gender, Product, ProductStatus};

/// Upper end of the default price range.
pub const DEFAULT_PRICE_MAX: Money = Money::from_rupees(10_000);

/// Wire name of the wildcard selector.
const ALL: &str = "all";

// =============================================================================
// Criterion
// =============================================================================

/// A selector that is either a wildcard or one specific value.
///
/// Serialized as `"all"` or as the value's own name (`"shoes"`, `"women"`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Criterion<T> {
    #[default]
    All,
    Only(T),
}

impl<T: PartialEq> Criterion<T> {
    /// Whether `value` passes this selector.
    #[inline]
    pub fn accepts(&self, value: &T) -> bool {
        match self {
            Criterion::All => true,
            Criterion::Only(wanted) => wanted == value,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Criterion<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::All => f.write_str(ALL),
            Criterion::Only(value) => value.fmt(f),
        }
    }
}

impl<T: FromStr> FromStr for Criterion<T> {
    type Err = T::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(ALL) {
            Ok(Criterion::All)
        } else {
            s.parse().map(Criterion::Only)
        }
    }
}

impl<T: fmt::Display> Serialize for Criterion<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T> Deserialize<'de> for Criterion<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering applied after filtering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Catalog order, untouched.
    #[default]
    Featured,
    #[serde(alias = "price-ascending")]
    PriceLow,
    #[serde(alias = "price-descending")]
    PriceHigh,
    /// Highest rated first; unrated counts as 0.
    #[serde(alias = "rating-descending")]
    Rating,
    /// Highest id first.
    #[serde(alias = "newest-first")]
    Newest,
}

impl SortKey {
    /// All sort keys in dropdown order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Rating,
        SortKey::Newest,
    ];

    /// Option id used by the sort dropdown.
    pub const fn as_str(&self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Newest => "newest",
        }
    }

    /// Dropdown label.
    pub const fn label(&self) -> &'static str {
        match self {
            SortKey::Featured => "Featured",
            SortKey::PriceLow => "Price: Low to High",
            SortKey::PriceHigh => "Price: High to Low",
            SortKey::Rating => "Highest Rated",
            SortKey::Newest => "Newest",
        }
    }

    /// Sorts in place. Stable: ties keep their relative order.
    pub fn sort(&self, products: &mut [&Product]) {
        match self {
            SortKey::Featured => {}
            SortKey::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            SortKey::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            SortKey::Rating => {
                products.sort_by(|a, b| b.rating_or_default().total_cmp(&a.rating_or_default()))
            }
            SortKey::Newest => products.sort_by(|a, b| b.id.cmp(&a.id)),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(SortKey::Featured),
            "price-low" | "price-ascending" => Ok(SortKey::PriceLow),
            "price-high" | "price-descending" => Ok(SortKey::PriceHigh),
            "rating" | "rating-descending" => Ok(SortKey::Rating),
            "newest" | "newest-first" => Ok(SortKey::Newest),
            _ => {
                let ids: Vec<&str> = SortKey::ALL.iter().map(|k| k.as_str()).collect();
                Err(ValidationError::not_allowed("sort", &ids))
            }
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// The customer's current shop-page criteria.
///
/// Missing fields deserialize to their defaults, so a partial update like
/// `{"category": "shoes"}` is a valid criteria value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FilterCriteria {
    /// Matched case-insensitively anywhere in the product name.
    pub search_term: String,
    #[ts(as = "String")]
    pub category: Criterion<Category>,
    #[ts(as = "String")]
    pub gender: Criterion<Gender>,
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound.
    pub max_price: Money,
    pub sort: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        FilterCriteria {
            search_term: String::new(),
            category: Criterion::All,
            gender: Criterion::All,
            min_price: Money::zero(),
            max_price: DEFAULT_PRICE_MAX,
            sort: SortKey::Featured,
        }
    }
}

impl FilterCriteria {
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Criterion::Only(category);
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Criterion::Only(gender);
        self
    }

    pub fn with_price_range(mut self, min: Money, max: Money) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    pub fn sorted_by(mut self, sort: SortKey) -> Self {
        self.sort = sort;
        self
    }

    /// Whether `product` passes every filter.
    pub fn matches(&self, product: &Product) -> bool {
        product.status == ProductStatus::Approved
            && self.category.accepts(&product.category)
            && self.gender.accepts(&product.gender)
            && product.price >= self.min_price
            && product.price <= self.max_price
            && name_contains(&product.name, &self.search_term)
    }

    /// Filters, then sorts. Input order is the "featured" order.
    pub fn apply<'a, I>(&self, products: I) -> Vec<&'a Product>
    where
        I: IntoIterator<Item = &'a Product>,
    {
        let mut result: Vec<&Product> = products.into_iter().filter(|p| self.matches(p)).collect();
        self.sort.sort(&mut result);
        result
    }
}

/// Filters and sorts a product slice.
pub fn filter_and_sort<'a>(products: &'a [Product], criteria: &FilterCriteria) -> Vec<&'a Product> {
    criteria.apply(products)
}

fn name_contains(name: &str, term: &str) -> bool {
    term.is_empty() || name.to_lowercase().contains(&term.to_lowercase())
}

// =============================================================================
// Unit Tests
// =============================================================================
