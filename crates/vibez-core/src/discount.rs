//! # Vendor Discounts
//!
//! Vendors can put a single discount on each of their products: either a
//! percentage off or a fixed rupee amount off, optionally limited to a date
//! window and a minimum quantity.
//!
//! ```text
//! percentage:  price × (1 − value/100)      ₹1599, 20%  → ₹1279.20
//! fixed:       max(0, price − value)        ₹499, ₹600 → ₹0.00
//! ```
//!
//! The discount only changes the price shown on the product card; the cart
//! keeps the list price it was given.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

/// 100% in basis points.
const FULL_PERCENT_BPS: u32 = 10_000;

/// How much is taken off the list price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DiscountKind {
    /// Percentage off, in basis points (2000 = 20%).
    Percentage(u32),
    /// Fixed amount off.
    Fixed(Money),
}

/// A vendor discount on one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub kind: DiscountKind,

    /// First day the discount runs (inclusive). `None` = already running.
    #[ts(as = "Option<String>")]
    pub starts_on: Option<NaiveDate>,

    /// Last day the discount runs (inclusive). `None` = open ended.
    #[ts(as = "Option<String>")]
    pub ends_on: Option<NaiveDate>,

    /// Minimum quantity per order for the discount to apply.
    pub min_quantity: u32,
}

impl Discount {
    /// An open-ended percentage discount (`bps` basis points off).
    pub fn percentage(bps: u32) -> Self {
        Discount {
            kind: DiscountKind::Percentage(bps),
            starts_on: None,
            ends_on: None,
            min_quantity: 1,
        }
    }

    /// An open-ended fixed-amount discount.
    pub fn fixed(amount: Money) -> Self {
        Discount {
            kind: DiscountKind::Fixed(amount),
            starts_on: None,
            ends_on: None,
            min_quantity: 1,
        }
    }

    /// Limits the discount to an inclusive date window.
    pub fn between(mut self, starts_on: Option<NaiveDate>, ends_on: Option<NaiveDate>) -> Self {
        self.starts_on = starts_on;
        self.ends_on = ends_on;
        self
    }

    /// Requires a minimum quantity.
    pub fn with_min_quantity(mut self, min_quantity: u32) -> Self {
        self.min_quantity = min_quantity;
        self
    }

    /// Checks the discount against the product's list price.
    ///
    /// ## Rules
    /// - Percentage: greater than 0, at most 100%
    /// - Fixed: greater than 0, at most the list price
    /// - Minimum quantity at least 1
    /// - The window must not end before it starts
    pub fn validate(&self, list_price: Money) -> Result<(), ValidationError> {
        match self.kind {
            DiscountKind::Percentage(0) => {
                return Err(ValidationError::must_be_positive("discount"));
            }
            DiscountKind::Percentage(bps) if bps > FULL_PERCENT_BPS => {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: 0,
                    max: 100,
                });
            }
            DiscountKind::Fixed(amount) if !amount.is_positive() => {
                return Err(ValidationError::must_be_positive("discount"));
            }
            DiscountKind::Fixed(amount) if amount > list_price => {
                return Err(ValidationError::OutOfRange {
                    field: "discount".to_string(),
                    min: 0,
                    max: list_price.rupees(),
                });
            }
            _ => {}
        }

        if self.min_quantity == 0 {
            return Err(ValidationError::must_be_positive("minimum quantity"));
        }

        if let (Some(start), Some(end)) = (self.starts_on, self.ends_on) {
            if end < start {
                return Err(ValidationError::InvalidFormat {
                    field: "end date".to_string(),
                    reason: format!("{} is before start date {}", end, start),
                });
            }
        }

        Ok(())
    }

    /// Applies the discount to `price`.
    pub fn discounted_price(&self, price: Money) -> Money {
        match self.kind {
            DiscountKind::Percentage(bps) => price.apply_percentage_discount(bps.min(FULL_PERCENT_BPS)),
            DiscountKind::Fixed(amount) => price.saturating_sub_to_zero(amount),
        }
    }

    /// Amount saved on one unit at `price`.
    pub fn savings(&self, price: Money) -> Money {
        price - self.discounted_price(price)
    }

    /// Whether `date` falls inside the discount window.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.starts_on.map_or(true, |start| date >= start)
            && self.ends_on.map_or(true, |end| date <= end)
    }

    /// Whether an order of `quantity` units on `date` gets the discount.
    pub fn applies(&self, date: NaiveDate, quantity: u32) -> bool {
        self.is_active_on(date) && quantity >= self.min_quantity
    }

    /// Badge text for the product card ("20% OFF", "₹100 OFF", "10% OFF on 3+").
    pub fn label(&self) -> String {
        let amount = match self.kind {
            DiscountKind::Percentage(bps) if bps % 100 == 0 => format!("{}% OFF", bps / 100),
            DiscountKind::Percentage(bps) => format!("{:.2}% OFF", bps as f64 / 100.0),
            DiscountKind::Fixed(amount) if amount.paise_part() == 0 => {
                format!("₹{} OFF", amount.rupees())
            }
            DiscountKind::Fixed(amount) => format!("{} OFF", amount),
        };

        if self.min_quantity > 1 {
            format!("{} on {}+", amount, self.min_quantity)
        } else {
            amount
        }
    }
}
