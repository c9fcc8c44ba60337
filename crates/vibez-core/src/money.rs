//! # Money Module
//!
//! Provides the `Money` type for handling rupee amounts safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In JavaScript/floating point:                                          │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  A cart summing ₹499.10 + ₹0.20 drifts the same way, and the drift     │
//! │  leaks straight into the GST lines.                                     │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Paise                                            │
//! │    ₹499.10 = 49910 paise, sums are exact                                │
//! │    Tax is computed exactly with `rust_decimal` and only rounded to     │
//! │    two decimals when displayed                                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vibez_core::money::Money;
//!
//! // Create from paise (preferred) or whole rupees
//! let price = Money::from_paise(49_950); // ₹499.50
//! let shoes = Money::from_rupees(2499);  // ₹2499.00
//!
//! // Arithmetic operations
//! let doubled = price * 2_i64;           // ₹999.00
//! let total = price + shoes;             // ₹2998.50
//! assert_eq!(total.paise(), 299_850);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

/// Paise per rupee.
const PAISE_PER_RUPEE: i64 = 100;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in paise (1/100 of a rupee).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative values for adjustments
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──┬──► CartLineItem.unit_price ──► line total            │
/// │                  │                                                      │
/// │                  ├──► FilterCriteria price range (inclusive)            │
/// │                  │                                                      │
/// │                  └──► Displayed as "₹499.00" in the storefront          │
/// │                                                                         │
/// │  Cart.subtotal ──► GST breakdown (CGST 9% + SGST 9%) ──► grand total   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::money::Money;
    ///
    /// let price = Money::from_paise(49_900); // ₹499.00
    /// assert_eq!(price.paise(), 49_900);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from whole rupees.
    ///
    /// The seeded catalog prices everything in whole rupees, so this is the
    /// common constructor for catalog data. Saturates at the `i64` bounds.
    #[inline]
    pub const fn from_rupees(rupees: i64) -> Self {
        Money(rupees.saturating_mul(PAISE_PER_RUPEE))
    }

    /// Converts an exact decimal rupee amount (e.g. `499.5`) into Money.
    ///
    /// Amounts with more than two decimals are rounded half away from zero
    /// to the nearest paisa. Values that do not fit an `i64` of paise are
    /// rejected.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use vibez_core::money::Money;
    ///
    /// let price = Money::try_from_decimal(Decimal::new(4995, 1)).unwrap();
    /// assert_eq!(price.paise(), 49_950);
    /// ```
    pub fn try_from_decimal(rupees: Decimal) -> Result<Self, ValidationError> {
        let paise = rupees
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|p| p.to_i64())
            .ok_or_else(|| ValidationError::InvalidFormat {
                field: "price".to_string(),
                reason: format!("{} is out of range", rupees),
            })?;
        Ok(Money(paise))
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-rupee portion.
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(49_950).rupees(), 499);
    /// assert_eq!(Money::from_paise(-550).rupees(), -5);
    /// ```
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / PAISE_PER_RUPEE
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % PAISE_PER_RUPEE).abs()
    }

    /// Returns the exact value in rupees as a decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Calculates the exact (un-rounded) tax on this amount, in rupees.
    ///
    /// ## Example
    /// ```rust
    /// use rust_decimal::Decimal;
    /// use vibez_core::money::Money;
    /// use vibez_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_rupees(1497);
    /// let cgst = subtotal.tax_exact(TaxRate::from_bps(900)); // 9%
    /// assert_eq!(cgst, Decimal::new(13473, 2));              // ₹134.73
    /// ```
    pub fn tax_exact(&self, rate: TaxRate) -> Decimal {
        // 134.730000 → 134.73
        (self.to_decimal() * rate.to_decimal()).normalize()
    }

    /// Calculates tax rounded to the nearest paisa (half up).
    ///
    /// ## Implementation
    /// Integer math: `(amount * rate + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::money::Money;
    /// use vibez_core::types::TaxRate;
    ///
    /// let price = Money::from_paise(49_950);  // ₹499.50
    /// let tax = price.calculate_tax(TaxRate::from_bps(900));
    /// // ₹499.50 × 9% = ₹44.955 → ₹44.96
    /// assert_eq!(tax.paise(), 4_496);
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 keeps large carts from overflowing
        let tax = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_paise(tax as i64)
    }

    /// Multiplies money by a quantity, saturating instead of overflowing.
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::money::Money;
    ///
    /// let unit_price = Money::from_rupees(499);
    /// assert_eq!(unit_price.multiply_quantity(3), Money::from_rupees(1497));
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Applies a percentage discount and returns the discounted amount.
    ///
    /// ## Arguments
    /// * `discount_bps` - Discount in basis points (1000 = 10%)
    ///
    /// ## Example
    /// ```rust
    /// use vibez_core::money::Money;
    ///
    /// let price = Money::from_rupees(1000);
    /// let discounted = price.apply_percentage_discount(1000); // 10% off
    /// assert_eq!(discounted, Money::from_rupees(900));
    /// ```
    pub fn apply_percentage_discount(&self, discount_bps: u32) -> Money {
        let discount_amount = (self.0 as i128 * discount_bps as i128 + 5000) / 10000;
        Money::from_paise(self.0.saturating_sub(discount_amount as i64))
    }

    /// Subtracts, clamping the result at zero.
    #[inline]
    pub const fn saturating_sub_to_zero(&self, other: Money) -> Money {
        let diff = self.0.saturating_sub(other.0);
        if diff < 0 {
            Money(0)
        } else {
            Money(diff)
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display shows the amount rounded to two decimals with the rupee sign.
///
/// ## Note
/// Use `ConfigState::format_currency` in the storefront for configurable
/// symbols.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}₹{}.{:02}", sign, self.rupees().abs(), self.paise_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Sums and differences saturate like `multiply_quantity`, so a cart of
// extreme prices reports i64::MAX paise rather than wrapping negative.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty as i64)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_paise() {
        let money = Money::from_paise(49_950);
        assert_eq!(money.paise(), 49_950);
        assert_eq!(money.rupees(), 499);
        assert_eq!(money.paise_part(), 50);
    }

    #[test]
    fn test_from_rupees() {
        assert_eq!(Money::from_rupees(499).paise(), 49_900);
        assert_eq!(Money::from_rupees(0), Money::zero());
    }

    #[test]
    fn test_try_from_decimal() {
        let whole = Money::try_from_decimal(Decimal::from(1299)).unwrap();
        assert_eq!(whole, Money::from_rupees(1299));

        let fractional = Money::try_from_decimal(Decimal::new(4995, 1)).unwrap();
        assert_eq!(fractional.paise(), 49_950);

        // ₹10.005 rounds half away from zero to ₹10.01
        let rounded = Money::try_from_decimal(Decimal::new(10005, 3)).unwrap();
        assert_eq!(rounded.paise(), 1_001);

        assert!(Money::try_from_decimal(Decimal::MAX).is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(49_950)), "₹499.50");
        assert_eq!(format!("{}", Money::from_rupees(1497)), "₹1497.00");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_rupees(10);
        let b = Money::from_rupees(5);

        assert_eq!((a + b).paise(), 1_500);
        assert_eq!((a - b).paise(), 500);
        let result: Money = a * 3i64;
        assert_eq!(result.paise(), 3_000);
        let result: Money = a * 2u32;
        assert_eq!(result.paise(), 2_000);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let half = Money::from_paise(i64::MAX / 2);
        let line = half.multiply_quantity(3);
        assert_eq!(line.paise(), i64::MAX);

        let total: Money = [line, line].into_iter().sum();
        assert_eq!(total.paise(), i64::MAX);

        let mut running = line;
        running += line;
        assert_eq!(running.paise(), i64::MAX);

        assert_eq!((Money::from_paise(i64::MIN) - Money::from_paise(1)).paise(), i64::MIN);
        assert_eq!(Money::from_rupees(i64::MAX / 10).paise(), i64::MAX);
    }

    #[test]
    fn test_sum() {
        let total: Money = [Money::from_rupees(499), Money::from_rupees(998)]
            .into_iter()
            .sum();
        assert_eq!(total, Money::from_rupees(1497));
    }

    #[test]
    fn test_decimal_is_exact() {
        // 0.1 + 0.2 drifts in floating point, not here
        let a = Money::from_paise(10);
        let b = Money::from_paise(20);
        assert_eq!((a + b).to_decimal(), Decimal::new(30, 2));
    }

    #[test]
    fn test_tax_exact_keeps_full_precision() {
        // ₹499.50 × 9% = ₹44.955 exactly
        let tax = Money::from_paise(49_950).tax_exact(TaxRate::from_bps(900));
        assert_eq!(tax, Decimal::new(44_955, 3));
    }

    #[test]
    fn test_tax_calculation_with_rounding() {
        let tax = Money::from_paise(49_950).calculate_tax(TaxRate::from_bps(900));
        assert_eq!(tax.paise(), 4_496);
    }

    #[test]
    fn test_percentage_discount() {
        let price = Money::from_rupees(1599);
        let discounted = price.apply_percentage_discount(2000); // 20%
        assert_eq!(discounted.paise(), 127_920); // ₹1279.20
    }

    #[test]
    fn test_saturating_sub_to_zero() {
        let price = Money::from_rupees(499);
        assert_eq!(
            price.saturating_sub_to_zero(Money::from_rupees(100)),
            Money::from_rupees(399)
        );
        assert_eq!(
            price.saturating_sub_to_zero(Money::from_rupees(600)),
            Money::zero()
        );
    }

    #[test]
    fn test_multiply_quantity_saturates() {
        let huge = Money::from_paise(i64::MAX / 2);
        assert_eq!(huge.multiply_quantity(4).paise(), i64::MAX);
    }

    #[test]
    fn test_zero_and_checks() {
        let zero = Money::zero();
        assert!(zero.is_zero());
        assert!(!zero.is_positive());
        assert!(!zero.is_negative());

        let negative = Money::from_paise(-100);
        assert!(negative.is_negative());
        assert_eq!(negative.abs().paise(), 100);
    }
}
