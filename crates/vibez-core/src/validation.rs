//! # Validation Module
//!
//! Input validation for data entering the storefront from vendors, admins
//! and customers.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend (SPA forms)                                         │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog loading (vibez-catalog)                              │
//! │  └── Raw records become complete products or are rejected              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use vibez_core::validation::{validate_product_name, validate_quantity};
//!
//! validate_product_name("Classic Cotton T-Shirt").unwrap();
//! validate_quantity(2).unwrap();
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_QUERY_LEN: usize = 100;
const MAX_COMMISSION_PERCENT: u8 = 100;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be between 1 and 200 characters
///
/// ## Example
/// ```rust
/// use vibez_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Slim Fit Jeans").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches every product)
/// - Maximum 100 characters
///
/// ## Returns
/// The query unchanged; the catalog pipeline matches it as typed.
pub fn validate_search_query(query: &str) -> ValidationResult<&str> {
    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(query)
}

/// Validates a vendor email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@` with a non-empty local part and a dotted domain
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::Required {
            field: "email".to_string(),
        });
    }

    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.split('.').count() >= 2
                && domain.split('.').all(|part| !part.is_empty())
        }
        None => false,
    };

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "email".to_string(),
            reason: format!("'{}' is not an email address", email),
        });
    }

    Ok(())
}

/// Validates a vendor id.
///
/// ## Rules
/// - Must not be empty
/// - Must not contain `-` (cart line ids are `{product}-{size}-{vendor}`
///   and split on the last `-`)
///
/// ## Example
/// ```rust
/// use vibez_core::validation::validate_vendor_id;
///
/// assert!(validate_vendor_id("vendor1").is_ok());
/// assert!(validate_vendor_id("fashion-hub").is_err());
/// ```
pub fn validate_vendor_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "vendor id".to_string(),
        });
    }

    if id.contains('-') {
        return Err(ValidationError::InvalidFormat {
            field: "vendor id".to_string(),
            reason: format!("'{}' must not contain '-'", id),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity entered on a product card.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
///
/// The cart itself accepts any positive quantity; this bound applies to
/// what a customer may request in one action.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::must_be_positive("quantity"));
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
///
/// ## Example
/// ```rust
/// use vibez_core::money::Money;
/// use vibez_core::validation::validate_price;
///
/// assert!(validate_price(Money::from_rupees(499)).is_ok());
/// assert!(validate_price(Money::zero()).is_ok());
/// assert!(validate_price(Money::from_paise(-100)).is_err());
/// ```
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a vendor commission percentage (0-100).
pub fn validate_commission(percent: u8) -> ValidationResult<()> {
    if percent > MAX_COMMISSION_PERCENT {
        return Err(ValidationError::OutOfRange {
            field: "commission".to_string(),
            min: 0,
            max: MAX_COMMISSION_PERCENT as i64,
        });
    }

    Ok(())
}

/// Validates a rating (0-5).
pub fn validate_rating(rating: f64) -> ValidationResult<()> {
    if !(0.0..=5.0).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating".to_string(),
            min: 0,
            max: 5,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
