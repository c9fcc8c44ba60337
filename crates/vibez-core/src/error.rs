//! # Error Types
//!
//! Domain-specific error types for vibez-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vibez-core errors (this file)                                         │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  vibez-catalog errors (separate crate)                                 │
//! │  └── CatalogError     - Catalog loading / repository failures          │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the front end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → ApiError           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Most storefront operations are total (the cart and the catalog pipeline
//! never fail on well-typed input). Errors here cover rejected input at the
//! edges: non-positive quantities, bad discounts, illegal moderation moves.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Product exists but is not approved, so customers cannot buy it.
    #[error("Product {0} is not available for sale")]
    ProductUnavailable(u32),

    /// The requested size is not offered for the product.
    #[error("Size '{size}' is not available for product {product_id}")]
    SizeUnavailable { product_id: u32, size: String },

    /// A status change that the moderation workflow does not allow.
    ///
    /// ## When This Occurs
    /// - Approving a banner that is already active
    /// - Expiring a banner that was never approved
    #[error("Cannot move {entity} {id} from {from} to {to}")]
    InvalidStatusTransition {
        entity: &'static str,
        id: String,
        from: String,
        to: String,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., unparseable price, unknown category).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::MustBePositive`].
    pub fn must_be_positive(field: impl Into<String>) -> Self {
        ValidationError::MustBePositive {
            field: field.into(),
        }
    }

    /// Shorthand for [`ValidationError::NotAllowed`] from a static option list.
    pub fn not_allowed(field: impl Into<String>, allowed: &[&str]) -> Self {
        ValidationError::NotAllowed {
            field: field.into(),
            allowed: allowed.iter().map(|s| s.to_string()).collect(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::SizeUnavailable {
            product_id: 3,
            size: "XXL".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Size 'XXL' is not available for product 3"
        );

        let err = CoreError::InvalidStatusTransition {
            entity: "banner",
            id: "banner1".to_string(),
            from: "active".to_string(),
            to: "active".to_string(),
        };
        assert_eq!(err.to_string(), "Cannot move banner banner1 from active to active");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::must_be_positive("quantity");
        assert_eq!(err.to_string(), "quantity must be positive");

        let err = ValidationError::not_allowed("sort", &["featured", "newest"]);
        assert_eq!(err.to_string(), "sort must be one of: [\"featured\", \"newest\"]");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
