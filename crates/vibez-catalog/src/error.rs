//! # Catalog Error Types
//!
//! Error types for catalog loading and repository operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / CoreError                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module) ← Adds context and categorization          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront) ← Serialized for the frontend                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Frontend displays user-friendly message                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;
use vibez_core::{CoreError, ValidationError};

/// Catalog operation errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity not found in the catalog.
    ///
    /// ## When This Occurs
    /// - Product id, vendor id or banner id doesn't exist
    /// - The entity was deleted earlier in the session
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Uniqueness violation.
    ///
    /// ## When This Occurs
    /// - Registering a vendor with an email already in use
    /// - Loading a catalog file with repeated ids
    #[error("Duplicate {field}: '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Every id above the highest one in use is taken.
    ///
    /// ## When This Occurs
    /// - A catalog file already holds id `u32::MAX`
    #[error("No free {entity} id left")]
    IdsExhausted { entity: &'static str },

    /// A raw catalog record could not become a typed value.
    #[error("Invalid record {id}: {reason}")]
    InvalidRecord { id: String, reason: String },

    /// The catalog file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON for the catalog schema.
    #[error("Malformed catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// A domain rule rejected the operation.
    #[error(transparent)]
    Core(#[from] CoreError),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        CatalogError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Creates a Duplicate error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        CatalogError::Duplicate {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl From<ValidationError> for CatalogError {
    fn from(err: ValidationError) -> Self {
        CatalogError::Core(CoreError::Validation(err))
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CatalogError::not_found("Product", 42).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CatalogError::duplicate("email", "a@b.com").to_string(),
            "Duplicate email: 'a@b.com' already exists"
        );
    }

    #[test]
    fn test_validation_wraps_into_core() {
        let err: CatalogError = ValidationError::must_be_positive("price").into();
        assert!(matches!(err, CatalogError::Core(CoreError::Validation(_))));
        assert_eq!(err.to_string(), "Validation error: price must be positive");
    }
}
