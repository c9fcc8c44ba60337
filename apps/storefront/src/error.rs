//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  {"command": "add_to_cart", "args": {...}}                              │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::NotFound { .. } ──┐           │  │
//! │  │         │                                           │           │  │
//! │  │         ▼                                           ▼           │  │
//! │  │  Domain Error? ─── CoreError::SizeUnavailable ──── ApiError ───►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  ◄────────────────────────────────────────────────────────────────────  │
//! │                                                                         │
//! │  {"ok": false, "error": {"code": "NOT_FOUND",                           │
//! │                          "message": "Product not found: 42"}}           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use vibez_catalog::CatalogError;
use vibez_core::{CoreError, ValidationError};

/// API error returned from storefront commands.
///
/// ## Serialization
/// This is what the client receives when a command fails:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found: 42"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Request could not be parsed or names no command (400)
    BadRequest,

    /// Caller may not act on this resource (403)
    Forbidden,

    /// Business rule refused the operation (422)
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Catalog data could not be read
    CatalogError,

    /// Internal server error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found: {}", resource, id),
        )
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::BadRequest, message)
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Forbidden, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts domain errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", id),
            CoreError::ProductUnavailable(_) | CoreError::SizeUnavailable { .. } => {
                ApiError::cart(err.to_string())
            }
            CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => ApiError::not_found(entity, id),
            CatalogError::Duplicate { .. } => ApiError::validation(err.to_string()),
            CatalogError::InvalidRecord { .. }
            | CatalogError::Parse(_)
            | CatalogError::IdsExhausted { .. } => {
                tracing::error!("Catalog data error: {}", err);
                ApiError::new(ErrorCode::CatalogError, err.to_string())
            }
            CatalogError::Io { .. } => {
                // Log the path but keep it out of the client message
                tracing::error!("Catalog read failed: {}", err);
                ApiError::new(ErrorCode::CatalogError, "Catalog could not be read")
            }
            CatalogError::Core(e) => ApiError::from(e),
        }
    }
}

/// Malformed command arguments.
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::bad_request(format!("Invalid arguments: {}", err))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_codes() {
        let err = ApiError::from(CoreError::ProductNotFound(42));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: 42");

        let err = ApiError::from(CoreError::SizeUnavailable {
            product_id: 1,
            size: "XXL".to_string(),
        });
        assert_eq!(err.code, ErrorCode::CartError);

        let err = ApiError::from(CoreError::from(ValidationError::must_be_positive("quantity")));
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_catalog_errors_map_to_codes() {
        let err = ApiError::from(CatalogError::not_found("Vendor", "vendor9"));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Vendor not found: vendor9");

        let err = ApiError::from(CatalogError::Core(CoreError::ProductUnavailable(5)));
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::not_found("Banner", "banner9");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["message"], "Banner not found: banner9");
        assert_eq!(err.to_string(), "[NotFound] Banner not found: banner9");
    }
}
