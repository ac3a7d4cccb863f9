//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── DataValidationError - Bad input or an illegal lifecycle step      │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError             - Database failures, wraps the above          │
//! │                                                                         │
//! │  Flow: DataValidationError → DbError::Validation → HTTP 400            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field name, offending value)
//! 3. Errors are enum variants, never String

use std::convert::Infallible;

use thiserror::Error;

// =============================================================================
// Data Validation Error
// =============================================================================

/// Validation failures for product data.
///
/// Raised synchronously by deserialization, by the field validators, and by
/// repository operations that are illegal for the record's lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataValidationError {
    /// A required key is absent from the payload.
    #[error("Invalid product: missing {field}")]
    MissingField { field: String },

    /// A key is present but holds a value of the wrong JSON type.
    ///
    /// ## When This Occurs
    /// - `"available": "Test"` (string instead of boolean)
    /// - `"name": 42`
    #[error("Invalid type for {expected} [{field}]: {found}")]
    InvalidType {
        field: String,
        expected: String,
        found: String,
    },

    /// Category name is not a member of the enumeration.
    #[error("Invalid attribute: unknown category '{0}'")]
    UnknownCategory(String),

    /// Price text or number could not be turned into an exact price.
    #[error("Invalid price '{value}': {reason}")]
    InvalidPrice { value: String, reason: String },

    /// A required text field is empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g., invalid UUID).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// `update` called on a record that was never persisted.
    #[error("Update called with empty id field")]
    NotPersisted,

    /// `create` called on a record that already has an id.
    #[error("Product {0} is already persisted")]
    AlreadyPersisted(String),

    /// Payload is not a key/value object at all.
    #[error("Invalid product: body of request contained bad or no data ({0})")]
    BadData(String),
}

impl DataValidationError {
    /// Creates a MissingField error.
    pub fn missing(field: impl Into<String>) -> Self {
        DataValidationError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an InvalidType error.
    pub fn invalid_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        DataValidationError::InvalidType {
            field: field.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Creates an InvalidPrice error.
    pub fn invalid_price(value: impl Into<String>, reason: impl Into<String>) -> Self {
        DataValidationError::InvalidPrice {
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Lets `Price` itself be passed wherever a fallible price conversion is
/// accepted.
impl From<Infallible> for DataValidationError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with DataValidationError.
pub type ValidationResult<T> = Result<T, DataValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
