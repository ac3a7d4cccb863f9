//! # Validation Module
//!
//! Field validators shared by deserialization and the repository.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Product::deserialize (JSON → Product)                        │
//! │  ├── Presence and JSON type of every field                             │
//! │  └── Category names, price precision                                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (called by Product::validate)                    │
//! │  └── Field rules: non-empty name, non-negative price                   │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL constraints                                              │
//! │  └── CHECK on category names                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use uuid::Uuid;

use crate::error::{DataValidationError, ValidationResult};
use crate::price::Price;

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LENGTH: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty (after trimming)
/// - Must be at most 200 characters
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Fedora").is_ok());
/// assert!(validate_product_name("").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(DataValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(DataValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed for free items)
pub fn validate_price(price: Price) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(DataValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Id Validators
// =============================================================================

/// Parses a textual product id, as it arrives in a URL path.
///
/// ## Example
/// ```rust
/// use catalog_core::validation::parse_product_id;
///
/// assert!(parse_product_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(parse_product_id("not-a-uuid").is_err());
/// ```
pub fn parse_product_id(id: &str) -> ValidationResult<Uuid> {
    let id = id.trim();

    if id.is_empty() {
        return Err(DataValidationError::Required {
            field: "id".to_string(),
        });
    }

    Uuid::parse_str(id).map_err(|_| DataValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Fedora").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Price::zero()).is_ok());
        assert!(validate_price(Price::from_cents(1250)).is_ok());
        assert!(validate_price(Price::from_cents(-100)).is_err());
    }

    #[test]
    fn test_parse_product_id() {
        let id = parse_product_id("550e8400-e29b-41d4-a716-446655440000").unwrap();
        assert_eq!(id.to_string(), "550e8400-e29b-41d4-a716-446655440000");

        assert!(matches!(
            parse_product_id(""),
            Err(DataValidationError::Required { .. })
        ));
        assert!(matches!(
            parse_product_id("123"),
            Err(DataValidationError::InvalidFormat { .. })
        ));
    }
}
