//! # Domain Types
//!
//! The product model and its category enumeration.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐         ┌─────────────────┐                   │
//! │  │      Product        │         │    Category     │                   │
//! │  │  ─────────────────  │         │  ─────────────  │                   │
//! │  │  id: Option<Uuid>   │         │  UNKNOWN        │                   │
//! │  │  name               │         │  CLOTHS         │                   │
//! │  │  description        │ ──────► │  FOOD           │                   │
//! │  │  price: Price       │         │  HOUSEWARES     │                   │
//! │  │  available          │         │  AUTOMOTIVE     │                   │
//! │  │  category           │         │  TOOLS          │                   │
//! │  └─────────────────────┘         └─────────────────┘                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity Lifecycle
//! ```text
//! Product::new(..)        id = None
//!      │ repo.create()
//!      ▼
//! persisted               id = Some(uuid)   ← immutable from here on
//!      │ repo.delete()
//!      ▼
//! deleted                 id = None, other fields kept
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::error::{DataValidationError, ValidationResult};
use crate::price::Price;
use crate::validation::{validate_price, validate_product_name};

// =============================================================================
// Category
// =============================================================================

/// Closed set of product categories.
///
/// ## Storage
/// Persisted and serialized by NAME (`"CLOTHS"`), never by ordinal, so
/// reordering or extending the enum never changes the meaning of stored rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Unknown,
    Cloths,
    Food,
    Housewares,
    Automotive,
    Tools,
}

impl Category {
    /// Every member, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Unknown,
        Category::Cloths,
        Category::Food,
        Category::Housewares,
        Category::Automotive,
        Category::Tools,
    ];

    /// Returns the stored name of this category.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Unknown => "UNKNOWN",
            Category::Cloths => "CLOTHS",
            Category::Food => "FOOD",
            Category::Housewares => "HOUSEWARES",
            Category::Automotive => "AUTOMOTIVE",
            Category::Tools => "TOOLS",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Names are matched exactly; `"cloths"` is not a category.
impl FromStr for Category {
    type Err = DataValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| DataValidationError::UnknownCategory(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A sellable item.
#[derive(Debug, Clone, PartialEq, Eq, TS)]
#[ts(export)]
pub struct Product {
    /// Assigned by the repository on create; `None` until then.
    #[ts(as = "Option<String>")]
    pub id: Option<Uuid>,

    /// Display name. Never empty.
    pub name: String,

    /// Free text, may be empty.
    pub description: String,

    /// Exact two-place decimal price.
    #[ts(as = "String")]
    pub price: Price,

    /// Whether the item can currently be ordered.
    pub available: bool,

    pub category: Category,
}

impl Product {
    /// Creates an unpersisted product.
    ///
    /// ## Example
    /// ```rust
    /// use catalog_core::{Category, Price, Product};
    ///
    /// let hat = Product::new("Fedora", "A red hat", Price::from_cents(1250), true, Category::Cloths);
    /// assert!(hat.id.is_none());
    /// assert_eq!(hat.to_string(), "<Product Fedora id=[none]>");
    /// ```
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: Price,
        available: bool,
        category: Category,
    ) -> Self {
        Product {
            id: None,
            name: name.into(),
            description: description.into(),
            price,
            available,
            category,
        }
    }

    /// Checks whether the product has been persisted (has an id).
    #[inline]
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Validates the field rules that hold for every stored product.
    ///
    /// ## Rules
    /// - `name` is non-empty and at most 200 characters
    /// - `price` is not negative
    pub fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_price(self.price)?;
        Ok(())
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) => write!(f, "<Product {} id=[{}]>", self.name, id),
            None => write!(f, "<Product {} id=[none]>", self.name),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn fedora() -> Product {
        Product::new(
            "Fedora",
            "A red hat",
            Price::from_cents(1250),
            true,
            Category::Cloths,
        )
    }

    #[test]
    fn test_create_a_product() {
        let product = fedora();
        assert_eq!(product.to_string(), "<Product Fedora id=[none]>");
        assert_eq!(product.id, None);
        assert_eq!(product.name, "Fedora");
        assert_eq!(product.description, "A red hat");
        assert!(product.available);
        assert_eq!(product.price, "12.50".parse::<Price>().unwrap());
        assert_eq!(product.category, Category::Cloths);
    }

    #[test]
    fn test_display_with_id() {
        let mut product = fedora();
        let id = Uuid::new_v4();
        product.id = Some(id);
        assert_eq!(product.to_string(), format!("<Product Fedora id=[{}]>", id));
        assert!(product.is_persisted());
    }

    #[test]
    fn test_category_names() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
            assert_eq!(category.to_string(), category.as_str());
        }
        assert_eq!(Category::default(), Category::Unknown);
    }

    #[test]
    fn test_unknown_category() {
        assert_eq!(
            "SHOES".parse::<Category>(),
            Err(DataValidationError::UnknownCategory("SHOES".to_string()))
        );
        // Case matters: stored names are upper case
        assert!("cloths".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serde_uses_names() {
        assert_eq!(
            serde_json::to_string(&Category::Housewares).unwrap(),
            "\"HOUSEWARES\""
        );
        let parsed: Category = serde_json::from_str("\"TOOLS\"").unwrap();
        assert_eq!(parsed, Category::Tools);
        assert!(serde_json::from_str::<Category>("1").is_err());
    }

    #[test]
    fn test_validate() {
        assert!(fedora().validate().is_ok());

        let mut nameless = fedora();
        nameless.name = "   ".to_string();
        assert!(matches!(
            nameless.validate(),
            Err(DataValidationError::Required { .. })
        ));

        let mut negative = fedora();
        negative.price = Price::from_cents(-1);
        assert!(matches!(
            negative.validate(),
            Err(DataValidationError::Negative { .. })
        ));
    }
}
