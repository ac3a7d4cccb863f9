//! # catalog-core: Pure Product Model
//!
//! This crate holds the product model of the catalog service as plain types
//! and pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Product Catalog Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 HTTP service (external)                         │   │
//! │  │    POST /products ──► Product::from_json ──► repo.create        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   price   │  │  mapping  │  │ validation│  │   │
//! │  │   │  Product  │  │   Price   │  │ serialize │  │   rules   │  │   │
//! │  │   │ Category  │  │ (Decimal) │  │deserialize│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │            SQLite queries, migrations, ProductRepository        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product` and `Category`
//! - [`price`] - exact two-place decimal prices
//! - [`mapping`] - key/value (de)serialization of a product
//! - [`validation`] - field rules
//! - [`error`] - `DataValidationError`
//! - [`factory`] - random products for tests and seeding
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{Category, Product};
//! use serde_json::json;
//!
//! let product = Product::from_json(&json!({
//!     "name": "Fedora",
//!     "description": "A red hat",
//!     "price": "12.50",
//!     "available": true,
//!     "category": "CLOTHS",
//! }))
//! .unwrap();
//!
//! assert_eq!(product.category, Category::Cloths);
//! assert_eq!(product.serialize()["price"], "12.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod factory;
pub mod mapping;
pub mod price;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{DataValidationError, ValidationResult};
pub use factory::ProductFactory;
pub use price::Price;
pub use types::{Category, Product};
pub use validation::parse_product_id;
