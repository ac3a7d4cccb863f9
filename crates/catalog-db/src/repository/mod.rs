//! # Repository Module
//!
//! Database repository implementations for the product catalog.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Caller (seed binary, service code, tests)                             │
//! │       │                                                                 │
//! │       │  db.products().find_by_category(Category::Food)                │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── create(&self, &mut product)      assigns product.id              │
//! │  ├── update(&self, &product)                                           │
//! │  ├── delete(&self, &mut product)      clears product.id               │
//! │  ├── find(&self, id)                                                   │
//! │  ├── all(&self)                                                        │
//! │  └── find_by_*(&self, value) ──► ProductQuery (lazy)                  │
//! │       │                                   │                             │
//! │       │  SQL                              │ fetch_all / first / count   │
//! │       ▼                                   ▼                             │
//! │  SQLite Database (products table)                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Types
//!
//! - [`ProductRepository`] - Product CRUD and lookups
//! - [`ProductQuery`] - Deferred equality query over one column
//! - [`ProductFilter`] - The column and value a query compares

pub mod product;
pub mod query;

pub use product::ProductRepository;
pub use query::{ProductFilter, ProductQuery};
