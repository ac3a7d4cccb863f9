//! # Product Queries
//!
//! Lazy single-column equality queries returned by the `find_by_*` methods.
//!
//! ## Lazy Evaluation
//! ```text
//! let hats = repo.find_by_name("Hat");   ← no SQL yet, just a description
//!      │
//!      ├── hats.count().await            ← SELECT COUNT(*) ... WHERE name = ?
//!      ├── hats.fetch_all().await        ← SELECT ...      WHERE name = ?
//!      └── hats.fetch_all().await        ← runs again, sees current rows
//! ```
//!
//! A `ProductQuery` is a value: clone it, keep it, run it as often as needed.

use std::fmt;

use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;
use sqlx::{Sqlite, SqlitePool};
use tracing::debug;

use catalog_core::{Category, Price, Product};

use crate::error::DbResult;
use crate::repository::product::ProductRow;

/// The column and value a query filters on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductFilter {
    Name(String),
    Available(bool),
    Category(Category),
    Price(Price),
}

impl ProductFilter {
    /// Column the filter compares against.
    pub fn column(&self) -> &'static str {
        match self {
            ProductFilter::Name(_) => "name",
            ProductFilter::Available(_) => "available",
            ProductFilter::Category(_) => "category",
            ProductFilter::Price(_) => "price_cents",
        }
    }

    /// In-memory form of the same predicate.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::Name(name) => product.name == *name,
            ProductFilter::Available(available) => product.available == *available,
            ProductFilter::Category(category) => product.category == *category,
            ProductFilter::Price(price) => product.price == *price,
        }
    }

    fn bind<'q, O>(
        &'q self,
        query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    ) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
        match self {
            ProductFilter::Name(name) => query.bind(name.as_str()),
            ProductFilter::Available(available) => query.bind(*available),
            ProductFilter::Category(category) => query.bind(*category),
            ProductFilter::Price(price) => query.bind(price.cents()),
        }
    }
}

impl fmt::Display for ProductFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductFilter::Name(name) => write!(f, "name = {:?}", name),
            ProductFilter::Available(available) => write!(f, "available = {}", available),
            ProductFilter::Category(category) => write!(f, "category = {}", category),
            ProductFilter::Price(price) => write!(f, "price = {}", price),
        }
    }
}

/// A re-runnable query over the products table.
#[derive(Debug, Clone)]
pub struct ProductQuery {
    pool: SqlitePool,
    filter: ProductFilter,
}

impl ProductQuery {
    pub(crate) fn new(pool: SqlitePool, filter: ProductFilter) -> Self {
        ProductQuery { pool, filter }
    }

    /// The filter this query applies.
    pub fn filter(&self) -> &ProductFilter {
        &self.filter
    }

    /// Runs the query and returns every matching product.
    pub async fn fetch_all(&self) -> DbResult<Vec<Product>> {
        debug!(filter = %self.filter, "Fetching products");

        let sql = format!(
            "SELECT id, name, description, price_cents, available, category \
             FROM products WHERE {} = ?1 ORDER BY name, id",
            self.filter.column()
        );

        let rows = self
            .filter
            .bind(sqlx::query_as::<_, ProductRow>(&sql))
            .fetch_all(&self.pool)
            .await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<DbResult<Vec<_>>>()?;

        debug!(count = products.len(), "Query returned products");
        Ok(products)
    }

    /// Runs the query and returns the first match, if any.
    pub async fn first(&self) -> DbResult<Option<Product>> {
        let sql = format!(
            "SELECT id, name, description, price_cents, available, category \
             FROM products WHERE {} = ?1 ORDER BY name, id LIMIT 1",
            self.filter.column()
        );

        let row = self
            .filter
            .bind(sqlx::query_as::<_, ProductRow>(&sql))
            .fetch_optional(&self.pool)
            .await?;

        row.map(Product::try_from).transpose()
    }

    /// Counts matching products without loading them.
    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!(
            "SELECT COUNT(*) FROM products WHERE {} = ?1",
            self.filter.column()
        );

        let (count,) = self
            .filter
            .bind(sqlx::query_as::<_, (i64,)>(&sql))
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
