//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD: `create`, `find`, `update`, `delete`
//! - Listing: `all`, `count`
//! - Equality queries: `find_by_name`, `find_by_availability`,
//!   `find_by_category`, `find_by_price`
//!
//! ## Row Mapping
//! ```text
//! ┌──────────────────────────────┐        ┌──────────────────────────────┐
//! │ Product (catalog-core)       │        │ products table               │
//! │                              │        │                              │
//! │ id: Option<Uuid>        ─────┼──────► │ id TEXT (hyphenated uuid)    │
//! │ name: String            ─────┼──────► │ name TEXT                    │
//! │ description: String     ─────┼──────► │ description TEXT             │
//! │ price: Price (12.50)    ─────┼──────► │ price_cents INTEGER (1250)   │
//! │ available: bool         ─────┼──────► │ available INTEGER (0/1)      │
//! │ category: Category      ─────┼──────► │ category TEXT ('CLOTHS')     │
//! └──────────────────────────────┘        └──────────────────────────────┘
//! ```

use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use catalog_core::{Category, DataValidationError, Price, Product};

use crate::error::{DbError, DbResult};
use crate::repository::query::{ProductFilter, ProductQuery};

/// A row of the products table, as read by sqlx.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ProductRow {
    id: String,
    name: String,
    description: String,
    price_cents: i64,
    available: bool,
    category: Category,
}

impl TryFrom<ProductRow> for Product {
    type Error = DbError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&row.id).map_err(|e| DbError::invalid_row("id", e.to_string()))?;

        Ok(Product {
            id: Some(id),
            name: row.name,
            description: row.description,
            price: Price::from_cents(row.price_cents),
            available: row.available,
            category: row.category,
        })
    }
}

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let mut hat = Product::new("Fedora", "A red hat", "12.50".parse()?, true, Category::Cloths);
/// repo.create(&mut hat).await?;          // hat.id is now Some(..)
///
/// let found = repo.find(hat.id.unwrap()).await?;
/// let cloths = repo.find_by_category(Category::Cloths).fetch_all().await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Inserts a new product and assigns its id.
    ///
    /// ## Returns
    /// * `Ok(Uuid)` - the id now stored in `product.id`
    /// * `Err(DbError::Validation)` - product already has an id, or a field rule fails
    pub async fn create(&self, product: &mut Product) -> DbResult<Uuid> {
        if let Some(id) = product.id {
            return Err(DataValidationError::AlreadyPersisted(id.to_string()).into());
        }
        product.validate()?;

        let id = Uuid::new_v4();
        debug!(id = %id, name = %product.name, "Creating product");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, description, price_cents, available, category)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        product.id = Some(id);
        Ok(id)
    }

    /// Overwrites the stored row with the product's current fields.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::Validation(NotPersisted))` - product has no id; nothing is inserted
    /// * `Err(DbError::NotFound)` - no row with that id (deleted meanwhile)
    pub async fn update(&self, product: &Product) -> DbResult<()> {
        let id = product.id.ok_or(DataValidationError::NotPersisted)?;
        product.validate()?;

        debug!(id = %id, "Updating product");

        let result = sqlx::query(
            r#"
            UPDATE products SET
                name = ?2,
                description = ?3,
                price_cents = ?4,
                available = ?5,
                category = ?6
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.cents())
        .bind(product.available)
        .bind(product.category)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id.to_string()));
        }

        Ok(())
    }

    /// Deletes the product's row and clears its id.
    ///
    /// Deleting a product that has no id, or whose row is already gone, is a
    /// no-op. The other fields of `product` are left as they were.
    ///
    /// ## Returns
    /// `true` if a row was removed.
    pub async fn delete(&self, product: &mut Product) -> DbResult<bool> {
        let Some(id) = product.id else {
            debug!(name = %product.name, "Delete of unpersisted product ignored");
            return Ok(false);
        };

        let removed = self.delete_by_id(id).await?;
        product.id = None;
        Ok(removed)
    }

    /// Deletes the row with the given id, if any.
    pub async fn delete_by_id(&self, id: Uuid) -> DbResult<bool> {
        debug!(id = %id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn find(&self, id: Uuid) -> DbResult<Option<Product>> {
        debug!(id = %id, "Finding product");

        let row = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price_cents, available, category
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Returns every product, ordered by name then id.
    pub async fn all(&self) -> DbResult<Vec<Product>> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r#"
            SELECT id, name, description, price_cents, available, category
            FROM products
            ORDER BY name, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Products with exactly this name (case-sensitive).
    pub fn find_by_name(&self, name: impl Into<String>) -> ProductQuery {
        self.query(ProductFilter::Name(name.into()))
    }

    /// Products whose availability equals `available`.
    pub fn find_by_availability(&self, available: bool) -> ProductQuery {
        self.query(ProductFilter::Available(available))
    }

    /// Products in the given category.
    pub fn find_by_category(&self, category: Category) -> ProductQuery {
        self.query(ProductFilter::Category(category))
    }

    /// Products with exactly this price.
    ///
    /// Accepts a `Price`, a `rust_decimal::Decimal`, or its string form;
    /// `"12.5"`, `"12.50"` and `Decimal 12.50` all select the same rows.
    ///
    /// ## Returns
    /// * `Err(DbError::Validation)` - the value is not an exact two-place price
    pub fn find_by_price<P>(&self, price: P) -> DbResult<ProductQuery>
    where
        P: TryInto<Price>,
        DataValidationError: From<P::Error>,
    {
        let price = price.try_into().map_err(DataValidationError::from)?;
        Ok(self.query(ProductFilter::Price(price)))
    }

    /// Counts all products.
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Deletes every product. Returns the number of rows removed.
    pub async fn remove_all(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;

        debug!(removed = result.rows_affected(), "Removed all products");
        Ok(result.rows_affected())
    }

    fn query(&self, filter: ProductFilter) -> ProductQuery {
        ProductQuery::new(self.pool.clone(), filter)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
