//! # Product Repository
//!
//! Database operations for the `products` table.
//!
//! ## Key Operations
//! - Ordered listing
//! - Absolute and relative quantity updates
//! - Guarded decrement
//!
//! ## Guarded Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Stock Removal Strategy                               │
//! │                                                                         │
//! │  ❌ WRONG: Check, then update (two statements, racy)                   │
//! │     SELECT current_quantity ...   → 5                                  │
//! │     UPDATE ... SET current_quantity = 5 - 4                            │
//! │     (another session removed 3 in between → -2)                        │
//! │                                                                         │
//! │  ✅ CORRECT: One conditional update                                    │
//! │     UPDATE products                                                    │
//! │     SET current_quantity = current_quantity - $1                       │
//! │     WHERE id = $2 AND current_quantity >= $3                           │
//! │                                                                         │
//! │  0 rows affected → follow-up SELECT only to tell                       │
//! │  "no such product" apart from "not enough stock".                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use sqlx::AnyPool;
use tracing::{debug, warn};

use crate::error::{DbError, DbResult};
use fridge_core::validation::{validate_amount, validate_product_name, validate_quantity};
use fridge_core::{CoreError, CoreResult, InventoryStore, NewProduct, Product};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let all = repo.list_all().await?;
/// repo.decrement(3, 2).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: AnyPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: AnyPool) -> Self {
        ProductRepository { pool }
    }

    /// Lists every product, ascending by id.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, current_quantity, norm_quantity
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Loaded products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, current_quantity, norm_quantity
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Number of products.
    pub async fn count(&self) -> DbResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Inserts a new product and returns it with its assigned id.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted row
    /// * `Err(DbError::InvalidArgument)` - Empty name or negative quantity
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        validate_product_name(&product.name)?;
        validate_quantity(product.current_quantity)?;
        validate_quantity(product.norm_quantity)?;

        debug!(name = %product.name, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, current_quantity, norm_quantity)
            VALUES ($1, $2, $3)
            RETURNING id, name, current_quantity, norm_quantity
            "#,
        )
        .bind(&product.name)
        .bind(product.current_quantity)
        .bind(product.norm_quantity)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Overwrites the current quantity.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::InvalidArgument)` - `quantity < 0`, nothing executed
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn set_quantity(&self, id: i64, quantity: i64) -> DbResult<()> {
        validate_quantity(quantity)?;
        debug!(id, quantity, "Setting quantity");

        let result = sqlx::query("UPDATE products SET current_quantity = $1 WHERE id = $2")
            .bind(quantity)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Adds `amount` packs. The addition happens in the database.
    pub async fn increment(&self, id: i64, amount: i64) -> DbResult<()> {
        validate_amount(amount)?;
        debug!(id, amount, "Incrementing quantity");

        let result = sqlx::query(
            "UPDATE products SET current_quantity = current_quantity + $1 WHERE id = $2",
        )
        .bind(amount)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Removes `amount` packs in a single conditional update.
    ///
    /// ## Returns
    /// * `Ok(())` - Quantity reduced
    /// * `Err(DbError::InsufficientQuantity)` - Fewer than `amount` in stock, row unchanged
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn decrement(&self, id: i64, amount: i64) -> DbResult<()> {
        validate_amount(amount)?;
        debug!(id, amount, "Decrementing quantity");

        let result = sqlx::query(
            r#"
            UPDATE products
            SET current_quantity = current_quantity - $1
            WHERE id = $2 AND current_quantity >= $3
            "#,
        )
        .bind(amount)
        .bind(id)
        .bind(amount)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() > 0 {
            return Ok(());
        }

        let available: Option<(i64,)> =
            sqlx::query_as("SELECT current_quantity FROM products WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        match available {
            None => Err(DbError::not_found("Product", id)),
            Some((available,)) => {
                warn!(id, available, requested = amount, "Insufficient quantity");
                Err(DbError::InsufficientQuantity {
                    id,
                    available,
                    requested: amount,
                })
            }
        }
    }
}

impl InventoryStore for ProductRepository {
    fn list_all(&self) -> impl Future<Output = CoreResult<Vec<Product>>> + Send {
        async move { ProductRepository::list_all(self).await.map_err(CoreError::from) }
    }

    fn set_quantity(&self, id: i64, quantity: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            ProductRepository::set_quantity(self, id, quantity)
                .await
                .map_err(CoreError::from)
        }
    }

    fn increment(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            ProductRepository::increment(self, id, amount)
                .await
                .map_err(CoreError::from)
        }
    }

    fn decrement(&self, id: i64, amount: i64) -> impl Future<Output = CoreResult<()>> + Send {
        async move {
            ProductRepository::decrement(self, id, amount)
                .await
                .map_err(CoreError::from)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::Database;
    use crate::schema;

    async fn seeded() -> (Database, ProductRepository) {
        let db = Database::in_memory().await.unwrap();
        schema::ensure_schema(&db).await.unwrap();
        schema::seed_defaults(&db).await.unwrap();
        let repo = db.products();
        (db, repo)
    }

    async fn quantity_of(repo: &ProductRepository, id: i64) -> i64 {
        repo.get_by_id(id).await.unwrap().unwrap().current_quantity
    }

    #[tokio::test]
    async fn test_list_all_ascending_by_id() {
        let (_db, repo) = seeded().await;
        let products = repo.list_all().await.unwrap();

        let ids: Vec<i64> = products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
        assert_eq!(products[0], Product::new(1, "Cottage cheese", 5, 10));
        assert_eq!(repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_empty_table_lists_nothing() {
        let db = Database::in_memory().await.unwrap();
        schema::ensure_schema(&db).await.unwrap();
        assert!(db.products().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_quantity() {
        let (_db, repo) = seeded().await;
        repo.set_quantity(3, 0).await.unwrap();
        assert_eq!(quantity_of(&repo, 3).await, 0);
    }

    #[tokio::test]
    async fn test_set_negative_quantity_rejected() {
        let (_db, repo) = seeded().await;
        let err = repo.set_quantity(3, -1).await.unwrap_err();
        assert!(matches!(err, DbError::InvalidArgument(_)));
        assert_eq!(quantity_of(&repo, 3).await, 18);
    }

    #[tokio::test]
    async fn test_unknown_id_not_found() {
        let (_db, repo) = seeded().await;
        assert!(matches!(repo.set_quantity(42, 1).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.increment(42, 1).await, Err(DbError::NotFound { .. })));
        assert!(matches!(repo.decrement(42, 1).await, Err(DbError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_increment_then_decrement_is_identity() {
        let (_db, repo) = seeded().await;
        repo.increment(4, 6).await.unwrap();
        assert_eq!(quantity_of(&repo, 4).await, 31);
        repo.decrement(4, 6).await.unwrap();
        assert_eq!(quantity_of(&repo, 4).await, 25);
    }

    #[tokio::test]
    async fn test_decrement_to_zero() {
        let (_db, repo) = seeded().await;
        repo.decrement(5, 3).await.unwrap();
        assert_eq!(quantity_of(&repo, 5).await, 0);
    }

    #[tokio::test]
    async fn test_decrement_insufficient_leaves_row_unchanged() {
        let (_db, repo) = seeded().await;
        let err = repo.decrement(5, 4).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::InsufficientQuantity {
                id: 5,
                available: 3,
                requested: 4
            }
        ));
        assert_eq!(quantity_of(&repo, 5).await, 3);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let (_db, repo) = seeded().await;
        assert!(matches!(repo.increment(1, 0).await, Err(DbError::InvalidArgument(_))));
        assert!(matches!(repo.decrement(1, -3).await, Err(DbError::InvalidArgument(_))));
        assert_eq!(quantity_of(&repo, 1).await, 5);
    }

    #[tokio::test]
    async fn test_insert_assigns_id() {
        let db = Database::in_memory().await.unwrap();
        schema::ensure_schema(&db).await.unwrap();
        let repo = db.products();

        let butter = repo
            .insert(&NewProduct {
                name: "Butter".into(),
                current_quantity: 2,
                norm_quantity: 6,
            })
            .await
            .unwrap();

        assert!(butter.id > 0);
        assert_eq!(repo.get_by_id(butter.id).await.unwrap(), Some(butter));
    }

    #[tokio::test]
    async fn test_store_trait_maps_errors() {
        let (_db, repo) = seeded().await;

        let err = InventoryStore::decrement(&repo, 5, 10).await.unwrap_err();
        assert!(matches!(err, CoreError::InsufficientQuantity { available: 3, .. }));

        let err = InventoryStore::increment(&repo, 99, 1).await.unwrap_err();
        assert!(matches!(err, CoreError::ProductNotFound(99)));
    }

    #[tokio::test]
    async fn test_closed_handle_is_unavailable() {
        let (db, repo) = seeded().await;
        db.close().await;

        let err = InventoryStore::list_all(&repo).await.unwrap_err();
        assert!(matches!(err, CoreError::Unavailable(_)));
    }
}
