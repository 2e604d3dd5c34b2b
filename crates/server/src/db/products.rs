//! Product repository with ownership and cardinality enforcement.
//!
//! The five-product cap is enforced inside a transaction that takes a row
//! lock on the parent vitrine: concurrent creations against the same vitrine
//! serialize on that lock, so two requests can never both observe a count of
//! four and insert a sixth product.

use sqlx::PgPool;

use flash_vitrine_core::{Price, ProductId, UserId, VitrineId};

use super::RepositoryError;
use crate::models::Product;
use crate::models::product::MAX_PRODUCTS_PER_VITRINE;

/// Fields for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Price,
    pub available: bool,
}

/// Fields a product's owner may change. `None` leaves the column untouched.
#[derive(Debug, Default, Clone)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Price>,
    pub available: Option<bool>,
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a product on `vitrine_id` on behalf of `caller`, enforcing the
    /// per-vitrine cap.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vitrine doesn't exist.
    /// Returns `RepositoryError::Forbidden` if `caller` is not the vitrine's owner.
    /// Returns `RepositoryError::LimitExceeded` if the vitrine already holds
    /// five products.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_capped(
        &self,
        vitrine_id: VitrineId,
        caller: UserId,
        new: NewProduct,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        // Lock the vitrine row for the rest of the transaction. This is what
        // serializes concurrent count-and-insert sequences per vitrine.
        let owner: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM vitrines WHERE id = $1 FOR UPDATE")
                .bind(vitrine_id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((owner,)) = owner else {
            return Err(RepositoryError::NotFound);
        };

        if owner != caller {
            return Err(RepositoryError::Forbidden);
        }

        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM products WHERE vitrine_id = $1")
                .bind(vitrine_id)
                .fetch_one(&mut *tx)
                .await?;

        if count >= MAX_PRODUCTS_PER_VITRINE {
            return Err(RepositoryError::LimitExceeded);
        }

        let product = sqlx::query_as::<_, Product>(
            r"
            INSERT INTO products (vitrine_id, name, description, image_url, price, available)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, vitrine_id, name, description, image_url, price, available,
                      created_at, updated_at
            ",
        )
        .bind(vitrine_id)
        .bind(new.name)
        .bind(new.description)
        .bind(new.image_url)
        .bind(new.price)
        .bind(new.available)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// List a vitrine's products, oldest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_vitrine(
        &self,
        vitrine_id: VitrineId,
    ) -> Result<Vec<Product>, RepositoryError> {
        let products = sqlx::query_as::<_, Product>(
            r"
            SELECT id, vitrine_id, name, description, image_url, price, available,
                   created_at, updated_at
            FROM products
            WHERE vitrine_id = $1
            ORDER BY created_at ASC
            ",
        )
        .bind(vitrine_id)
        .fetch_all(self.pool)
        .await?;

        Ok(products)
    }

    /// Update a product's fields on behalf of `caller`.
    ///
    /// Ownership resolves through the parent vitrine.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Forbidden` if `caller` does not own the
    /// parent vitrine.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: ProductId,
        caller: UserId,
        changes: ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        check_owner(&mut tx, id, caller).await?;

        let product = sqlx::query_as::<_, Product>(
            r"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                image_url = COALESCE($4, image_url),
                price = COALESCE($5, price),
                available = COALESCE($6, available),
                updated_at = now()
            WHERE id = $1
            RETURNING id, vitrine_id, name, description, image_url, price, available,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.image_url)
        .bind(changes.price)
        .bind(changes.available)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(product)
    }

    /// Delete a product on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product doesn't exist.
    /// Returns `RepositoryError::Forbidden` if `caller` does not own the
    /// parent vitrine.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete(&self, id: ProductId, caller: UserId) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        check_owner(&mut tx, id, caller).await?;

        sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }
}

/// Resolve the product's owner through its parent vitrine and verify it
/// matches `caller`, locking the product row for the transaction.
async fn check_owner(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    id: ProductId,
    caller: UserId,
) -> Result<(), RepositoryError> {
    let owner: Option<(UserId,)> = sqlx::query_as(
        r"
        SELECT v.user_id
        FROM products p
        JOIN vitrines v ON v.id = p.vitrine_id
        WHERE p.id = $1
        FOR UPDATE OF p
        ",
    )
    .bind(id)
    .fetch_optional(&mut **tx)
    .await?;

    let Some((owner,)) = owner else {
        return Err(RepositoryError::NotFound);
    };

    if owner != caller {
        return Err(RepositoryError::Forbidden);
    }

    Ok(())
}
