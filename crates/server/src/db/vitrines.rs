//! Vitrine repository with ownership enforcement.
//!
//! Slug uniqueness is guaranteed by the unique index on `vitrines.slug`;
//! creation never does a lookup-then-insert, it inserts and maps the unique
//! violation. Mutations verify ownership inside the same transaction that
//! applies the change.

use sqlx::PgPool;

use flash_vitrine_core::{Slug, UserId, VitrineId};

use super::RepositoryError;
use crate::models::Vitrine;

/// Fields a vitrine owner may change after creation.
///
/// `None` leaves the column untouched. The slug is deliberately absent:
/// it is immutable once set.
#[derive(Debug, Default, Clone)]
pub struct VitrineUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Repository for vitrine database operations.
pub struct VitrineRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> VitrineRepository<'a> {
    /// Create a new vitrine repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create a vitrine owned by `owner`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the slug is already taken.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create(
        &self,
        owner: UserId,
        name: &str,
        description: Option<&str>,
        slug: &Slug,
        cover_image_url: Option<&str>,
    ) -> Result<Vitrine, RepositoryError> {
        let vitrine = sqlx::query_as::<_, Vitrine>(
            r"
            INSERT INTO vitrines (user_id, name, description, slug, cover_image_url)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, user_id, name, description, slug, cover_image_url,
                      created_at, updated_at
            ",
        )
        .bind(owner)
        .bind(name)
        .bind(description)
        .bind(slug)
        .bind(cover_image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already in use".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        Ok(vitrine)
    }

    /// Get a vitrine by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: VitrineId) -> Result<Option<Vitrine>, RepositoryError> {
        let vitrine = sqlx::query_as::<_, Vitrine>(
            r"
            SELECT id, user_id, name, description, slug, cover_image_url,
                   created_at, updated_at
            FROM vitrines
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(vitrine)
    }

    /// Get a vitrine by its public slug.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Vitrine>, RepositoryError> {
        let vitrine = sqlx::query_as::<_, Vitrine>(
            r"
            SELECT id, user_id, name, description, slug, cover_image_url,
                   created_at, updated_at
            FROM vitrines
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        Ok(vitrine)
    }

    /// List a user's vitrines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Vitrine>, RepositoryError> {
        let vitrines = sqlx::query_as::<_, Vitrine>(
            r"
            SELECT id, user_id, name, description, slug, cover_image_url,
                   created_at, updated_at
            FROM vitrines
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(owner)
        .fetch_all(self.pool)
        .await?;

        Ok(vitrines)
    }

    /// Update a vitrine's mutable fields on behalf of `caller`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the vitrine doesn't exist.
    /// Returns `RepositoryError::Forbidden` if `caller` is not the owner.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update(
        &self,
        id: VitrineId,
        caller: UserId,
        changes: VitrineUpdate,
    ) -> Result<Vitrine, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let owner: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM vitrines WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some((owner,)) = owner else {
            return Err(RepositoryError::NotFound);
        };

        if owner != caller {
            return Err(RepositoryError::Forbidden);
        }

        let vitrine = sqlx::query_as::<_, Vitrine>(
            r"
            UPDATE vitrines
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                cover_image_url = COALESCE($4, cover_image_url),
                updated_at = now()
            WHERE id = $1
            RETURNING id, user_id, name, description, slug, cover_image_url,
                      created_at, updated_at
            ",
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.description)
        .bind(changes.cover_image_url)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(vitrine)
    }
}
