//! Session repository: issue, resolve, and destroy session tokens.
//!
//! Sessions live in the database rather than process memory, so a restart
//! does not invalidate every active login. Expiry is enforced at resolution
//! time; `purge_expired` reclaims dead rows.

use chrono::{Duration, Utc};
use sqlx::PgPool;

use flash_vitrine_core::UserId;

use super::RepositoryError;
use crate::models::CurrentUser;

/// Repository for session database operations.
pub struct SessionRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SessionRepository<'a> {
    /// Create a new session repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Store a freshly issued token for a user.
    ///
    /// The token is generated by the caller (see `services::auth`); this
    /// layer only persists it with its expiry.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        token: &str,
        user_id: UserId,
        ttl_hours: i64,
    ) -> Result<(), RepositoryError> {
        let expires_at = Utc::now() + Duration::hours(ttl_hours);

        sqlx::query(
            r"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(token)
        .bind(user_id)
        .bind(expires_at)
        .execute(self.pool)
        .await?;

        Ok(())
    }

    /// Resolve a token to the identity it was issued for.
    ///
    /// Unknown and expired tokens both resolve to `None`; the caller maps
    /// that to an unauthenticated response.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn resolve(&self, token: &str) -> Result<Option<CurrentUser>, RepositoryError> {
        let identity = sqlx::query_as::<_, CurrentUser>(
            r"
            SELECT u.id, u.name
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > now()
            ",
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(identity)
    }

    /// Destroy a session. Idempotent: destroying an unknown token is a no-op.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn destroy(&self, token: &str) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(())
    }

    /// Delete all expired sessions, returning the number removed.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn purge_expired(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= now()")
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
