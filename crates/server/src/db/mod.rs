//! Database operations for the Flash Vitrine `PostgreSQL` store.
//!
//! ## Tables
//!
//! - `users` - Merchant accounts (email unique, password hash)
//! - `sessions` - Server-side session tokens with TTL
//! - `vitrines` - Storefronts, one owner each, slug unique
//! - `products` - At most five per vitrine
//!
//! # Migrations
//!
//! Migrations are stored in `crates/server/migrations/` and run via:
//! ```bash
//! cargo run -p flash-vitrine-cli -- migrate
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod products;
pub mod sessions;
pub mod users;
pub mod vitrines;

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email or slug).
    #[error("constraint violation: {0}")]
    Conflict(String),

    /// Caller does not own the affected resource.
    #[error("caller does not own this resource")]
    Forbidden,

    /// The vitrine already holds the maximum number of products.
    #[error("product limit reached")]
    LimitExceeded,
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
