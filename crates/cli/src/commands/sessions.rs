//! Session maintenance commands.
//!
//! Expired sessions are rejected at resolution time; this command reclaims
//! the dead rows. Suitable for a cron job.

use flash_vitrine_server::config::ServerConfig;
use flash_vitrine_server::db::{self, sessions::SessionRepository};

/// Errors from session maintenance.
#[derive(Debug, thiserror::Error)]
pub enum SessionCommandError {
    #[error("configuration error: {0}")]
    Config(#[from] flash_vitrine_server::config::ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("repository error: {0}")]
    Repository(#[from] flash_vitrine_server::db::RepositoryError),
}

/// Delete all expired session rows.
///
/// # Errors
///
/// Returns `SessionCommandError` if configuration is missing or the
/// database is unreachable.
pub async fn purge() -> Result<(), SessionCommandError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let removed = SessionRepository::new(&pool).purge_expired().await?;
    tracing::info!(removed, "expired sessions purged");

    Ok(())
}
