//! Merchant account model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flash_vitrine_core::{Email, UserId};

/// A merchant account.
///
/// The password hash is intentionally not part of this struct; it never
/// leaves the `db::users` layer.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Database ID.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Email address (unique, lowercase).
    pub email: Email,
    /// When the account was created.
    pub created_at: DateTime<Utc>,
}
