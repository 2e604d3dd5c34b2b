//! Storefront (vitrine) model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flash_vitrine_core::{Slug, UserId, VitrineId};

/// A merchant's public storefront page.
///
/// Owned by exactly one user, set at creation and never transferred. The
/// slug is the vitrine's public address and is immutable once chosen.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Vitrine {
    /// Database ID.
    pub id: VitrineId,
    /// Owning user.
    pub user_id: UserId,
    /// Display name of the storefront.
    pub name: String,
    /// Optional description shown on the public page.
    pub description: Option<String>,
    /// Unique URL-safe identifier.
    pub slug: Slug,
    /// Optional cover image URL (from the upload endpoint).
    pub cover_image_url: Option<String>,
    /// When the vitrine was created.
    pub created_at: DateTime<Utc>,
    /// When the vitrine was last updated.
    pub updated_at: DateTime<Utc>,
}
