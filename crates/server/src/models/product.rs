//! Product model.

use chrono::{DateTime, Utc};
use serde::Serialize;

use flash_vitrine_core::{Price, ProductId, VitrineId};

/// Maximum number of products a vitrine may hold.
pub const MAX_PRODUCTS_PER_VITRINE: i64 = 5;

/// A product listed on a vitrine.
///
/// A product's effective owner is its parent vitrine's owner; authorization
/// always resolves through that chain.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Database ID.
    pub id: ProductId,
    /// Parent vitrine.
    pub vitrine_id: VitrineId,
    /// Product name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Optional image URL (from the upload endpoint).
    pub image_url: Option<String>,
    /// Price, serialized as a decimal string.
    pub price: Price,
    /// Whether the product is currently in stock.
    pub available: bool,
    /// When the product was created.
    pub created_at: DateTime<Utc>,
    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}
