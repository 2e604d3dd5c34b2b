//! Session-related types.

use serde::Serialize;

use flash_vitrine_core::UserId;

/// The identity a session token resolves to.
///
/// Minimal data attached to a request once its `x-session-id` header has
/// been validated: enough to make ownership decisions and render a greeting,
/// nothing more.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CurrentUser {
    /// User's database ID.
    pub id: UserId,
    /// User's display name.
    pub name: String,
}
