//! Vitrine route handlers.
//!
//! The public slug lookup is unauthenticated; everything else requires a
//! session, and mutations require ownership.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

use flash_vitrine_core::{Slug, VitrineId};

use crate::db::RepositoryError;
use crate::db::products::ProductRepository;
use crate::db::vitrines::{VitrineRepository, VitrineUpdate};
use crate::error::{AppError, Result};
use crate::middleware::{AppJson, RequireAuth};
use crate::models::{Product, Vitrine};
use crate::routes::normalized_name;
use crate::state::AppState;

/// Build the vitrines router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/vitrines", post(create))
        .route("/api/vitrines/user", get(list_mine))
        .route("/api/vitrines/{id}", put(update))
        .route("/api/vitrine/{slug}", get(public_by_slug))
}

/// Request body for creating a vitrine.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVitrineRequest {
    pub name: String,
    pub description: Option<String>,
    pub slug: String,
    pub cover_image_url: Option<String>,
}

/// Request body for updating a vitrine. Absent fields are left unchanged;
/// the slug cannot be changed.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVitrineRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub cover_image_url: Option<String>,
}

/// Public storefront payload: the vitrine and its products.
#[derive(Debug, Serialize)]
pub struct PublicVitrineResponse {
    pub vitrine: Vitrine,
    pub products: Vec<Product>,
}

/// Create a vitrine owned by the authenticated caller.
///
/// # Errors
///
/// Returns 400 for a blank name or malformed slug, 409 if the slug is taken.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateVitrineRequest>,
) -> Result<Json<Vitrine>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let slug = Slug::parse(&body.slug)
        .map_err(|e| AppError::Validation(format!("invalid slug: {e}")))?;

    let vitrine = VitrineRepository::new(state.pool())
        .create(
            user.id,
            name,
            body.description.as_deref(),
            &slug,
            body.cover_image_url.as_deref(),
        )
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => AppError::SlugConflict,
            other => AppError::Database(other),
        })?;

    tracing::info!(vitrine_id = %vitrine.id, slug = %vitrine.slug, "vitrine created");

    Ok(Json(vitrine))
}

/// List the authenticated caller's vitrines, newest first.
///
/// # Errors
///
/// Returns 401 without a valid session.
pub async fn list_mine(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Vitrine>>> {
    let vitrines = VitrineRepository::new(state.pool())
        .list_by_owner(user.id)
        .await?;

    Ok(Json(vitrines))
}

/// Update a vitrine's name, description, or cover image.
///
/// # Errors
///
/// Returns 400 if the new name is blank, 404 if the vitrine doesn't exist,
/// 403 if the caller doesn't own it.
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<VitrineId>,
    AppJson(body): AppJson<UpdateVitrineRequest>,
) -> Result<Json<Vitrine>> {
    let changes = VitrineUpdate {
        name: normalized_name(body.name)?,
        description: body.description,
        cover_image_url: body.cover_image_url,
    };

    let vitrine = VitrineRepository::new(state.pool())
        .update(id, user.id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Vitrine".to_string()),
            RepositoryError::Forbidden => AppError::Forbidden,
            other => AppError::Database(other),
        })?;

    Ok(Json(vitrine))
}

/// Public storefront lookup by slug: the vitrine plus its products.
///
/// # Errors
///
/// Returns 404 if no vitrine has this slug.
pub async fn public_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<PublicVitrineResponse>> {
    let vitrine = VitrineRepository::new(state.pool())
        .get_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound("Vitrine".to_string()))?;

    let products = ProductRepository::new(state.pool())
        .list_by_vitrine(vitrine.id)
        .await?;

    Ok(Json(PublicVitrineResponse { vitrine, products }))
}
