//! Product route handlers.
//!
//! All three operations resolve ownership through the product's parent
//! vitrine before touching anything.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete as delete_route, post, put},
};
use serde::Deserialize;

use flash_vitrine_core::{Price, ProductId, VitrineId};

use crate::db::RepositoryError;
use crate::db::products::{NewProduct, ProductRepository, ProductUpdate};
use crate::error::{AppError, Result};
use crate::middleware::{AppJson, RequireAuth};
use crate::models::Product;
use crate::routes::auth::MessageResponse;
use crate::routes::normalized_name;
use crate::state::AppState;

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/products", post(create))
        .route("/api/products/{id}", put(update))
        .route("/api/products/{id}", delete_route(remove))
}

const fn default_available() -> bool {
    true
}

/// Request body for creating a product.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub vitrine_id: VitrineId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Price,
    #[serde(default = "default_available")]
    pub available: bool,
}

/// Request body for updating a product. Absent fields are left unchanged.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Price>,
    pub available: Option<bool>,
}

/// Create a product on a vitrine owned by the caller.
///
/// # Errors
///
/// Returns 404 if the vitrine doesn't exist, 403 if the caller doesn't own
/// it, 409 if the vitrine already holds five products.
pub async fn create(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    AppJson(body): AppJson<CreateProductRequest>,
) -> Result<Json<Product>> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("name is required".to_string()));
    }

    let new = NewProduct {
        name: name.to_string(),
        description: body.description,
        image_url: body.image_url,
        price: body.price,
        available: body.available,
    };

    let product = ProductRepository::new(state.pool())
        .create_capped(body.vitrine_id, user.id, new)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Vitrine".to_string()),
            RepositoryError::Forbidden => AppError::Forbidden,
            RepositoryError::LimitExceeded => AppError::ProductLimitExceeded,
            other => AppError::Database(other),
        })?;

    tracing::info!(product_id = %product.id, vitrine_id = %product.vitrine_id, "product created");

    Ok(Json(product))
}

/// Update a product's fields.
///
/// # Errors
///
/// Returns 400 if the new name is blank, 404 if the product doesn't exist,
/// 403 if the caller doesn't own its vitrine.
pub async fn update(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    AppJson(body): AppJson<UpdateProductRequest>,
) -> Result<Json<Product>> {
    let changes = ProductUpdate {
        name: normalized_name(body.name)?,
        description: body.description,
        image_url: body.image_url,
        price: body.price,
        available: body.available,
    };

    let product = ProductRepository::new(state.pool())
        .update(id, user.id, changes)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product".to_string()),
            RepositoryError::Forbidden => AppError::Forbidden,
            other => AppError::Database(other),
        })?;

    Ok(Json(product))
}

/// Delete a product.
///
/// # Errors
///
/// Returns 404 if the product doesn't exist, 403 if the caller doesn't own
/// its vitrine.
pub async fn remove(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<MessageResponse>> {
    ProductRepository::new(state.pool())
        .delete(id, user.id)
        .await
        .map_err(|e| match e {
            RepositoryError::NotFound => AppError::NotFound("Product".to_string()),
            RepositoryError::Forbidden => AppError::Forbidden,
            other => AppError::Database(other),
        })?;

    tracing::info!(product_id = %id, "product deleted");

    Ok(Json(MessageResponse {
        message: "Product removed".to_string(),
    }))
}
