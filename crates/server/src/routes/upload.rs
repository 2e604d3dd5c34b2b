//! Image upload handler.
//!
//! Accepts a multipart `image` field, validates size and content type, and
//! writes the bytes under the configured upload directory with a random
//! filename. The rest of the system only ever sees the returned URL string;
//! uploaded files are served back via `/uploads/*` (tower-http `ServeDir`).

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Maximum accepted image size: 5 MiB.
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/api/upload",
        // Leave headroom for multipart framing around the 5 MiB payload.
        post(upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES + 64 * 1024)),
    )
}

/// Response for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub filename: String,
    pub size: usize,
}

/// Store an uploaded image and return its URL.
///
/// # Errors
///
/// Returns 400 if no `image` field is present, the content type is not an
/// image, or the file exceeds 5 MiB.
pub async fn upload(
    RequireAuth(user): RequireAuth,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("malformed multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_owned();
        if !is_allowed_image_type(&content_type) {
            return Err(AppError::Validation(
                "only image files are allowed".to_string(),
            ));
        }

        let original_name = field.file_name().map(str::to_owned);
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::Validation("image exceeds the 5 MiB limit".to_string()))?;

        if data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(
                "image exceeds the 5 MiB limit".to_string(),
            ));
        }

        let ext = extension_for(&content_type, original_name.as_deref());
        let filename = format!("{}.{ext}", Uuid::new_v4());
        let path = state.config().upload_dir.join(&filename);

        tokio::fs::write(&path, &data)
            .await
            .map_err(|e| AppError::Internal(format!("failed to store upload: {e}")))?;

        tracing::info!(user_id = %user.id, %filename, size = data.len(), "image uploaded");

        return Ok(Json(UploadResponse {
            url: format!("/uploads/{filename}"),
            filename,
            size: data.len(),
        }));
    }

    Err(AppError::Validation("no file sent".to_string()))
}

/// Whether this content type may be stored and served back from `/uploads`.
///
/// SVG is `image/*` but can carry scripts, and `/uploads` serves files
/// same-origin, so it is excluded.
fn is_allowed_image_type(content_type: &str) -> bool {
    content_type.starts_with("image/") && content_type != "image/svg+xml"
}

/// Pick a file extension from the content type, falling back to the original
/// filename's extension.
fn extension_for(content_type: &str, original_name: Option<&str>) -> String {
    match content_type {
        "image/jpeg" => return "jpg".to_string(),
        "image/png" => return "png".to_string(),
        "image/gif" => return "gif".to_string(),
        "image/webp" => return "webp".to_string(),
        _ => {}
    }

    // Fall back to the client-supplied extension, sanitized; never svg.
    original_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= 8
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
                && !ext.eq_ignore_ascii_case("svg")
        })
        .map_or_else(|| "img".to_string(), str::to_lowercase)
}
