//! JSON body extraction with domain error responses.
//!
//! Axum's stock `Json` rejection replies 422 with a plain-text body. The API
//! contract is a 400 with the `{"error": ...}` shape for anything malformed,
//! so handlers take [`AppJson`] instead and rejections flow through
//! [`AppError`].

use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// JSON body extractor that rejects with [`AppError::Validation`].
///
/// Drop-in replacement for `axum::Json` in handler arguments. Invalid JSON,
/// missing fields, and mistyped values all become a 400 with the usual JSON
/// error body.
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::Validation(rejection.body_text()))?;

        Ok(Self(value))
    }
}
