//! Authentication route handlers: register, login, logout.

use axum::{
    Json, Router,
    extract::State,
    http::HeaderMap,
    routing::post,
};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::middleware::AppJson;
use crate::middleware::auth::session_token;
use crate::models::User;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Build the authentication router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/register", post(register))
        .route("/api/login", post(login))
        .route("/api/logout", post(logout))
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response for successful registration or login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: User,
    pub session_id: String,
}

/// Generic message response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Register a new merchant account and issue a session.
///
/// # Errors
///
/// Returns 400 for invalid name/email/password, 409 if the email is taken.
pub async fn register(
    State(state): State<AppState>,
    AppJson(body): AppJson<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.config().session_ttl_hours);
    let authed = auth
        .register(&body.name, &body.email, &body.password)
        .await?;

    tracing::info!(user_id = %authed.user.id, "user registered");

    Ok(Json(AuthResponse {
        user: authed.user,
        session_id: authed.session_id,
    }))
}

/// Login with email and password, issuing a fresh session.
///
/// # Errors
///
/// Returns 401 for wrong email or password, indistinguishably.
pub async fn login(
    State(state): State<AppState>,
    AppJson(body): AppJson<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let auth = AuthService::new(state.pool(), state.config().session_ttl_hours);
    let authed = auth.login(&body.email, &body.password).await?;

    tracing::info!(user_id = %authed.user.id, "user logged in");

    Ok(Json(AuthResponse {
        user: authed.user,
        session_id: authed.session_id,
    }))
}

/// Destroy the presented session.
///
/// Always succeeds: a missing or unknown token is treated as already
/// logged out.
///
/// # Errors
///
/// Returns 500 only if the session store is unreachable.
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>> {
    if let Some(token) = session_token(&headers) {
        let auth = AuthService::new(state.pool(), state.config().session_ttl_hours);
        auth.logout(token).await?;
    }

    Ok(Json(MessageResponse {
        message: "Logged out".to_string(),
    }))
}
