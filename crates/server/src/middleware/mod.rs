//! Request middleware and extractors.

pub mod auth;
pub mod json;

pub use auth::{RequireAuth, SESSION_HEADER};
pub use json::AppJson;
