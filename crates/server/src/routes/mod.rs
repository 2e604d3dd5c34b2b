//! Route handlers for the Flash Vitrine API.

use axum::Router;

use crate::error::AppError;
use crate::state::AppState;

pub mod auth;
pub mod products;
pub mod upload;
pub mod vitrines;

/// Build the full API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(vitrines::router())
        .merge(products::router())
        .merge(upload::router())
}

/// Normalize a name field from a partial update: trimmed, and never blank.
/// The column is required, so an update may omit the name but not empty it.
fn normalized_name(name: Option<String>) -> Result<Option<String>, AppError> {
    match name {
        Some(name) => {
            let name = name.trim().to_owned();
            if name.is_empty() {
                return Err(AppError::Validation("name is required".to_string()));
            }
            Ok(Some(name))
        }
        None => Ok(None),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_name_passes_absent_through() {
        assert_eq!(normalized_name(None).unwrap(), None);
    }

    #[test]
    fn test_normalized_name_trims() {
        assert_eq!(
            normalized_name(Some("  Corner Shop ".to_string())).unwrap(),
            Some("Corner Shop".to_string())
        );
    }

    #[test]
    fn test_normalized_name_rejects_blank() {
        assert!(matches!(
            normalized_name(Some(String::new())),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            normalized_name(Some("   ".to_string())),
            Err(AppError::Validation(_))
        ));
    }
}
