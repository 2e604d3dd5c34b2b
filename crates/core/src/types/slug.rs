//! URL-safe vitrine slug type.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Slug`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum SlugError {
    /// The input string is empty.
    #[error("slug cannot be empty")]
    Empty,
    /// The input string is too long.
    #[error("slug must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
    /// The input contains a character outside `[a-z0-9-]`.
    #[error("slug may only contain lowercase letters, digits, and hyphens")]
    InvalidCharacter,
    /// The input starts or ends with a hyphen, or contains a doubled hyphen.
    #[error("slug hyphens must separate non-empty segments")]
    BadHyphenPlacement,
}

/// The URL-safe identifier of a vitrine.
///
/// A slug is the public address of a storefront (`/api/vitrine/{slug}`). It
/// is globally unique and immutable once the vitrine is created.
///
/// ## Constraints
///
/// - Length: 1-64 characters
/// - Characters: lowercase ASCII letters, digits, and hyphens
/// - Hyphens must separate non-empty segments (`loja-a` is valid,
///   `-loja`, `loja-`, and `loja--a` are not)
///
/// ## Examples
///
/// ```
/// use flash_vitrine_core::Slug;
///
/// assert!(Slug::parse("loja-a").is_ok());
/// assert!(Slug::parse("moda2024").is_ok());
///
/// assert!(Slug::parse("").is_err());        // empty
/// assert!(Slug::parse("Loja").is_err());    // uppercase
/// assert!(Slug::parse("loja_a").is_err());  // underscore
/// assert!(Slug::parse("-loja").is_err());   // leading hyphen
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Maximum length of a slug.
    pub const MAX_LENGTH: usize = 64;

    /// Parse a `Slug` from a string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is empty, too long, contains a
    /// character outside `[a-z0-9-]`, or places hyphens at the edges or
    /// back-to-back.
    pub fn parse(s: &str) -> Result<Self, SlugError> {
        if s.is_empty() {
            return Err(SlugError::Empty);
        }

        if s.len() > Self::MAX_LENGTH {
            return Err(SlugError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }

        if !s
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
        {
            return Err(SlugError::InvalidCharacter);
        }

        if s.starts_with('-') || s.ends_with('-') || s.contains("--") {
            return Err(SlugError::BadHyphenPlacement);
        }

        Ok(Self(s.to_owned()))
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Slug {
    type Err = SlugError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_slugs() {
        assert!(Slug::parse("loja-a").is_ok());
        assert!(Slug::parse("a").is_ok());
        assert!(Slug::parse("moda2024").is_ok());
        assert!(Slug::parse("minha-loja-de-roupas").is_ok());
        assert!(Slug::parse("123").is_ok());
    }

    #[test]
    fn test_parse_empty() {
        assert!(matches!(Slug::parse(""), Err(SlugError::Empty)));
    }

    #[test]
    fn test_parse_too_long() {
        let long = "a".repeat(65);
        assert!(matches!(Slug::parse(&long), Err(SlugError::TooLong { .. })));
        assert!(Slug::parse(&"a".repeat(64)).is_ok());
    }

    #[test]
    fn test_parse_invalid_characters() {
        for s in ["Loja", "loja_a", "loja a", "loja.a", "açaí"] {
            assert!(
                matches!(Slug::parse(s), Err(SlugError::InvalidCharacter)),
                "expected InvalidCharacter for {s:?}"
            );
        }
    }

    #[test]
    fn test_parse_bad_hyphens() {
        for s in ["-loja", "loja-", "loja--a"] {
            assert!(
                matches!(Slug::parse(s), Err(SlugError::BadHyphenPlacement)),
                "expected BadHyphenPlacement for {s:?}"
            );
        }
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::parse("loja-a").unwrap();
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"loja-a\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }

    #[test]
    fn test_display() {
        let slug = Slug::parse("loja-a").unwrap();
        assert_eq!(format!("{slug}"), "loja-a");
    }
}
