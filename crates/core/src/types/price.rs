//! Product price type backed by decimal arithmetic.

use core::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone)]
pub enum PriceError {
    /// The input is not a decimal number.
    #[error("price must be a decimal number")]
    Invalid,
    /// The amount is negative.
    #[error("price cannot be negative")]
    Negative,
    /// The amount has more than two decimal places.
    #[error("price cannot have more than two decimal places")]
    TooPrecise,
}

/// A product price in the merchant's currency.
///
/// Prices travel over the wire as decimal strings (`"189.90"`) and are stored
/// as `NUMERIC(10,2)`, never as floats. Input with a comma decimal separator
/// (`"189,90"`) is accepted, matching what Brazilian merchants type.
///
/// ## Examples
///
/// ```
/// use flash_vitrine_core::Price;
///
/// let price = Price::parse("189.90").unwrap();
/// assert_eq!(price.to_string(), "189.90");
///
/// // Comma separator is normalized
/// assert_eq!(Price::parse("189,90").unwrap(), price);
///
/// assert!(Price::parse("-1").is_err());
/// assert!(Price::parse("1.999").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Price(Decimal);

impl Price {
    /// Parse a `Price` from a decimal string.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not a decimal number, is negative,
    /// or carries more than two decimal places.
    pub fn parse(s: &str) -> Result<Self, PriceError> {
        let normalized = s.trim().replace(',', ".");
        let amount = Decimal::from_str(&normalized).map_err(|_| PriceError::Invalid)?;
        Self::from_decimal(amount)
    }

    /// Build a `Price` from an existing [`Decimal`].
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is negative or has more than two
    /// decimal places.
    pub fn from_decimal(amount: Decimal) -> Result<Self, PriceError> {
        if amount.is_sign_negative() {
            return Err(PriceError::Negative);
        }

        if amount.scale() > 2 {
            return Err(PriceError::TooPrecise);
        }

        Ok(Self(amount))
    }

    /// Get the underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = PriceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// Serialized as a decimal string, matching the wire format of the API.
impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&format_args!("{self}"))
    }
}

impl<'de> Deserialize<'de> for Price {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

// SQLx support (with postgres feature): stored as NUMERIC via Decimal
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Price {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <Decimal as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <Decimal as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Price {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let amount = <Decimal as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values are assumed valid
        Ok(Self(amount))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Price {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <Decimal as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_prices() {
        assert!(Price::parse("0").is_ok());
        assert!(Price::parse("189.90").is_ok());
        assert!(Price::parse("1000").is_ok());
        assert!(Price::parse("0.99").is_ok());
    }

    #[test]
    fn test_parse_comma_separator() {
        assert_eq!(Price::parse("189,90").unwrap(), Price::parse("189.90").unwrap());
    }

    #[test]
    fn test_parse_negative() {
        assert!(matches!(Price::parse("-1"), Err(PriceError::Negative)));
    }

    #[test]
    fn test_parse_too_precise() {
        assert!(matches!(Price::parse("1.999"), Err(PriceError::TooPrecise)));
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Price::parse("abc"), Err(PriceError::Invalid)));
        assert!(matches!(Price::parse(""), Err(PriceError::Invalid)));
    }

    #[test]
    fn test_display_two_decimal_places() {
        assert_eq!(Price::parse("189.9").unwrap().to_string(), "189.90");
        assert_eq!(Price::parse("10").unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_serde_roundtrip() {
        let price = Price::parse("189.90").unwrap();
        let json = serde_json::to_string(&price).unwrap();
        assert_eq!(json, "\"189.90\"");

        let back: Price = serde_json::from_str(&json).unwrap();
        assert_eq!(back, price);
    }

    #[test]
    fn test_deserialize_rejects_invalid() {
        assert!(serde_json::from_str::<Price>("\"-5\"").is_err());
        assert!(serde_json::from_str::<Price>("\"abc\"").is_err());
    }
}
