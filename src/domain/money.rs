//! Price type
//!
//! Domain primitive for unit prices with business rule validation.
//! Prices entered through commands are held to the full rules. Prices read
//! back from a persisted blob only have to be non-negative, and are kept
//! exactly as recorded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Maximum allowed unit price (10 billion)
const MAX_PRICE: i64 = 10_000_000_000;

/// Maximum decimal places (cents)
const MAX_SCALE: u32 = 2;

/// Price represents a validated, non-negative unit price.
///
/// # Invariants
/// - Value is zero or positive
/// - Maximum 2 decimal places and 10 billion, unless read back via
///   [`Price::from_stored`]
///
/// Serialized as a JSON number; decodes from a number or a string.
///
/// # Example
/// ```
/// use rust_decimal::Decimal;
/// use wings_pos::domain::Price;
///
/// let price = Price::new(Decimal::new(3550, 2)).unwrap();
/// assert_eq!(price.line_total(2), Decimal::new(7100, 2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(try_from = "Decimal")]
pub struct Price(Decimal);

/// Errors that can occur when creating a Price
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoneyError {
    #[error("Price cannot be negative (got {0})")]
    Negative(Decimal),

    #[error("Price has too many decimal places (max {MAX_SCALE}, got {0})")]
    TooManyDecimals(u32),

    #[error("Price exceeds maximum allowed value ({MAX_PRICE})")]
    Overflow,

    #[error("Invalid price format: {0}")]
    ParseError(String),
}

impl Price {
    /// Create a new Price with validation.
    ///
    /// # Errors
    /// - `MoneyError::Negative` if value < 0
    /// - `MoneyError::TooManyDecimals` if more than 2 decimal places
    /// - `MoneyError::Overflow` if value > 10 billion
    pub fn new(value: Decimal) -> Result<Self, MoneyError> {
        if value < Decimal::ZERO {
            return Err(MoneyError::Negative(value));
        }

        // Trailing zeros ("35.00") are not extra precision
        let value = value.normalize();
        if value.scale() > MAX_SCALE {
            return Err(MoneyError::TooManyDecimals(value.scale()));
        }

        if value > Decimal::from(MAX_PRICE) {
            return Err(MoneyError::Overflow);
        }

        Ok(Self(value))
    }

    /// A price as recorded in a persisted blob.
    ///
    /// Only negativity is rejected: records written by earlier versions may
    /// carry more precision than new input is allowed to.
    pub fn from_stored(value: Decimal) -> Result<Self, MoneyError> {
        if value < Decimal::ZERO {
            return Err(MoneyError::Negative(value));
        }
        Ok(Self(value.normalize()))
    }

    /// Whole-unit price. Always valid: `u32::MAX` is below the ceiling.
    pub fn whole(value: u32) -> Self {
        Self(Decimal::from(value))
    }

    /// Zero price
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the underlying Decimal value.
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Exact `units * price`.
    pub fn line_total(&self, units: u32) -> Decimal {
        self.0 * Decimal::from(units)
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Price {
    type Err = MoneyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s.trim())
            .map_err(|e| MoneyError::ParseError(e.to_string()))?;
        Price::new(decimal)
    }
}

impl TryFrom<Decimal> for Price {
    type Error = MoneyError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Price::new(value)
    }
}

impl From<Price> for Decimal {
    fn from(price: Price) -> Self {
        price.0
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        rust_decimal::serde::float::serialize(&self.0, serializer)
    }
}

/// Lenient decoding for prices in persisted records.
///
/// Use with `#[serde(deserialize_with = "...")]` on record fields; command
/// input keeps the strict `Deserialize` impl.
pub mod stored {
    use rust_decimal::Decimal;
    use serde::{de::Error, Deserialize, Deserializer};

    use super::Price;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Price, D::Error> {
        let value = <Decimal as Deserialize>::deserialize(deserializer)?;
        Price::from_stored(value).map_err(D::Error::custom)
    }

    pub mod option {
        use rust_decimal::Decimal;
        use serde::{de::Error, Deserialize, Deserializer};

        use crate::domain::Price;

        pub fn deserialize<'de, D: Deserializer<'de>>(
            deserializer: D,
        ) -> Result<Option<Price>, D::Error> {
            Option::<Decimal>::deserialize(deserializer)?
                .map(Price::from_stored)
                .transpose()
                .map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_zero_allowed() {
        let price = Price::new(Decimal::ZERO);
        assert!(price.is_ok());
        assert_eq!(price.unwrap(), Price::zero());
    }

    #[test]
    fn test_price_negative_rejected() {
        let price = Price::new(dec!(-1));
        assert!(matches!(price, Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_price_too_many_decimals() {
        let price = Price::new(dec!(19.999));
        assert!(matches!(price, Err(MoneyError::TooManyDecimals(3))));
    }

    #[test]
    fn test_price_trailing_zeros_ok() {
        let price = Price::new(dec!(35.000)).unwrap();
        assert_eq!(price.value(), dec!(35));
    }

    #[test]
    fn test_price_overflow() {
        let price = Price::new(dec!(10000000000.01));
        assert!(matches!(price, Err(MoneyError::Overflow)));
    }

    #[test]
    fn test_price_from_str() {
        let price: Price = " 12.50 ".parse().unwrap();
        assert_eq!(price.value(), dec!(12.5));

        let bad: Result<Price, _> = "twelve".parse();
        assert!(matches!(bad, Err(MoneyError::ParseError(_))));
    }

    #[test]
    fn test_line_total_is_exact() {
        let price = Price::new(dec!(0.10)).unwrap();
        assert_eq!(price.line_total(3), dec!(0.30));
        assert_eq!(Price::whole(35).line_total(5), dec!(175));
    }

    #[test]
    fn test_price_decodes_json_number_and_string() {
        let from_number: Price = serde_json::from_str("35").unwrap();
        let from_string: Price = serde_json::from_str(r#""35.5""#).unwrap();
        assert_eq!(from_number, Price::whole(35));
        assert_eq!(from_string.value(), dec!(35.5));

        let negative: Result<Price, _> = serde_json::from_str("-4");
        assert!(negative.is_err());

        let too_precise: Result<Price, _> = serde_json::from_str("12.999");
        assert!(too_precise.is_err());
    }

    #[test]
    fn test_price_serializes_as_number() {
        let json = serde_json::to_value(Price::new(dec!(18.50)).unwrap()).unwrap();
        assert_eq!(json, serde_json::json!(18.5));
    }

    #[test]
    fn test_from_stored_keeps_precision() {
        let price = Price::from_stored(dec!(12.999)).unwrap();
        assert_eq!(price.value(), dec!(12.999));
        assert_eq!(price.line_total(2), dec!(25.998));

        assert!(Price::from_stored(dec!(20000000000)).is_ok());
        assert!(matches!(Price::from_stored(dec!(-0.01)), Err(MoneyError::Negative(_))));
    }

    #[test]
    fn test_stored_deserializer() {
        #[derive(Deserialize)]
        struct Record {
            #[serde(deserialize_with = "stored::deserialize")]
            price: Price,
            #[serde(default, deserialize_with = "stored::option::deserialize")]
            old_price: Option<Price>,
        }

        let record: Record = serde_json::from_str(r#"{"price": 12.999}"#).unwrap();
        assert_eq!(record.price.value(), dec!(12.999));
        assert!(record.old_price.is_none());

        let record: Record = serde_json::from_str(r#"{"price": "3.5", "old_price": 4.125}"#).unwrap();
        assert_eq!(record.price.value(), dec!(3.5));
        assert_eq!(record.old_price.map(|p| p.value()), Some(dec!(4.125)));

        assert!(serde_json::from_str::<Record>(r#"{"price": -1}"#).is_err());
    }
}
