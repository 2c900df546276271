//! Menu prices.
//!
//! Prices are held as whole cents so arithmetic and storage stay exact. The
//! decimal representation (`"12.50"`) is what clients send and receive.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use utoipa::ToSchema;

use super::validation::FieldViolation;

/// Digits allowed in total, fractional part included.
pub const MAX_PRICE_DIGITS: usize = 10;
/// Fractional digits allowed.
pub const PRICE_DECIMAL_PLACES: usize = 2;

/// Rejected price inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PriceValidationError {
    /// Blank input.
    #[error("This field is required.")]
    Required,
    /// Not a plain decimal number.
    #[error("Enter a number.")]
    Invalid,
    /// Below zero.
    #[error("Ensure this value is greater than or equal to 0.")]
    Negative,
    /// More than two fractional digits.
    #[error("Ensure that there are no more than 2 decimal places.")]
    TooPrecise,
    /// More than ten digits overall.
    #[error("Ensure that there are no more than 10 digits in total.")]
    TooLarge,
}

impl FieldViolation for PriceValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Invalid => "invalid",
            Self::Negative => "min_value",
            Self::TooPrecise => "max_decimal_places",
            Self::TooLarge => "max_digits",
        }
    }
}

/// Non-negative price with two decimal places.
///
/// # Examples
/// ```
/// use kitchen::domain::Price;
///
/// let price: Price = "12.5".parse().expect("valid price");
/// assert_eq!(price.cents(), 1250);
/// assert_eq!(price.to_string(), "12.50");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, ToSchema)]
#[schema(value_type = String, example = "12.50")]
pub struct Price(i64);

impl Price {
    /// Build a price from stored cents.
    pub fn from_cents(cents: i64) -> Result<Self, PriceValidationError> {
        if cents < 0 {
            return Err(PriceValidationError::Negative);
        }
        Ok(Self(cents))
    }

    /// Whole cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }
}

impl FromStr for Price {
    type Err = PriceValidationError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(PriceValidationError::Required);
        }
        let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
        if let Some(rest) = unsigned.strip_prefix('-') {
            return if is_decimal(rest) {
                Err(PriceValidationError::Negative)
            } else {
                Err(PriceValidationError::Invalid)
            };
        }
        if !is_decimal(unsigned) {
            return Err(PriceValidationError::Invalid);
        }

        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, ""));
        if fraction.len() > PRICE_DECIMAL_PLACES {
            return Err(PriceValidationError::TooPrecise);
        }
        let whole = whole.trim_start_matches('0');
        if whole.len() + PRICE_DECIMAL_PLACES > MAX_PRICE_DIGITS {
            return Err(PriceValidationError::TooLarge);
        }

        let units: i64 = if whole.is_empty() {
            0
        } else {
            whole.parse().map_err(|_| PriceValidationError::TooLarge)?
        };
        let cents: i64 = format!("{fraction:0<2}")
            .parse()
            .map_err(|_| PriceValidationError::Invalid)?;
        units
            .checked_mul(100)
            .and_then(|value| value.checked_add(cents))
            .map(Self)
            .ok_or(PriceValidationError::TooLarge)
    }
}

/// Digits with at most one decimal point and at least one digit.
fn is_decimal(value: &str) -> bool {
    let mut points = 0;
    let mut digits = 0;
    for ch in value.chars() {
        match ch {
            '.' => points += 1,
            '0'..='9' => digits += 1,
            _ => return false,
        }
    }
    points <= 1 && digits > 0
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

impl Serialize for Price {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    //! Parsing and formatting of decimal prices.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0", 0)]
    #[case("12", 1200)]
    #[case("12.5", 1250)]
    #[case(" 12.05 ", 1205)]
    #[case(".99", 99)]
    #[case("7.", 700)]
    #[case("+3.10", 310)]
    #[case("99999999.99", 9_999_999_999)]
    fn parses_valid_prices(#[case] raw: &str, #[case] cents: i64) {
        assert_eq!(raw.parse::<Price>().map(Price::cents), Ok(cents));
    }

    #[rstest]
    #[case("", PriceValidationError::Required)]
    #[case("abc", PriceValidationError::Invalid)]
    #[case("1.2.3", PriceValidationError::Invalid)]
    #[case(".", PriceValidationError::Invalid)]
    #[case("1e3", PriceValidationError::Invalid)]
    #[case("-1", PriceValidationError::Negative)]
    #[case("1.999", PriceValidationError::TooPrecise)]
    #[case("100000000", PriceValidationError::TooLarge)]
    fn rejects_invalid_prices(#[case] raw: &str, #[case] expected: PriceValidationError) {
        assert_eq!(raw.parse::<Price>(), Err(expected));
    }

    #[rstest]
    #[case(0, "0.00")]
    #[case(5, "0.05")]
    #[case(1250, "12.50")]
    fn formats_with_two_places(#[case] cents: i64, #[case] expected: &str) {
        let price = Price::from_cents(cents).expect("non-negative");
        assert_eq!(price.to_string(), expected);
        assert_eq!(
            serde_json::to_value(price).expect("serialise"),
            serde_json::json!(expected)
        );
    }

    #[rstest]
    fn negative_cents_are_rejected() {
        assert_eq!(Price::from_cents(-1), Err(PriceValidationError::Negative));
    }
}
