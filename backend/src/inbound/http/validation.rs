//! Request-shape helpers shared by the kitchen form handlers.
//!
//! Bodies are lenient at the serde level (missing keys default) so that a
//! missing field surfaces as a field-level `required` error rather than a
//! generic JSON failure.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::validation::{ForField, field_error};
use crate::domain::{Error, Price, PriceValidationError, RecordName};

const REQUIRED_MESSAGE: &str = "This field is required.";

/// Newtype for form field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    pub(crate) const fn as_str(self) -> &'static str {
        self.0
    }
}

pub(crate) const NAME: FieldName = FieldName::new("name");
pub(crate) const PRICE: FieldName = FieldName::new("price");
pub(crate) const DISH_TYPE: FieldName = FieldName::new("dish_type");

/// `required` error for a field that was absent.
pub(crate) fn missing_field_error(field: FieldName) -> Error {
    field_error(field.as_str(), "required", REQUIRED_MESSAGE)
}

/// Unwrap an optional field or reject it as `required`.
pub(crate) fn require<T>(value: Option<T>, field: FieldName) -> Result<T, Error> {
    value.ok_or_else(|| missing_field_error(field))
}

/// Validate a record name held in `field`.
pub(crate) fn record_name(raw: &str, field: FieldName) -> Result<RecordName, Error> {
    RecordName::new(raw).for_field(field.as_str())
}

/// Body of the dish type and ingredient forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(default)]
pub struct NameForm {
    /// Record name.
    pub name: String,
}

impl NameForm {
    /// Current values of a record being edited.
    pub(crate) fn filled(name: &RecordName) -> Self {
        Self {
            name: name.as_str().to_owned(),
        }
    }

    /// Validated name.
    pub(crate) fn record_name(&self) -> Result<RecordName, Error> {
        record_name(&self.name, NAME)
    }
}

/// A price as submitted: `"12.50"` or `12.5`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum PriceInput {
    /// Decimal text, as an HTML form would submit it.
    Text(String),
    /// A bare JSON number.
    Number(serde_json::Number),
}

impl PriceInput {
    /// Parse into a [`Price`], reporting failures on the `price` field.
    pub(crate) fn parse(&self) -> Result<Price, Error> {
        let parsed = match self {
            Self::Text(raw) => Price::from_str(raw),
            Self::Number(number) => Price::from_str(&number.to_string()),
        };
        parsed.for_field(PRICE.as_str())
    }
}

impl From<Price> for PriceInput {
    fn from(price: Price) -> Self {
        Self::Text(price.to_string())
    }
}

/// Parse an optional price, treating absence as `required`.
pub(crate) fn price(input: Option<&PriceInput>) -> Result<Price, Error> {
    match input {
        Some(input) => input.parse(),
        None => Err(PriceValidationError::Required).for_field(PRICE.as_str()),
    }
}

/// Collapse submitted ids into a set, ignoring duplicates.
pub(crate) fn id_set<T>(ids: impl IntoIterator<Item = i64>) -> BTreeSet<T>
where
    T: Ord + From<i64>,
{
    ids.into_iter().map(T::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DishId, ErrorCode};
    use rstest::rstest;
    use serde_json::json;

    fn field_of(error: &Error) -> Option<&str> {
        error.details()?.get("field")?.as_str()
    }

    #[rstest]
    #[case(json!("12.50"), 1250)]
    #[case(json!(12.5), 1250)]
    #[case(json!(7), 700)]
    fn prices_accept_strings_and_numbers(#[case] raw: serde_json::Value, #[case] cents: i64) {
        let input: PriceInput = serde_json::from_value(raw).expect("price input");
        assert_eq!(input.parse().expect("valid price").cents(), cents);
    }

    #[rstest]
    fn invalid_prices_point_at_price_field() {
        let input: PriceInput = serde_json::from_value(json!("-1")).expect("price input");
        let error = input.parse().expect_err("negative price");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(field_of(&error), Some("price"));
    }

    #[rstest]
    fn absent_price_is_required() {
        let error = price(None).expect_err("missing price");
        assert_eq!(field_of(&error), Some("price"));
    }

    #[rstest]
    fn missing_fields_are_required() {
        let error = require::<i64>(None, DISH_TYPE).expect_err("missing dish type");
        assert_eq!(error.message(), REQUIRED_MESSAGE);
        assert_eq!(field_of(&error), Some("dish_type"));
    }

    #[rstest]
    fn blank_names_are_rejected_on_their_field() {
        let error = record_name("   ", NAME).expect_err("blank name");
        assert_eq!(field_of(&error), Some("name"));
    }

    #[rstest]
    fn id_sets_drop_duplicates() {
        let ids: BTreeSet<DishId> = id_set([3, 1, 3]);
        assert_eq!(ids.len(), 2);
    }
}
