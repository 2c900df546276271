//! Field-level validation failures.
//!
//! Value objects report their own error enums; this module turns any of them
//! into the shared [`Error`] shape, `invalid_request` with
//! `{"field": ..., "code": ...}` details, so clients can attach the message
//! to the offending form field.

use std::fmt::Display;

use serde_json::json;

use super::Error;

/// A validation failure that knows its stable machine-readable code.
pub trait FieldViolation: Display {
    /// Short snake_case code, e.g. `required` or `max_value`.
    fn code(&self) -> &'static str;
}

/// Build an `invalid_request` error pinned to `field`.
///
/// # Examples
/// ```
/// use kitchen::domain::{ErrorCode, validation::field_error};
///
/// let err = field_error("name", "required", "This field is required.");
/// assert_eq!(err.code(), ErrorCode::InvalidRequest);
/// assert_eq!(err.details().and_then(|d| d.get("field")), Some(&"name".into()));
/// ```
pub fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code,
    }))
}

/// Convert a value-object failure into a field error.
pub fn reject<V: FieldViolation>(field: &str, violation: V) -> Error {
    field_error(field, violation.code(), violation.to_string())
}

/// Extension used at call sites: `Username::new(raw).for_field("username")?`.
pub trait ForField<T> {
    /// Attach the form field name to a validation failure.
    fn for_field(self, field: &str) -> Result<T, Error>;
}

impl<T, V: FieldViolation> ForField<T> for Result<T, V> {
    fn for_field(self, field: &str) -> Result<T, Error> {
        self.map_err(|violation| reject(field, violation))
    }
}
