//! Textual value objects shared by the kitchen records.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

use super::validation::FieldViolation;

/// Maximum length of dish, dish type and ingredient names.
pub const MAX_NAME_LENGTH: usize = 255;
/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 150;
/// Maximum length of first and last names.
pub const MAX_PERSONAL_NAME_LENGTH: usize = 150;
/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Failures raised by the textual value objects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextValidationError {
    /// Blank once trimmed.
    #[error("This field is required.")]
    Required,
    /// Longer than the column allows.
    #[error("Ensure this value has at most {max} characters (it has {actual}).")]
    TooLong {
        /// Permitted length.
        max: usize,
        /// Supplied length.
        actual: usize,
    },
    /// Username outside the permitted character set.
    #[error(
        "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
    )]
    InvalidUsername,
    /// Email not shaped like `local@domain`.
    #[error("Enter a valid email address.")]
    InvalidEmail,
}

impl FieldViolation for TextValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooLong { .. } => "max_length",
            Self::InvalidUsername | Self::InvalidEmail => "invalid",
        }
    }
}

fn bounded(raw: &str, max: usize) -> Result<&str, TextValidationError> {
    let trimmed = raw.trim();
    let actual = trimmed.chars().count();
    if actual > max {
        return Err(TextValidationError::TooLong { max, actual });
    }
    Ok(trimmed)
}

fn required(raw: &str, max: usize) -> Result<&str, TextValidationError> {
    let value = bounded(raw, max)?;
    if value.is_empty() {
        return Err(TextValidationError::Required);
    }
    Ok(value)
}

/// Name of a dish, dish type or ingredient.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`MAX_NAME_LENGTH`] characters.
///
/// # Examples
/// ```
/// use kitchen::domain::RecordName;
///
/// let name = RecordName::new("  Soup ").expect("valid name");
/// assert_eq!(name.as_str(), "Soup");
/// assert!(RecordName::new("   ").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RecordName(String);

impl RecordName {
    /// Validate and normalise a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TextValidationError> {
        required(raw.as_ref(), MAX_NAME_LENGTH).map(|value| Self(value.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for RecordName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for RecordName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static USERNAME_RE: OnceLock<Regex> = OnceLock::new();

fn username_regex() -> &'static Regex {
    USERNAME_RE.get_or_init(|| {
        Regex::new(r"^[\w.@+-]+$")
            .unwrap_or_else(|error| panic!("username regex failed to compile: {error}"))
    })
}

/// Cook login name.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`MAX_USERNAME_LENGTH`] characters.
/// - Only letters, digits and `@ . + - _`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Username(String);

impl Username {
    /// Validate a raw username.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TextValidationError> {
        let value = required(raw.as_ref(), MAX_USERNAME_LENGTH)?;
        if !username_regex().is_match(value) {
            return Err(TextValidationError::InvalidUsername);
        }
        Ok(Self(value.to_owned()))
    }

    /// Borrow the username.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// First or last name of a cook; may be blank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct PersonalName(String);

impl PersonalName {
    /// Trim and length-check a raw name.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, TextValidationError> {
        bounded(raw.as_ref(), MAX_PERSONAL_NAME_LENGTH).map(|value| Self(value.to_owned()))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PersonalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    /// Parse an optional email: blank input means "no email".
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::Email;
    ///
    /// assert_eq!(Email::parse_optional("  ").expect("blank allowed"), None);
    /// assert!(Email::parse_optional("chef@kitchen.test").expect("valid").is_some());
    /// assert!(Email::parse_optional("chef").is_err());
    /// ```
    pub fn parse_optional(raw: impl AsRef<str>) -> Result<Option<Self>, TextValidationError> {
        let value = bounded(raw.as_ref(), MAX_EMAIL_LENGTH)?;
        if value.is_empty() {
            return Ok(None);
        }
        if !email_regex().is_match(value) {
            return Err(TextValidationError::InvalidEmail);
        }
        Ok(Some(Self(value.to_owned())))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
