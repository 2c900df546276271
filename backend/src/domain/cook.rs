//! Cooks: the kitchen staff accounts.
//!
//! A cook is both a login identity and a record that can be assigned to
//! dishes. Read models here carry no credentials; the password digest only
//! travels through [`CookCredentials`] and [`NewCookRecord`].

use std::fmt;

use serde::Serialize;
use utoipa::ToSchema;

use super::{
    CookId, Dish, Email, HashingFailed, NewPassword, PasswordDigest, PersonalName, Username,
    YearsOfExperience,
};

/// A cook as listed and displayed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Cook {
    /// Store identifier.
    pub id: CookId,
    /// Unique login name.
    pub username: Username,
    /// Given name, possibly blank.
    pub first_name: PersonalName,
    /// Family name, possibly blank.
    pub last_name: PersonalName,
    /// Contact address, if any.
    pub email: Option<Email>,
    /// Years spent cooking, `0..=50`.
    pub years_of_experience: YearsOfExperience,
}

impl fmt::Display for Cook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {})",
            self.username, self.first_name, self.last_name
        )
    }
}

/// Editable cook fields, validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookProfile {
    /// Unique login name.
    pub username: Username,
    /// Given name.
    pub first_name: PersonalName,
    /// Family name.
    pub last_name: PersonalName,
    /// Contact address.
    pub email: Option<Email>,
    /// Validated experience.
    pub years_of_experience: YearsOfExperience,
}

/// Registration command: a profile plus an initial password.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCook {
    /// Initial profile; registration never sets an email.
    pub profile: CookProfile,
    /// Confirmed password.
    pub password: NewPassword,
}

impl NewCook {
    /// Hash the password, producing the record handed to storage.
    pub fn into_record(self) -> Result<NewCookRecord, HashingFailed> {
        Ok(NewCookRecord {
            password_digest: self.password.digest()?,
            profile: self.profile,
        })
    }
}

/// Row-shaped registration data with the password already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCookRecord {
    /// Profile fields.
    pub profile: CookProfile,
    /// Salted digest.
    pub password_digest: PasswordDigest,
}

/// Stored credentials looked up by username during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CookCredentials {
    /// Owner of the credentials.
    pub id: CookId,
    /// Salted digest.
    pub password_digest: PasswordDigest,
}

/// A cook together with the dishes they are assigned to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CookDetail {
    /// The cook.
    #[serde(flatten)]
    pub cook: Cook,
    /// Assigned dishes ordered by name.
    pub dishes: Vec<Dish>,
}
