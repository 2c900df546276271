//! Registration passwords and their stored digests.
//!
//! Stored credentials are Argon2id PHC strings
//! (`$argon2id$v=19$m=…,t=…,p=…$<salt>$<hash>`) with a random salt per cook.

use std::fmt;

use argon2::Argon2;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use rand::rngs::OsRng;
use zeroize::Zeroizing;

use super::validation::FieldViolation;

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

const ALGORITHM: &str = "argon2id";

/// Registration password failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    /// `password1` was blank.
    #[error("This field is required.")]
    Required,
    /// The confirmation did not match.
    #[error("The two password fields didn't match.")]
    Mismatch,
    /// Shorter than [`MIN_PASSWORD_LENGTH`].
    #[error("This password is too short. It must contain at least 8 characters.")]
    TooShort,
    /// Digits only.
    #[error("This password is entirely numeric.")]
    EntirelyNumeric,
}

impl PasswordValidationError {
    /// Form field the failure belongs to.
    #[must_use]
    pub const fn field(self) -> &'static str {
        match self {
            Self::Required => "password1",
            Self::Mismatch | Self::TooShort | Self::EntirelyNumeric => "password2",
        }
    }
}

impl FieldViolation for PasswordValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Mismatch => "password_mismatch",
            Self::TooShort => "password_too_short",
            Self::EntirelyNumeric => "password_entirely_numeric",
        }
    }
}

/// A password accepted for a new account; never logged or serialised.
#[derive(Clone, PartialEq, Eq)]
pub struct NewPassword(Zeroizing<String>);

impl NewPassword {
    /// Check a password and its confirmation.
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::{NewPassword, PasswordValidationError};
    ///
    /// assert!(NewPassword::confirm("pasta-al-dente", "pasta-al-dente").is_ok());
    /// assert_eq!(
    ///     NewPassword::confirm("pasta-al-dente", "risotto").err(),
    ///     Some(PasswordValidationError::Mismatch)
    /// );
    /// ```
    pub fn confirm(password1: &str, password2: &str) -> Result<Self, PasswordValidationError> {
        if password1.is_empty() {
            return Err(PasswordValidationError::Required);
        }
        if password1 != password2 {
            return Err(PasswordValidationError::Mismatch);
        }
        if password1.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordValidationError::TooShort);
        }
        if password1.chars().all(|ch| ch.is_ascii_digit()) {
            return Err(PasswordValidationError::EntirelyNumeric);
        }
        Ok(Self(Zeroizing::new(password1.to_owned())))
    }

    /// Hash the password with a fresh salt.
    pub fn digest(&self) -> Result<PasswordDigest, HashingFailed> {
        PasswordDigest::derive(self.0.as_str())
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NewPassword(<redacted>)")
    }
}

/// Argon2id password digest as stored alongside a cook.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

/// Stored digest that is not an Argon2id PHC string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("stored password digest is malformed")]
pub struct MalformedDigest;

/// The hasher rejected its input or parameters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashingFailed(String);

impl PasswordDigest {
    /// Derive a digest for `password` with a random salt.
    pub fn derive(password: &str) -> Result<Self, HashingFailed> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|err| HashingFailed(err.to_string()))?;
        Ok(Self(hash.to_string()))
    }

    /// Wrap a value loaded from storage, checking its shape.
    pub fn from_stored(stored: impl Into<String>) -> Result<Self, MalformedDigest> {
        let stored = stored.into();
        let parsed = PasswordHash::new(&stored).map_err(|_| MalformedDigest)?;
        if parsed.algorithm.as_str() != ALGORITHM || parsed.hash.is_none() {
            return Err(MalformedDigest);
        }
        Ok(Self(stored))
    }

    /// Stored representation.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Whether `password` hashes to this digest.
    #[must_use]
    pub fn verify(&self, password: &str) -> bool {
        PasswordHash::new(&self.0).is_ok_and(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
    }
}

impl fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordDigest(<redacted>)")
    }
}
