//! Years of kitchen experience.

use serde::Serialize;
use utoipa::ToSchema;

use super::validation::FieldViolation;

/// Highest accepted number of years.
pub const MAX_YEARS_OF_EXPERIENCE: i64 = 50;

/// Out-of-range experience values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExperienceValidationError {
    /// Value below zero.
    #[error("Years of experience cannot be negative")]
    Negative,
    /// Value above [`MAX_YEARS_OF_EXPERIENCE`].
    #[error("Years of experience cannot exceed 50")]
    TooMany,
}

impl FieldViolation for ExperienceValidationError {
    fn code(&self) -> &'static str {
        match self {
            Self::Negative => "min_value",
            Self::TooMany => "max_value",
        }
    }
}

/// Check a candidate value, returning it unchanged when `0 <= value <= 50`.
///
/// # Examples
/// ```
/// use kitchen::domain::{ExperienceValidationError, validate_years_of_experience};
///
/// assert_eq!(validate_years_of_experience(10), Ok(10));
/// assert_eq!(
///     validate_years_of_experience(55),
///     Err(ExperienceValidationError::TooMany)
/// );
/// ```
pub const fn validate_years_of_experience(value: i64) -> Result<i64, ExperienceValidationError> {
    if value < 0 {
        Err(ExperienceValidationError::Negative)
    } else if value > MAX_YEARS_OF_EXPERIENCE {
        Err(ExperienceValidationError::TooMany)
    } else {
        Ok(value)
    }
}

/// Validated years of experience, always within `0..=50`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, ToSchema)]
#[serde(transparent)]
pub struct YearsOfExperience(u8);

impl YearsOfExperience {
    /// Accepted value as stored.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for YearsOfExperience {
    type Error = ExperienceValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        let accepted = validate_years_of_experience(value)?;
        // 0..=50 always fits.
        Ok(Self(u8::try_from(accepted).unwrap_or(u8::MAX)))
    }
}

impl From<YearsOfExperience> for i32 {
    fn from(value: YearsOfExperience) -> Self {
        i32::from(value.0)
    }
}

#[cfg(test)]
mod tests {
    //! Range boundaries for experience values.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(10)]
    #[case(49)]
    #[case(50)]
    fn in_range_values_pass_unchanged(#[case] value: i64) {
        assert_eq!(validate_years_of_experience(value), Ok(value));
        let years = YearsOfExperience::try_from(value).expect("in range");
        assert_eq!(i64::from(years.get()), value);
    }

    #[rstest]
    #[case(-1)]
    #[case(-5)]
    #[case(i64::MIN)]
    fn negative_values_are_rejected(#[case] value: i64) {
        let err = validate_years_of_experience(value).expect_err("negative");
        assert_eq!(err, ExperienceValidationError::Negative);
        assert!(err.to_string().contains("cannot be negative"));
    }

    #[rstest]
    #[case(51)]
    #[case(55)]
    #[case(i64::MAX)]
    fn values_over_fifty_are_rejected(#[case] value: i64) {
        let err = validate_years_of_experience(value).expect_err("too many");
        assert_eq!(err, ExperienceValidationError::TooMany);
        assert!(err.to_string().contains("cannot exceed 50"));
    }

    #[rstest]
    fn violations_carry_codes() {
        assert_eq!(ExperienceValidationError::Negative.code(), "min_value");
        assert_eq!(ExperienceValidationError::TooMany.code(), "max_value");
    }
}
