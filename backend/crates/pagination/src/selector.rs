//! Client-supplied page selection.

use std::fmt;
use std::str::FromStr;

/// Keyword accepted in place of a page number to request the final page.
pub const LAST_PAGE_KEYWORD: &str = "last";

/// Page requested by a client.
///
/// # Examples
/// ```
/// use pagination::PageSelector;
///
/// assert_eq!("2".parse::<PageSelector>(), Ok(PageSelector::Number(2)));
/// assert_eq!("last".parse::<PageSelector>(), Ok(PageSelector::Last));
/// assert_eq!(PageSelector::lenient(Some("soup")), PageSelector::Number(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageSelector {
    /// A 1-based page number.
    Number(u64),
    /// The final page, whatever its number turns out to be.
    Last,
}

impl Default for PageSelector {
    fn default() -> Self {
        Self::Number(1)
    }
}

/// Errors raised by strict [`PageSelector`] parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PageSelectorError {
    /// The value is neither an unsigned integer nor `last`.
    #[error("page must be a positive integer or `last`, got `{value}`")]
    Invalid {
        /// Raw value supplied by the client.
        value: String,
    },
    /// Page numbers are 1-based.
    #[error("page numbers start at 1")]
    Zero,
}

impl PageSelector {
    /// Parse an optional raw query value, falling back to the first page when
    /// the value is missing or malformed.
    #[must_use]
    pub fn lenient(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for PageSelector {
    type Err = PageSelectorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.eq_ignore_ascii_case(LAST_PAGE_KEYWORD) {
            return Ok(Self::Last);
        }
        let number: u64 = trimmed.parse().map_err(|_| PageSelectorError::Invalid {
            value: value.to_owned(),
        })?;
        if number == 0 {
            return Err(PageSelectorError::Zero);
        }
        Ok(Self::Number(number))
    }
}

impl fmt::Display for PageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(number) => write!(f, "{number}"),
            Self::Last => f.write_str(LAST_PAGE_KEYWORD),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Parsing coverage for page selectors.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", PageSelector::Number(1))]
    #[case(" 7 ", PageSelector::Number(7))]
    #[case("last", PageSelector::Last)]
    #[case("LAST", PageSelector::Last)]
    fn strict_parse_accepts_numbers_and_keyword(
        #[case] raw: &str,
        #[case] expected: PageSelector,
    ) {
        assert_eq!(raw.parse::<PageSelector>(), Ok(expected));
    }

    #[rstest]
    #[case("0", PageSelectorError::Zero)]
    #[case("-2", PageSelectorError::Invalid { value: "-2".to_owned() })]
    #[case("two", PageSelectorError::Invalid { value: "two".to_owned() })]
    fn strict_parse_rejects_garbage(#[case] raw: &str, #[case] expected: PageSelectorError) {
        assert_eq!(raw.parse::<PageSelector>(), Err(expected));
    }

    #[rstest]
    #[case(None, PageSelector::Number(1))]
    #[case(Some(""), PageSelector::Number(1))]
    #[case(Some("0"), PageSelector::Number(1))]
    #[case(Some("abc"), PageSelector::Number(1))]
    #[case(Some("4"), PageSelector::Number(4))]
    #[case(Some("last"), PageSelector::Last)]
    fn lenient_parse_falls_back_to_first_page(
        #[case] raw: Option<&str>,
        #[case] expected: PageSelector,
    ) {
        assert_eq!(PageSelector::lenient(raw), expected);
    }

    #[rstest]
    fn display_matches_query_syntax() {
        assert_eq!(PageSelector::Number(3).to_string(), "3");
        assert_eq!(PageSelector::Last.to_string(), "last");
    }
}
