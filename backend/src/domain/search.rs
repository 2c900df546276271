//! Listing search: which field each entity kind is filtered on, how a raw
//! query parameter becomes a case-insensitive substring filter, and the order
//! listings are returned in.

use std::cmp::Ordering;

/// The four listable record kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Kitchen staff, searched and ordered by username.
    Cook,
    /// Dishes, searched and ordered by name.
    Dish,
    /// Dish types, searched and ordered by name.
    DishType,
    /// Ingredients, searched and ordered by name.
    Ingredient,
}

impl EntityKind {
    /// Query parameter (and record field) the listing filters on.
    #[must_use]
    pub const fn search_field(self) -> &'static str {
        match self {
            Self::Cook => "username",
            Self::Dish | Self::DishType | Self::Ingredient => "name",
        }
    }

    /// Placeholder shown in the search form.
    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::Cook => "Search by username",
            Self::Dish => "Search by dish name",
            Self::DishType => "Search by dish type",
            Self::Ingredient => "Search by ingredient",
        }
    }

    /// Capitalised label starting a sentence.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Cook => "Cook",
            Self::Dish => "Dish",
            Self::DishType => "Dish type",
            Self::Ingredient => "Ingredient",
        }
    }

    /// Human readable singular label used in messages and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Cook => "cook",
            Self::Dish => "dish",
            Self::DishType => "dish type",
            Self::Ingredient => "ingredient",
        }
    }
}

/// Order of listed names: ASCII case-folded bytes first, then exact bytes.
///
/// Matches PostgreSQL `ORDER BY lower(name), name` on a `"C"` collated column,
/// so both stores page identically. Callers break remaining ties by id.
///
/// # Examples
/// ```
/// use kitchen::domain::listing_order;
///
/// let mut names = vec!["cherry", "Banana", "apple", "banana"];
/// names.sort_by(|a, b| listing_order(a, b));
/// assert_eq!(names, ["apple", "Banana", "banana", "cherry"]);
/// ```
#[must_use]
pub fn listing_order(left: &str, right: &str) -> Ordering {
    fn folded(text: &str) -> impl Iterator<Item = u8> + '_ {
        text.bytes().map(|byte| byte.to_ascii_lowercase())
    }
    folded(left)
        .cmp(folded(right))
        .then_with(|| left.cmp(right))
}

/// Optional case-insensitive substring filter.
///
/// An absent or empty parameter means "no filter". Anything else, whitespace
/// included and whatever its length, is matched verbatim.
///
/// # Examples
/// ```
/// use kitchen::domain::SearchFilter;
///
/// let filter = SearchFilter::from_param(Some("TOM"));
/// assert!(filter.matches("tomato"));
/// assert!(!filter.matches("potato"));
/// assert!(SearchFilter::from_param(Some("")).is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SearchFilter {
    term: Option<String>,
    folded: Option<String>,
}

impl SearchFilter {
    /// Filter that matches everything.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Build a filter from a raw query parameter.
    #[must_use]
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw.filter(|term| !term.is_empty()) {
            None => Self::none(),
            Some(term) => Self {
                term: Some(term.to_owned()),
                folded: Some(term.to_lowercase()),
            },
        }
    }

    /// Whether no filtering applies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.term.is_none()
    }

    /// The term as supplied, for echoing back in the search form.
    #[must_use]
    pub fn term(&self) -> Option<&str> {
        self.term.as_deref()
    }

    /// Case-insensitive substring test.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match &self.folded {
            None => true,
            Some(needle) => candidate.to_lowercase().contains(needle.as_str()),
        }
    }

    /// SQL `ILIKE` pattern with `\`, `%` and `_` escaped, or `None` when
    /// unfiltered.
    ///
    /// # Examples
    /// ```
    /// use kitchen::domain::SearchFilter;
    ///
    /// let filter = SearchFilter::from_param(Some("50%_off"));
    /// assert_eq!(filter.ilike_pattern().as_deref(), Some(r"%50\%\_off%"));
    /// ```
    #[must_use]
    pub fn ilike_pattern(&self) -> Option<String> {
        let term = self.term.as_deref()?;
        let mut pattern = String::with_capacity(term.len() + 2);
        pattern.push('%');
        for ch in term.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                pattern.push('\\');
            }
            pattern.push(ch);
        }
        pattern.push('%');
        Some(pattern)
    }
}
