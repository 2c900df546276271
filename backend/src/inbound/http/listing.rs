//! Query string handling shared by the four listing routes.
//!
//! `?<search field>=<term>&page=<n|last>`; the response echoes the search
//! form next to the page envelope.

use std::collections::BTreeMap;

use pagination::{Page, PageSelector};
use serde::Serialize;

use crate::domain::{EntityKind, ListingQuery, SearchFilter};

const PAGE_PARAM: &str = "page";

/// Raw listing query parameters.
pub type ListingParams = BTreeMap<String, String>;

/// Search form echo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct SearchForm {
    /// Query parameter holding the term.
    pub field: &'static str,
    /// Submitted term, empty when none.
    pub value: String,
    /// Input placeholder.
    pub placeholder: &'static str,
}

/// A listing page with its search form.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    /// Echo of the submitted search.
    pub search_form: SearchForm,
    /// Requested page.
    #[serde(flatten)]
    pub page: Page<T>,
}

/// Parse listing parameters for `kind`. Never fails: unknown pages fall back
/// to the first and any search term is accepted.
pub(crate) fn parse_listing(
    kind: EntityKind,
    params: &ListingParams,
) -> (ListingQuery, SearchForm) {
    let field = kind.search_field();
    let raw = params.get(field).map(String::as_str);
    let filter = SearchFilter::from_param(raw);
    let page = PageSelector::lenient(params.get(PAGE_PARAM).map(String::as_str));
    let form = SearchForm {
        field,
        value: raw.unwrap_or_default().to_owned(),
        placeholder: kind.placeholder(),
    };
    (ListingQuery::new(filter, page), form)
}

impl<T> Listing<T> {
    pub(crate) fn new(search_form: SearchForm, page: Page<T>) -> Self {
        Self { search_form, page }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect()
    }

    #[rstest]
    fn cooks_are_searched_by_username() {
        let (query, form) =
            parse_listing(EntityKind::Cook, &params(&[("username", "ann"), ("name", "x")]));
        assert_eq!(query.filter.term(), Some("ann"));
        assert_eq!(form.field, "username");
        assert_eq!(form.placeholder, "Search by username");
    }

    #[rstest]
    #[case(None, PageSelector::Number(1))]
    #[case(Some("3"), PageSelector::Number(3))]
    #[case(Some("abc"), PageSelector::Number(1))]
    #[case(Some("last"), PageSelector::Last)]
    fn pages_parse_leniently(#[case] raw: Option<&str>, #[case] expected: PageSelector) {
        let pairs: Vec<(&str, &str)> = raw.map(|page| ("page", page)).into_iter().collect();
        let (query, _) = parse_listing(EntityKind::Ingredient, &params(&pairs));
        assert_eq!(query.page, expected);
    }

    #[rstest]
    fn absent_search_echoes_blank_value() {
        let (query, form) = parse_listing(EntityKind::Dish, &params(&[]));
        assert!(query.filter.is_empty());
        assert_eq!(form.value, "");
    }

    #[rstest]
    fn long_search_terms_are_kept_verbatim() {
        let term = "a".repeat(150);
        let (query, form) = parse_listing(EntityKind::DishType, &params(&[("name", &term)]));
        assert_eq!(query.filter.term(), Some(term.as_str()));
        assert_eq!(form.value, term);
    }
}
