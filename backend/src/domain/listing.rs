//! Paged listing requests.

use std::num::NonZeroU64;

use pagination::{PageSelector, Paginator};

use super::SearchFilter;

/// Records per listing page.
pub const LIST_PAGE_SIZE: NonZeroU64 = match NonZeroU64::new(5) {
    Some(size) => size,
    None => panic!("page size must be non-zero"),
};

/// The pager every kitchen listing uses.
#[must_use]
pub const fn listing_paginator() -> Paginator {
    Paginator::new(LIST_PAGE_SIZE)
}

/// A search term plus a page selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingQuery {
    /// Substring filter on the kind's search field.
    pub filter: SearchFilter,
    /// Requested page.
    pub page: PageSelector,
}

impl ListingQuery {
    /// Build a query from its parts.
    #[must_use]
    pub fn new(filter: SearchFilter, page: PageSelector) -> Self {
        Self { filter, page }
    }
}
