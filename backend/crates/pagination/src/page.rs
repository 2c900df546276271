//! A single page of results plus navigation metadata.

use serde::{Serialize, Serializer};

use crate::paginator::PageWindow;

/// One page of an ordered collection.
///
/// Serialises as:
///
/// ```json
/// {"items": [], "page": 1, "pageSize": 5, "totalItems": 0, "totalPages": 0,
///  "hasNext": false, "hasPrevious": false, "nextPage": null, "previousPage": null}
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    window: PageWindow,
}

impl<T> Page<T> {
    pub(crate) const fn new(items: Vec<T>, window: PageWindow) -> Self {
        Self { items, window }
    }

    /// Items on this page, in collection order.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// 1-based page number.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.window.number()
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.window.page_size()
    }

    /// Size of the whole (filtered) collection.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.window.total_items()
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.window.total_pages()
    }

    /// Whether a following page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.number() < self.total_pages()
    }

    /// Whether a preceding page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.number() > 1
    }

    /// Number of the following page, if any.
    #[must_use]
    pub const fn next_page(&self) -> Option<u64> {
        if self.has_next() {
            Some(self.number().saturating_add(1))
        } else {
            None
        }
    }

    /// Number of the preceding page, if any.
    #[must_use]
    pub const fn previous_page(&self) -> Option<u64> {
        if self.has_previous() {
            Some(self.number().saturating_sub(1))
        } else {
            None
        }
    }

    /// Transform every item while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            window: self.window,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageEnvelope<'a, T> {
    items: &'a [T],
    page: u64,
    page_size: u64,
    total_items: u64,
    total_pages: u64,
    has_next: bool,
    has_previous: bool,
    next_page: Option<u64>,
    previous_page: Option<u64>,
}

impl<T: Serialize> Serialize for Page<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PageEnvelope {
            items: &self.items,
            page: self.number(),
            page_size: self.page_size(),
            total_items: self.total_items(),
            total_pages: self.total_pages(),
            has_next: self.has_next(),
            has_previous: self.has_previous(),
            next_page: self.next_page(),
            previous_page: self.previous_page(),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    //! Envelope shape and item mapping.
    use std::num::NonZeroU64;

    use super::*;
    use crate::{PageSelector, Paginator};
    use rstest::rstest;
    use serde_json::json;

    fn pager() -> Paginator {
        Paginator::new(NonZeroU64::new(2).expect("non-zero page size"))
    }

    #[rstest]
    fn serialises_camel_case_envelope() {
        let page = pager().paginate(vec!["a", "b", "c"], PageSelector::Number(1));
        let value = serde_json::to_value(&page).expect("serialise page");
        assert_eq!(
            value,
            json!({
                "items": ["a", "b"],
                "page": 1,
                "pageSize": 2,
                "totalItems": 3,
                "totalPages": 2,
                "hasNext": true,
                "hasPrevious": false,
                "nextPage": 2,
                "previousPage": null,
            })
        );
    }

    #[rstest]
    fn map_keeps_metadata() {
        let page = pager()
            .paginate(vec![1, 2, 3], PageSelector::Last)
            .map(|n| n * 10);
        assert_eq!(page.items(), &[30]);
        assert_eq!(page.number(), 2);
        assert_eq!(page.total_items(), 3);
    }
}
