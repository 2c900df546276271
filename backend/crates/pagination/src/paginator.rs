//! Resolve page selectors into concrete offset/limit windows.

use std::num::NonZeroU64;

use crate::page::Page;
use crate::selector::PageSelector;

/// Fixed-size pager.
///
/// The page size is configuration, never client input, so it is fixed at
/// construction time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: NonZeroU64,
}

impl Paginator {
    /// Create a pager producing pages of `page_size` items.
    #[must_use]
    pub const fn new(page_size: NonZeroU64) -> Self {
        Self { page_size }
    }

    /// Number of items per page.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size.get()
    }

    /// Total number of pages for a collection of `total_items`.
    ///
    /// An empty collection has zero pages.
    #[must_use]
    pub const fn page_count(&self, total_items: u64) -> u64 {
        total_items.div_ceil(self.page_size.get())
    }

    /// Resolve `selector` against a collection of `total_items`.
    ///
    /// Page numbers past the end are clamped to the last page; an empty
    /// collection always resolves to page 1 with an empty window.
    #[must_use]
    pub fn window(&self, total_items: u64, selector: PageSelector) -> PageWindow {
        let page_size = self.page_size();
        let total_pages = self.page_count(total_items);
        let last_page = total_pages.max(1);
        let number = match selector {
            PageSelector::Number(requested) => requested.clamp(1, last_page),
            PageSelector::Last => last_page,
        };
        let offset = number.saturating_sub(1).saturating_mul(page_size);
        let limit = page_size.min(total_items.saturating_sub(offset));

        PageWindow {
            number,
            page_size,
            offset,
            limit,
            total_items,
            total_pages,
        }
    }

    /// Slice an already ordered in-memory sequence.
    #[must_use]
    pub fn paginate<T>(&self, items: Vec<T>, selector: PageSelector) -> Page<T> {
        let total_items = u64::try_from(items.len()).unwrap_or(u64::MAX);
        let window = self.window(total_items, selector);
        let selected = items
            .into_iter()
            .skip(window.offset_usize())
            .take(window.limit_usize())
            .collect();
        window.into_page(selected)
    }
}

/// A resolved page: where it starts, how many rows it holds, and the
/// collection-wide totals it was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    number: u64,
    page_size: u64,
    offset: u64,
    limit: u64,
    total_items: u64,
    total_pages: u64,
}

impl PageWindow {
    /// 1-based page number after clamping.
    #[must_use]
    pub const fn number(&self) -> u64 {
        self.number
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of items preceding this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.offset
    }

    /// Number of items on this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Size of the whole collection.
    #[must_use]
    pub const fn total_items(&self) -> u64 {
        self.total_items
    }

    /// Total number of pages.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Offset as a `usize`, saturating on narrow targets.
    #[must_use]
    pub fn offset_usize(&self) -> usize {
        usize::try_from(self.offset).unwrap_or(usize::MAX)
    }

    /// Limit as a `usize`, saturating on narrow targets.
    #[must_use]
    pub fn limit_usize(&self) -> usize {
        usize::try_from(self.limit).unwrap_or(usize::MAX)
    }

    /// Attach the items fetched for this window.
    #[must_use]
    pub fn into_page<T>(self, items: Vec<T>) -> Page<T> {
        Page::new(items, self)
    }
}
