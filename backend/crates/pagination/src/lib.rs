//! Page-number pagination primitives.
//!
//! Listing endpoints accept a 1-based `page` query parameter and return a
//! fixed-size slice of an ordered collection together with navigation
//! metadata. This crate keeps that arithmetic in one place so adapters that
//! page in SQL (offset/limit) and adapters that page in memory agree on the
//! exact same window.
//!
//! - [`PageSelector`] is the client's request (`3`, `last`, ...).
//! - [`Paginator`] owns the page size and resolves a selector against a
//!   collection size into a [`PageWindow`].
//! - [`Page`] is the resulting slice plus metadata, serialised as a camelCase
//!   envelope.
//!
//! Out-of-range page numbers are clamped to the last page rather than
//! rejected.
//!
//! # Examples
//! ```
//! use std::num::NonZeroU64;
//!
//! use pagination::{PageSelector, Paginator};
//!
//! let paginator = Paginator::new(NonZeroU64::MIN.saturating_add(4));
//! let page = paginator.paginate((0..12).collect(), PageSelector::Number(3));
//! assert_eq!(page.items(), &[10, 11]);
//! assert_eq!(page.total_pages(), 3);
//! assert!(!page.has_next());
//! ```

mod page;
mod paginator;
mod selector;

pub use page::Page;
pub use paginator::{PageWindow, Paginator};
pub use selector::{LAST_PAGE_KEYWORD, PageSelector, PageSelectorError};
