//! Page window primitives shared by the dashboard table view.
//!
//! A [`PageRequest`] names a zero-based page index and a non-zero page size.
//! Applying it to a slice yields a [`Page`], which carries one window of
//! items alongside the totals needed to render pager controls.
//!
//! # Example
//!
//! ```
//! use pagination::PageRequest;
//!
//! let rows: Vec<u32> = (1..=25).collect();
//! let request = PageRequest::new(2, 10).expect("valid request");
//! let page = request.apply(&rows);
//!
//! assert_eq!(page.items(), &[21, 22, 23, 24, 25]);
//! assert_eq!(page.total_pages(), 3);
//! assert!(!page.has_next());
//! ```

use serde::Serialize;
use thiserror::Error;

/// Default number of rows shown per page.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Largest page size accepted by [`PageRequest::new`].
pub const MAX_PAGE_SIZE: usize = 100;

/// Errors raised when constructing a [`PageRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PageRequestError {
    /// Page size was zero.
    #[error("page size must be greater than zero")]
    ZeroPageSize,
    /// Page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max}")]
    PageSizeTooLarge {
        /// Maximum accepted page size.
        max: usize,
    },
}

/// Zero-based page index paired with a validated page size.
///
/// ## Invariants
/// - `size` is in `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    index: usize,
    size: usize,
}

impl PageRequest {
    /// Validate and construct a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError`] when `size` is zero or larger than
    /// [`MAX_PAGE_SIZE`].
    pub const fn new(index: usize, size: usize) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::PageSizeTooLarge { max: MAX_PAGE_SIZE });
        }
        Ok(Self { index, size })
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Number of items per page.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Same page size, different index.
    #[must_use]
    pub const fn with_index(self, index: usize) -> Self {
        Self {
            index,
            size: self.size,
        }
    }

    /// Offset of the first item on this page.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.index.saturating_mul(self.size)
    }

    /// Number of pages needed to show `total_items`.
    #[must_use]
    pub const fn page_count(&self, total_items: usize) -> usize {
        total_items.div_ceil(self.size)
    }

    /// Pull the index back onto the last page when it points past the end.
    #[must_use]
    pub const fn clamp_to(self, total_items: usize) -> Self {
        let last = self.page_count(total_items).saturating_sub(1);
        if self.index > last {
            self.with_index(last)
        } else {
            self
        }
    }

    /// Cut the requested window out of `items`.
    ///
    /// An index past the end yields an empty page with the real totals.
    #[must_use]
    pub fn apply<T: Clone>(&self, items: &[T]) -> Page<T> {
        let window = items
            .iter()
            .skip(self.offset())
            .take(self.size)
            .cloned()
            .collect();
        Page {
            items: window,
            index: self.index,
            size: self.size,
            total_items: items.len(),
            total_pages: self.page_count(items.len()),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            index: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One window of items plus pager totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    items: Vec<T>,
    index: usize,
    size: usize,
    total_items: usize,
    total_pages: usize,
}

impl<T> Page<T> {
    /// Items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consume the page, keeping only its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Zero-based page index.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Number of items across every page.
    #[must_use]
    pub const fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages across every item.
    #[must_use]
    pub const fn total_pages(&self) -> usize {
        self.total_pages
    }

    /// Whether a later page exists.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.index.saturating_add(1) < self.total_pages
    }

    /// Whether an earlier page exists.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Transform the items while keeping pager totals.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            index: self.index,
            size: self.size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}
