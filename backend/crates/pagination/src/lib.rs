//! Page-number pagination primitives shared by backend endpoints.
//!
//! A [`PageRequest`] names a zero-based page and a bounded page size. A
//! [`Page`] is the envelope returned to clients: the slice of content for the
//! requested page plus the totals needed to navigate the full result set.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(1, 2).expect("valid request");
//! let page = Page::new(vec!["c", "d"], 5, request);
//! assert_eq!(page.total_pages(), 3);
//! assert!(!page.is_first());
//! assert!(!page.is_last());
//! ```

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not ask for one.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_PAGE_SIZE: u32 = 1000;

/// Reasons a page request can be rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// The page size was zero.
    #[error("page size must be at least 1")]
    ZeroSize,
    /// The page size exceeded [`MAX_PAGE_SIZE`].
    #[error("page size must not exceed {max}, got {size}")]
    SizeTooLarge {
        /// Requested size.
        size: u32,
        /// Largest accepted size.
        max: u32,
    },
}

/// Zero-based page number and page size.
///
/// ## Invariants
/// - `size` is within `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    number: u32,
    size: u32,
}

impl PageRequest {
    /// Validate and build a page request.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `size` is zero or larger than
    /// [`MAX_PAGE_SIZE`].
    ///
    /// # Examples
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// assert!(PageRequest::new(0, 10).is_ok());
    /// assert_eq!(PageRequest::new(0, 0), Err(PageRequestError::ZeroSize));
    /// ```
    pub const fn new(number: u32, size: u32) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroSize);
        }
        if size > MAX_PAGE_SIZE {
            return Err(PageRequestError::SizeTooLarge {
                size,
                max: MAX_PAGE_SIZE,
            });
        }
        Ok(Self { number, size })
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Maximum number of elements on the page.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of elements preceding this page in the full result set.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        // Both factors fit in u32, so the product cannot overflow u64.
        (self.number as u64) * (self.size as u64)
    }

    /// Number of elements to fetch for this page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            number: 0,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// One page of an ordered result set.
///
/// Serialises with camelCase keys:
/// `content`, `totalElements`, `totalPages`, `size`, `number`,
/// `numberOfElements`, `first`, `last`, and `empty`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    content: Vec<T>,
    total_elements: u64,
    total_pages: u64,
    size: u32,
    number: u32,
    number_of_elements: usize,
    first: bool,
    last: bool,
    empty: bool,
}

impl<T> Page<T> {
    /// Build a page from already-sliced content and the full match count.
    ///
    /// `content` is expected to hold at most `request.size()` elements.
    #[must_use]
    pub fn new(content: Vec<T>, total_elements: u64, request: PageRequest) -> Self {
        let total_pages = total_elements.div_ceil(request.limit());
        let number = request.number();
        Self {
            number_of_elements: content.len(),
            empty: content.is_empty(),
            content,
            total_elements,
            total_pages,
            size: request.size(),
            number,
            first: number == 0,
            last: u64::from(number) + 1 >= total_pages,
        }
    }

    /// An empty page with no matching elements at all.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let page: Page<u8> = Page::empty(PageRequest::default());
    /// assert_eq!(page.total_elements(), 0);
    /// assert!(page.is_first() && page.is_last());
    /// ```
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Slice the requested page out of a fully materialised, ordered result.
    ///
    /// # Examples
    /// ```
    /// use pagination::{Page, PageRequest};
    ///
    /// let request = PageRequest::new(1, 2).expect("valid request");
    /// let page = Page::from_ordered(vec![1, 2, 3], request);
    /// assert_eq!(page.content(), &[3]);
    /// assert_eq!(page.total_elements(), 3);
    /// ```
    #[must_use]
    pub fn from_ordered(items: Vec<T>, request: PageRequest) -> Self {
        let total = items.len() as u64;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.limit()).unwrap_or(usize::MAX);
        let content = items.into_iter().skip(skip).take(take).collect();
        Self::new(content, total, request)
    }

    /// Convert each element while keeping the page metadata.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            size: self.size,
            number: self.number,
            number_of_elements: self.number_of_elements,
            first: self.first,
            last: self.last,
            empty: self.empty,
        }
    }

    /// Elements on this page, in order.
    #[must_use]
    pub fn content(&self) -> &[T] {
        &self.content
    }

    /// Consume the page and return its elements.
    #[must_use]
    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    /// Count of elements across every page.
    #[must_use]
    pub const fn total_elements(&self) -> u64 {
        self.total_elements
    }

    /// Count of pages needed to hold every element.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Zero-based page number.
    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    /// Whether this is the first page.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.first
    }

    /// Whether no later page holds elements.
    #[must_use]
    pub const fn is_last(&self) -> bool {
        self.last
    }

    /// Whether this page holds no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.empty
    }
}
