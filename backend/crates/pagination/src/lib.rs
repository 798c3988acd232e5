//! Page-number pagination primitives.
//!
//! List endpoints address pages with a 1-based page number and a page size,
//! both usually supplied as raw path text. [`PageRequest`] owns the parsing and
//! defaulting rules for those values and [`PaginationInfo`] carries the page
//! bookkeeping returned to clients.
//!
//! ```
//! use pagination::{PageRequest, PaginationInfo};
//!
//! let request = PageRequest::from_segments(Some("2"), Some("5"))?;
//! assert_eq!(request.offset(), 5);
//!
//! let info = PaginationInfo::for_total(request, 12);
//! assert_eq!(info.total_pages(), 3);
//! assert!(!info.is_out_of_range());
//! # Ok::<(), pagination::PageRequestError>(())
//! ```

use serde::{Deserialize, Serialize};

/// Page number used when none (or a non-numeric one) is supplied.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when none (or a non-numeric one) is supplied.
pub const DEFAULT_LIMIT: u64 = 5;

/// Errors raised when a page number or page size reads as zero or less.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Page numbers are 1-based.
    #[error("page number must be at least 1")]
    NonPositivePage,
    /// A page must hold at least one record.
    #[error("page size must be at least 1")]
    NonPositiveLimit,
}

/// A validated request for one page of records.
///
/// ## Invariants
/// - `page >= 1`
/// - `limit >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a request from already-numeric parts.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when either part is zero.
    pub const fn new(page: u64, limit: u64) -> Result<Self, PageRequestError> {
        if page == 0 {
            return Err(PageRequestError::NonPositivePage);
        }
        if limit == 0 {
            return Err(PageRequestError::NonPositiveLimit);
        }
        Ok(Self { page, limit })
    }

    /// Build a request from raw path segments.
    ///
    /// Each segment is read like a lenient leading-integer parse: leading
    /// whitespace and one sign are accepted and anything after the leading
    /// digits is ignored (`"3abc"` reads as 3). Only a segment that is absent
    /// or has no leading digits falls back to the default for its position.
    /// A number too large for `u64` saturates, so an oversized page lies past
    /// the last page rather than on the first.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when a segment reads as zero or a
    /// negative number.
    ///
    /// ```
    /// use pagination::{PageRequest, PageRequestError};
    ///
    /// let request = PageRequest::from_segments(Some("abc"), None)?;
    /// assert_eq!(request, PageRequest::default());
    ///
    /// let request = PageRequest::from_segments(Some("4"), Some("10rows"))?;
    /// assert_eq!((request.page(), request.limit()), (4, 10));
    ///
    /// assert_eq!(
    ///     PageRequest::from_segments(Some("-1"), None),
    ///     Err(PageRequestError::NonPositivePage)
    /// );
    /// # Ok::<(), PageRequestError>(())
    /// ```
    pub fn from_segments(
        page: Option<&str>,
        limit: Option<&str>,
    ) -> Result<Self, PageRequestError> {
        let page = match page.map(read_leading_integer) {
            None | Some(LeadingInteger::Missing) => DEFAULT_PAGE,
            Some(LeadingInteger::NonPositive) => return Err(PageRequestError::NonPositivePage),
            Some(LeadingInteger::Positive(value)) => value,
        };
        let limit = match limit.map(read_leading_integer) {
            None | Some(LeadingInteger::Missing) => DEFAULT_LIMIT,
            Some(LeadingInteger::NonPositive) => return Err(PageRequestError::NonPositiveLimit),
            Some(LeadingInteger::Positive(value)) => value,
        };
        Ok(Self { page, limit })
    }

    /// 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Maximum number of records on the page.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of records to skip before the first record of this page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(self.limit)
    }
}

/// What a leading-integer read found in one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LeadingInteger {
    /// No digits after the optional sign.
    Missing,
    /// Zero, or a negative number.
    NonPositive,
    /// A positive number, saturated at `u64::MAX`.
    Positive(u64),
}

fn read_leading_integer(raw: &str) -> LeadingInteger {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digit_count = unsigned.bytes().take_while(u8::is_ascii_digit).count();
    let Some(digits) = unsigned.get(..digit_count).filter(|digits| !digits.is_empty()) else {
        return LeadingInteger::Missing;
    };
    if negative || digits.bytes().all(|digit| digit == b'0') {
        return LeadingInteger::NonPositive;
    }
    // Only overflow can fail here: the slice is non-empty ASCII digits.
    LeadingInteger::Positive(digits.parse::<u64>().unwrap_or(u64::MAX))
}

/// Page bookkeeping reported alongside a page of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    current_page: u64,
    total_pages: u64,
}

impl PaginationInfo {
    /// Compute page bookkeeping for `request` over a collection of `total`
    /// records.
    ///
    /// An empty collection has zero pages, so every page number is out of
    /// range for it.
    #[must_use]
    pub const fn for_total(request: PageRequest, total: u64) -> Self {
        Self {
            current_page: request.page,
            total_pages: total.div_ceil(request.limit),
        }
    }

    /// Page number that was requested.
    #[must_use]
    pub const fn current_page(&self) -> u64 {
        self.current_page
    }

    /// Number of pages the collection spans at the requested page size.
    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_pages
    }

    /// Whether the requested page lies past the last page.
    #[must_use]
    pub const fn is_out_of_range(&self) -> bool {
        self.current_page > self.total_pages
    }
}
