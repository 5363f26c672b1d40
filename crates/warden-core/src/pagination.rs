//! Page/size normalization for list endpoints.

use serde::Serialize;

/// Page used when the client does not send one.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the client does not send one, or sends a non-positive one.
pub const DEFAULT_SIZE: u64 = 10;
/// Upper bound on the page size.
pub const MAX_SIZE: u64 = 100;

/// A normalized page request: `page >= 1` and `1 <= size <= MAX_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
}

impl PageRequest {
    /// Normalize raw query values.
    ///
    /// Missing values take the defaults. A page below 1 becomes the first
    /// page, a size below 1 becomes [`DEFAULT_SIZE`] and a size above
    /// [`MAX_SIZE`] is clamped to it.
    pub fn normalize(page: Option<i64>, size: Option<i64>) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as u64,
            _ => DEFAULT_PAGE,
        };
        let size = match size {
            Some(s) if s >= 1 => (s as u64).min(MAX_SIZE),
            _ => DEFAULT_SIZE,
        };
        Self { page, size }
    }

    /// Number of rows to skip, capped so it still fits a signed SQL bigint.
    pub fn offset(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.size)
            .min(i64::MAX as u64)
    }

    /// Maximum number of rows to return.
    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

/// One page of results plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}
