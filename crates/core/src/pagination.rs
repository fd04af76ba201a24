//! Page-number pagination shared by every list endpoint.

use crate::error::CoreError;

/// Default number of results per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Maximum number of results per page a caller may request.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Build a page request from optional query values.
    ///
    /// A non-positive page size falls back to the default; an oversized one is
    /// capped at [`MAX_PAGE_SIZE`]. Page numbers start at 1.
    pub fn from_params(page: Option<i64>, page_size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        if page < 1 {
            return Err(CoreError::Validation(format!(
                "Invalid page {page}. Pages start at 1"
            )));
        }

        let page_size = match page_size {
            Some(size) if size > 0 => size.min(MAX_PAGE_SIZE),
            _ => DEFAULT_PAGE_SIZE,
        };

        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Whether more results exist after this page given the total `count`.
    pub fn has_next(&self, count: i64) -> bool {
        self.page.saturating_mul(self.page_size) < count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Slice an already-ranked, in-memory result list down to this page.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX).min(items.len());
        let end = start
            .saturating_add(usize::try_from(self.limit()).unwrap_or(0))
            .min(items.len());
        &items[start..end]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_first_page_of_ten() {
        let p = PageRequest::from_params(None, None).unwrap();
        assert_eq!(p, PageRequest::default());
        assert_eq!(p.offset(), 0);
        assert_eq!(p.limit(), 10);
    }

    #[test]
    fn page_size_capped_at_hundred() {
        let p = PageRequest::from_params(Some(1), Some(500)).unwrap();
        assert_eq!(p.page_size, MAX_PAGE_SIZE);
    }

    #[test]
    fn non_positive_page_size_uses_default() {
        let p = PageRequest::from_params(None, Some(0)).unwrap();
        assert_eq!(p.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn page_zero_rejected() {
        assert!(PageRequest::from_params(Some(0), None).is_err());
    }

    #[test]
    fn next_and_previous_flags() {
        let p = PageRequest::from_params(Some(2), Some(10)).unwrap();
        assert_eq!(p.offset(), 10);
        assert!(p.has_previous());
        assert!(p.has_next(21));
        assert!(!p.has_next(20));
    }

    #[test]
    fn slice_clamps_to_bounds() {
        let items: Vec<i32> = (0..25).collect();
        let p = PageRequest::from_params(Some(3), Some(10)).unwrap();
        assert_eq!(p.slice(&items), &[20, 21, 22, 23, 24]);

        let p = PageRequest::from_params(Some(4), Some(10)).unwrap();
        assert!(p.slice(&items).is_empty());
    }
}
