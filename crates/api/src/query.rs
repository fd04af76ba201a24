//! Shared query parameter types for API handlers.

use marketplace_core::error::CoreError;
use marketplace_core::pagination::PageRequest;
use serde::Deserialize;

/// Page-number pagination parameters (`?page=&page_size=`).
///
/// Extracted as its own `Query<PageParams>` next to any endpoint-specific
/// filter struct.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    /// Validate into a [`PageRequest`], clamping the page size.
    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::from_params(self.page, self.page_size)
    }
}
