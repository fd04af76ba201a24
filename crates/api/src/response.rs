//! Shared response envelope types for API handlers.
//!
//! Paginated list endpoints answer with [`Page`]:
//! `{ "count": n, "next": url|null, "previous": url|null, "results": [...] }`.
//! `next`/`previous` are links relative to the server root that keep every
//! other query parameter of the current request.

use axum::http::Uri;
use marketplace_core::pagination::PageRequest;
use serde::Serialize;

/// Paginated list envelope.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    /// Total number of matching records across all pages.
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T: Serialize> Page<T> {
    /// Wrap one page of `results` out of `count` total matches.
    ///
    /// `uri` must be the original request URI (see
    /// [`axum::extract::OriginalUri`]) so links include the `/api/v1` prefix.
    pub fn new(results: Vec<T>, count: i64, request: PageRequest, uri: &Uri) -> Self {
        let next = request
            .has_next(count)
            .then(|| page_link(uri, request.page + 1));
        let previous = request
            .has_previous()
            .then(|| page_link(uri, request.page - 1));

        Self {
            count,
            next,
            previous,
            results,
        }
    }
}

/// Rebuild `uri` with its `page` parameter replaced by `page`.
fn page_link(uri: &Uri, page: i64) -> String {
    let page_param = format!("page={page}");
    let mut params: Vec<&str> = uri
        .query()
        .unwrap_or_default()
        .split('&')
        .filter(|p| !p.is_empty() && *p != "page" && !p.starts_with("page="))
        .collect();
    params.push(&page_param);
    format!("{}?{}", uri.path(), params.join("&"))
}
