//! Offset pagination primitives shared by list endpoints.
//!
//! A [`PageRequest`] validates and clamps the caller-supplied `page` and
//! `limit` values, and a [`Page`] wraps one slice of results together with
//! the counters and navigation links clients need to walk the collection.
//!
//! ```
//! use pagination::{Page, PageRequest};
//!
//! let request = PageRequest::new(Some(2), Some(500)).expect("valid request");
//! assert_eq!(request.limit(), pagination::MAX_LIMIT);
//!
//! let page = Page::new(vec!["a", "b"], 102, request, "/api/users");
//! assert_eq!(page.meta.total_pages, 2);
//! assert!(page.links.next.is_none());
//! ```

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

/// Page number used when the caller omits one.
pub const DEFAULT_PAGE: u64 = 1;
/// Page size used when the caller omits one.
pub const DEFAULT_LIMIT: u64 = 10;
/// Upper bound applied to every requested page size.
pub const MAX_LIMIT: u64 = 100;

/// Errors raised while validating a page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PageRequestError {
    /// Pages are numbered from one.
    #[error("page must be at least 1")]
    ZeroPage,
    /// A page must hold at least one item.
    #[error("limit must be at least 1")]
    ZeroLimit,
}

/// Validated page number and page size.
///
/// ## Invariants
/// - `page >= 1`
/// - `1 <= limit <= MAX_LIMIT`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    /// Build a request from optional query values.
    ///
    /// Missing values fall back to [`DEFAULT_PAGE`] and [`DEFAULT_LIMIT`].
    /// A `limit` above [`MAX_LIMIT`] is clamped rather than rejected.
    ///
    /// # Errors
    /// Returns [`PageRequestError`] when `page` or `limit` is zero.
    pub fn new(page: Option<u64>, limit: Option<u64>) -> Result<Self, PageRequestError> {
        let page = page.unwrap_or(DEFAULT_PAGE);
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        if page == 0 {
            return Err(PageRequestError::ZeroPage);
        }
        if limit == 0 {
            return Err(PageRequestError::ZeroLimit);
        }
        Ok(Self {
            page,
            limit: limit.min(MAX_LIMIT),
        })
    }

    /// One-based page number.
    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    /// Effective page size after clamping.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows to skip before this page starts.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Counters describing one page of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Number of items in the whole collection.
    pub total_items: u64,
    /// Number of items on this page.
    pub item_count: u64,
    /// Requested page size after clamping.
    pub items_per_page: u64,
    /// Number of pages needed to cover the collection.
    pub total_pages: u64,
    /// One-based index of this page.
    pub current_page: u64,
}

/// Navigation links relative to the route the page was served from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    /// Link to the first page.
    pub first: String,
    /// Link to the preceding page, absent on the first page.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub previous: Option<String>,
    /// Link to the following page, absent on the last page.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub next: Option<String>,
    /// Link to the last page.
    pub last: String,
}

/// One page of results plus its metadata and links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page.
    pub items: Vec<T>,
    /// Page counters.
    pub meta: PageMeta,
    /// Navigation links.
    pub links: PageLinks,
}

impl<T> Page<T> {
    /// Assemble a page from a slice of items and the collection size.
    ///
    /// `route` is the path the links are built against, for example
    /// `/api/users`.
    #[must_use]
    pub fn new(items: Vec<T>, total_items: u64, request: PageRequest, route: &str) -> Self {
        let total_pages = total_items.div_ceil(request.limit());
        let current_page = request.page();
        let link = |page: u64| page_link(route, page, request.limit());

        let links = PageLinks {
            first: link(1),
            previous: (current_page > 1).then(|| link(current_page - 1)),
            next: (current_page < total_pages).then(|| link(current_page + 1)),
            last: link(total_pages.max(1)),
        };
        let meta = PageMeta {
            total_items,
            item_count: items.len() as u64,
            items_per_page: request.limit(),
            total_pages,
            current_page,
        };

        Self { items, meta, links }
    }

    /// Convert every item while keeping metadata and links.
    #[must_use]
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            meta: self.meta,
            links: self.links,
        }
    }
}

fn page_link(route: &str, page: u64, limit: u64) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .append_pair("page", &page.to_string())
        .append_pair("limit", &limit.to_string())
        .finish();
    format!("{route}?{query}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, DEFAULT_PAGE, DEFAULT_LIMIT)]
    #[case(Some(3), Some(25), 3, 25)]
    #[case(Some(1), Some(500), 1, MAX_LIMIT)]
    #[case(Some(1), Some(MAX_LIMIT), 1, MAX_LIMIT)]
    fn page_request_applies_defaults_and_clamp(
        #[case] page: Option<u64>,
        #[case] limit: Option<u64>,
        #[case] expected_page: u64,
        #[case] expected_limit: u64,
    ) {
        let request = PageRequest::new(page, limit).expect("valid request");
        assert_eq!(request.page(), expected_page);
        assert_eq!(request.limit(), expected_limit);
    }

    #[rstest]
    #[case(Some(0), None, PageRequestError::ZeroPage)]
    #[case(None, Some(0), PageRequestError::ZeroLimit)]
    fn page_request_rejects_zero(
        #[case] page: Option<u64>,
        #[case] limit: Option<u64>,
        #[case] expected: PageRequestError,
    ) {
        assert_eq!(PageRequest::new(page, limit), Err(expected));
    }

    #[rstest]
    #[case(1, 10, 0)]
    #[case(3, 10, 20)]
    #[case(2, 100, 100)]
    fn offset_skips_preceding_pages(#[case] page: u64, #[case] limit: u64, #[case] offset: u64) {
        let request = PageRequest::new(Some(page), Some(limit)).expect("valid request");
        assert_eq!(request.offset(), offset);
    }

    #[rstest]
    fn middle_page_links_both_ways() {
        let request = PageRequest::new(Some(2), Some(10)).expect("valid request");
        let page = Page::new(vec![0_u8; 10], 35, request, "/api/users");

        assert_eq!(page.meta.total_pages, 4);
        assert_eq!(page.meta.item_count, 10);
        assert_eq!(page.links.first, "/api/users?page=1&limit=10");
        assert_eq!(
            page.links.previous.as_deref(),
            Some("/api/users?page=1&limit=10")
        );
        assert_eq!(page.links.next.as_deref(), Some("/api/users?page=3&limit=10"));
        assert_eq!(page.links.last, "/api/users?page=4&limit=10");
    }

    #[rstest]
    fn empty_collection_has_single_page_of_links() {
        let page = Page::<u8>::new(Vec::new(), 0, PageRequest::default(), "/api/users");

        assert_eq!(page.meta.total_pages, 0);
        assert!(page.links.previous.is_none());
        assert!(page.links.next.is_none());
        assert_eq!(page.links.last, "/api/users?page=1&limit=10");
    }

    #[rstest]
    fn serialises_with_camel_case_meta() {
        let page = Page::new(vec!["x"], 1, PageRequest::default(), "/items");
        let value = serde_json::to_value(&page).expect("serialise page");

        assert_eq!(value["meta"]["totalItems"], 1);
        assert_eq!(value["meta"]["itemsPerPage"], DEFAULT_LIMIT);
        assert_eq!(value["meta"]["currentPage"], 1);
        assert!(value["links"].get("next").is_none());
    }

    #[rstest]
    fn map_preserves_metadata() {
        let page = Page::new(vec![1, 2], 2, PageRequest::default(), "/n");
        let meta = page.meta.clone();
        let mapped = page.map(|n| n * 10);

        assert_eq!(mapped.items, vec![10, 20]);
        assert_eq!(mapped.meta, meta);
    }
}
