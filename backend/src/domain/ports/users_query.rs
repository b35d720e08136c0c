//! Driving port for account lookups.

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::{Error, User};

/// Domain use-case port for reading accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Return one page of users, newest id first.
    ///
    /// `route` is the path the page links are built from.
    async fn paginate(&self, request: PageRequest, route: &str) -> Result<Page<User>, Error>;

    /// Exact email lookup.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error>;

    /// Lookup by the raw identifier taken from the request.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` when `raw_id` is empty or not a UUID.
    async fn find_by_id(&self, raw_id: &str) -> Result<Option<User>, Error>;
}
