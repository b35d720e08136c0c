//! Driving port for resolving bearer tokens.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Domain use-case port for per-request token checks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SessionQuery: Send + Sync {
    /// Verify `token` and return its subject.
    ///
    /// # Errors
    ///
    /// Any verification failure is reported as `unauthorized`.
    async fn authenticate_bearer(&self, token: &str) -> Result<UserId, Error>;

    /// Verify `token` and load the user it names, if the account still exists.
    async fn current_user(&self, token: &str) -> Result<Option<User>, Error>;
}
