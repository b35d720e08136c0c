//! Driving port for reading stored files.

use async_trait::async_trait;

use crate::domain::{Error, StoredFile};

/// Domain use-case port for file downloads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilesQuery: Send + Sync {
    /// Load a file by the raw identifier taken from the request.
    ///
    /// # Errors
    ///
    /// Returns `invalid_request` for malformed ids and `not_found` when no
    /// file matches.
    async fn get_by_id(&self, raw_id: &str) -> Result<StoredFile, Error>;
}
