//! Driving port for storing files.

use async_trait::async_trait;

use crate::domain::{Error, FileUpload, StoredFile};

/// Domain use-case port for uploads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FilesCommand: Send + Sync {
    /// Persist an upload under a freshly generated id.
    async fn store(&self, upload: FileUpload) -> Result<StoredFile, Error>;
}
