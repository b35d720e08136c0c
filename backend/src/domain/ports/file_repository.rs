//! Port for storing and reading binary files.

use async_trait::async_trait;

use crate::domain::{FileId, StoredFile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by file repository adapters.
    pub enum FilePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "file repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "file repository query failed: {message}",
    }
}

/// Port for the write-once file table.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FileRepository: Send + Sync {
    /// Persist a new file.
    async fn insert(&self, file: &StoredFile) -> Result<(), FilePersistenceError>;

    /// Fetch a file with its payload.
    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FilePersistenceError>;
}
