//! `FileRepository` backed by a map in process memory.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{FilePersistenceError, FileRepository};
use crate::domain::{FileId, StoredFile};

/// In-memory implementation of the `FileRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryFileRepository {
    files: Mutex<HashMap<FileId, StoredFile>>,
}

impl InMemoryFileRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn files(&self) -> Result<MutexGuard<'_, HashMap<FileId, StoredFile>>, FilePersistenceError> {
        self.files
            .lock()
            .map_err(|_| FilePersistenceError::connection("file store lock poisoned"))
    }
}

#[async_trait]
impl FileRepository for InMemoryFileRepository {
    async fn insert(&self, file: &StoredFile) -> Result<(), FilePersistenceError> {
        let mut files = self.files()?;
        if files.contains_key(file.id()) {
            return Err(FilePersistenceError::query(format!(
                "file {} already exists",
                file.id()
            )));
        }
        files.insert(*file.id(), file.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FilePersistenceError> {
        Ok(self.files()?.get(id).cloned())
    }
}
