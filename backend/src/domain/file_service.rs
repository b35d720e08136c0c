//! File storage service implementing [`FilesQuery`] and [`FilesCommand`].

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{FilePersistenceError, FileRepository, FilesCommand, FilesQuery};
use crate::domain::{Error, FileId, FileUpload, StoredFile};

fn map_file_error(error: FilePersistenceError) -> Error {
    match error {
        FilePersistenceError::Connection { message } => {
            Error::service_unavailable(format!("file repository unavailable: {message}"))
        }
        FilePersistenceError::Query { message } => {
            Error::internal(format!("file repository error: {message}"))
        }
    }
}

/// Service over the write-once file table.
#[derive(Clone)]
pub struct FileService<F> {
    files: Arc<F>,
}

impl<F> FileService<F> {
    /// Create a new service backed by `files`.
    pub fn new(files: Arc<F>) -> Self {
        Self { files }
    }
}

#[async_trait]
impl<F> FilesQuery for FileService<F>
where
    F: FileRepository,
{
    async fn get_by_id(&self, raw_id: &str) -> Result<StoredFile, Error> {
        let id = FileId::new(raw_id).map_err(|err| {
            Error::invalid_request(err.to_string()).with_details(json!({
                "field": "id",
                "code": "invalid_id",
            }))
        })?;
        self.files
            .find_by_id(&id)
            .await
            .map_err(map_file_error)?
            .ok_or_else(|| Error::not_found(format!("file {id} not found")))
    }
}

#[async_trait]
impl<F> FilesCommand for FileService<F>
where
    F: FileRepository,
{
    async fn store(&self, upload: FileUpload) -> Result<StoredFile, Error> {
        let file = StoredFile::from_upload(upload);
        self.files.insert(&file).await.map_err(map_file_error)?;
        info!(file_id = %file.id(), bytes = file.data().len(), "file stored");
        Ok(file)
    }
}
