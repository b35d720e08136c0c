//! PostgreSQL-backed `FileRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{FilePersistenceError, FileRepository};
use crate::domain::{FileId, Filename, StoredFile};

use super::diesel_basic_error_mapping::{map_basic_diesel_error, map_basic_pool_error};
use super::models::{FileRow, NewFileRow};
use super::pool::{DbPool, PoolError};
use super::schema::files;

/// Diesel-backed implementation of the `FileRepository` port.
#[derive(Clone)]
pub struct DieselFileRepository {
    pool: DbPool,
}

impl DieselFileRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> FilePersistenceError {
    map_basic_pool_error(error, FilePersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> FilePersistenceError {
    map_basic_diesel_error(
        error,
        FilePersistenceError::query,
        FilePersistenceError::connection,
    )
}

fn row_to_file(row: FileRow) -> Result<StoredFile, FilePersistenceError> {
    let filename = Filename::new(&row.filename).map_err(|err| {
        FilePersistenceError::query(format!("stored filename for {} is invalid: {err}", row.id))
    })?;
    Ok(StoredFile::new(FileId::from_uuid(row.id), filename, row.data))
}

#[async_trait]
impl FileRepository for DieselFileRepository {
    async fn insert(&self, file: &StoredFile) -> Result<(), FilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewFileRow {
            id: *file.id().as_uuid(),
            filename: file.filename().as_ref(),
            data: file.data(),
        };

        diesel::insert_into(files::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_by_id(&self, id: &FileId) -> Result<Option<StoredFile>, FilePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<FileRow> = files::table
            .find(*id.as_uuid())
            .select(FileRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_file).transpose()
    }
}

#[cfg(test)]
mod tests {
    //! Row conversion. Queries are covered by `tests/diesel_file_repository.rs`.
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;
    use uuid::Uuid;

    #[rstest]
    fn row_to_file_keeps_bytes() {
        let id = Uuid::new_v4();
        let file = row_to_file(FileRow {
            id,
            filename: "scan.pdf".to_owned(),
            data: vec![0, 159, 146, 150],
        })
        .expect("valid row");

        assert_eq!(file.id(), &FileId::from_uuid(id));
        assert_eq!(file.data(), [0_u8, 159, 146, 150].as_slice());
    }

    #[rstest]
    fn row_to_file_rejects_blank_names() {
        let error = row_to_file(FileRow {
            id: Uuid::new_v4(),
            filename: "  ".to_owned(),
            data: Vec::new(),
        })
        .expect_err("blank filename");

        assert!(matches!(error, FilePersistenceError::Query { .. }));
    }
}
