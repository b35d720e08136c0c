//! Integration tests for `DieselFileRepository` against embedded PostgreSQL.

#[path = "support/embedded_postgres.rs"]
mod embedded_postgres;

use concierge::domain::ports::{FilePersistenceError, FileRepository};
use concierge::domain::{FileId, Filename, StoredFile};
use concierge::outbound::persistence::DieselFileRepository;
use rstest::{fixture, rstest};

use embedded_postgres::{TestDatabase, test_database};

#[fixture]
fn db() -> Option<TestDatabase> {
    test_database()
}

fn stored(name: &str, data: Vec<u8>) -> StoredFile {
    StoredFile::new(
        FileId::random(),
        Filename::new(name).expect("valid filename"),
        data,
    )
}

#[rstest]
#[case::every_byte_value((0..=u8::MAX).collect())]
#[case::empty(Vec::new())]
#[case::nul_heavy(vec![0; 4096])]
fn payloads_read_back_byte_for_byte(db: Option<TestDatabase>, #[case] data: Vec<u8>) {
    let Some(db) = db else { return };
    let repo = DieselFileRepository::new(db.pool.clone());
    let file = stored("blob.bin", data);

    db.runtime.block_on(async {
        repo.insert(&file).await.expect("insert");
        let found = repo.find_by_id(file.id()).await.expect("query");
        assert_eq!(found, Some(file));
    });
}

#[rstest]
fn missing_files_read_as_none(db: Option<TestDatabase>) {
    let Some(db) = db else { return };
    let repo = DieselFileRepository::new(db.pool.clone());

    let found = db
        .runtime
        .block_on(repo.find_by_id(&FileId::random()))
        .expect("query");
    assert!(found.is_none());
}

#[rstest]
fn reusing_a_file_id_is_a_query_error(db: Option<TestDatabase>) {
    let Some(db) = db else { return };
    let repo = DieselFileRepository::new(db.pool.clone());
    let original = stored("a.txt", b"first".to_vec());
    let clash = StoredFile::new(
        *original.id(),
        Filename::new("b.txt").expect("valid filename"),
        b"second".to_vec(),
    );

    db.runtime.block_on(async {
        repo.insert(&original).await.expect("insert");
        let err = repo.insert(&clash).await.expect_err("primary key clash");
        assert!(matches!(err, FilePersistenceError::Query { .. }));

        let kept = repo.find_by_id(original.id()).await.expect("query");
        assert_eq!(kept, Some(original));
    });
}
