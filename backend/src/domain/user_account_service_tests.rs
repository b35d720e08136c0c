//! Tests for the account service.

use std::sync::Arc;

use super::*;
use crate::domain::ports::{
    MailError, MockFilesCommand, MockMailer, MockPasswordHasher, MockUserRepository,
    UserListing,
};
use crate::domain::{ErrorCode, Filename, Password, PasswordHash, StoredFile, UserRole};
use rstest::{fixture, rstest};

type Service =
    UserAccountService<MockUserRepository, MockFilesCommand, MockPasswordHasher, MockMailer>;

struct Mocks {
    users: MockUserRepository,
    files: MockFilesCommand,
    hasher: MockPasswordHasher,
    mailer: MockMailer,
}

impl Mocks {
    fn into_service(self) -> Service {
        UserAccountService::new(
            Arc::new(self.users),
            Arc::new(self.files),
            Arc::new(self.hasher),
            Arc::new(self.mailer),
        )
    }
}

#[fixture]
fn mocks() -> Mocks {
    Mocks {
        users: MockUserRepository::new(),
        files: MockFilesCommand::new(),
        hasher: MockPasswordHasher::new(),
        mailer: MockMailer::new(),
    }
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn password(raw: &str) -> Password {
    Password::new(raw).expect("valid password")
}

fn existing_user(raw_email: &str) -> User {
    User::new(UserId::random(), email(raw_email))
}

fn create_request(raw_email: &str, avatar: Option<FileUpload>) -> CreateUserRequest {
    CreateUserRequest {
        email: email(raw_email),
        password: password("secret-1"),
        avatar,
    }
}

#[rstest]
#[tokio::test]
async fn create_hashes_password_and_persists_plain_user(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_email()
        .withf(|email| email == "ada@example.com")
        .times(1)
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password.expose() == "secret-1")
        .times(1)
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .users
        .expect_insert()
        .withf(|user, hash| user.email().as_ref() == "ada@example.com" && hash.as_str() == "hashed")
        .times(1)
        .return_once(|_, _| Ok(()));
    mocks.files.expect_store().times(0);
    mocks.mailer.expect_send().times(1).return_once(|_| Ok(()));

    let user = mocks
        .into_service()
        .create(create_request("ada@example.com", None))
        .await
        .expect("user created");

    assert_eq!(user.email().as_ref(), "ada@example.com");
    assert_eq!(user.role(), UserRole::User);
    assert!(user.avatar_id().is_none());
}

#[rstest]
#[tokio::test]
async fn create_rejects_registered_email_before_hashing(mut mocks: Mocks) {
    let taken = existing_user("ada@example.com");
    mocks
        .users
        .expect_find_by_email()
        .times(1)
        .return_once(move |_| Ok(Some(taken)));
    mocks.hasher.expect_hash().times(0);
    mocks.users.expect_insert().times(0);
    mocks.mailer.expect_send().times(0);

    let error = mocks
        .into_service()
        .create(create_request("ada@example.com", None))
        .await
        .expect_err("duplicate email");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_maps_unique_violation_to_conflict(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .users
        .expect_insert()
        .return_once(|_, _| Err(UserPersistenceError::duplicate_email("ada@example.com")));
    mocks.mailer.expect_send().times(0);

    let error = mocks
        .into_service()
        .create(create_request("ada@example.com", None))
        .await
        .expect_err("race lost");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn create_links_stored_avatar(mut mocks: Mocks) {
    let upload = FileUpload {
        filename: Filename::new("face.png").expect("filename"),
        data: vec![1, 2, 3],
    };
    mocks
        .users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .files
        .expect_store()
        .withf(|upload| upload.filename.as_ref() == "face.png" && upload.data == [1_u8, 2, 3])
        .times(1)
        .return_once(|upload| Ok(StoredFile::from_upload(upload)));
    mocks
        .users
        .expect_insert()
        .withf(|user, _| user.avatar_id().is_some())
        .times(1)
        .return_once(|_, _| Ok(()));
    mocks.mailer.expect_send().return_once(|_| Ok(()));

    let user = mocks
        .into_service()
        .create(create_request("ada@example.com", Some(upload)))
        .await
        .expect("user created");

    assert!(user.avatar_id().is_some());
}

#[rstest]
#[tokio::test]
async fn create_stops_when_the_avatar_cannot_be_stored(mut mocks: Mocks) {
    let upload = FileUpload {
        filename: Filename::new("face.png").expect("filename"),
        data: vec![1, 2, 3],
    };
    mocks
        .users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks
        .files
        .expect_store()
        .times(1)
        .return_once(|_| Err(Error::service_unavailable("file repository unavailable")));
    mocks.users.expect_insert().times(0);
    mocks.mailer.expect_send().times(0);

    let error = mocks
        .into_service()
        .create(create_request("ada@example.com", Some(upload)))
        .await
        .expect_err("avatar store failed");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn create_succeeds_when_welcome_mail_fails(mut mocks: Mocks) {
    mocks
        .users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    mocks
        .hasher
        .expect_hash()
        .return_once(|_| Ok(PasswordHash::new("hashed")));
    mocks.users.expect_insert().return_once(|_, _| Ok(()));
    mocks
        .mailer
        .expect_send()
        .withf(|message| message.template == MailTemplate::Welcome)
        .times(1)
        .return_once(|_| Err(MailError::delivery("smtp down")));

    let result = mocks
        .into_service()
        .create(create_request("ada@example.com", None))
        .await;

    assert!(result.is_ok());
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[case(UserPersistenceError::duplicate_email("a@b.co"), ErrorCode::Conflict)]
fn persistence_errors_map_to_codes(#[case] error: UserPersistenceError, #[case] code: ErrorCode) {
    assert_eq!(map_user_error(error).code(), code);
}

#[rstest]
#[tokio::test]
async fn update_reports_unknown_user(mut mocks: Mocks) {
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));
    mocks.users.expect_update().times(0);

    let error = mocks
        .into_service()
        .update(
            &UserId::random(),
            UpdateUserRequest {
                email: Some(email("new@example.com")),
            },
        )
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn update_rejects_email_owned_by_another_account(mut mocks: Mocks) {
    let user = existing_user("ada@example.com");
    let id = *user.id();
    let other = existing_user("grace@example.com");
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .users
        .expect_find_by_email()
        .return_once(move |_| Ok(Some(other)));
    mocks.users.expect_update().times(0);

    let error = mocks
        .into_service()
        .update(
            &id,
            UpdateUserRequest {
                email: Some(email("grace@example.com")),
            },
        )
        .await
        .expect_err("email taken");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[tokio::test]
async fn update_persists_new_email(mut mocks: Mocks) {
    let user = existing_user("ada@example.com");
    let id = *user.id();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .users
        .expect_find_by_email()
        .return_once(|_| Ok(None));
    mocks
        .users
        .expect_update()
        .withf(move |user| user.id() == &id && user.email().as_ref() == "lovelace@example.com")
        .times(1)
        .return_once(|_| Ok(true));

    let updated = mocks
        .into_service()
        .update(
            &id,
            UpdateUserRequest {
                email: Some(email("lovelace@example.com")),
            },
        )
        .await
        .expect("updated");

    assert_eq!(updated.id(), &id);
    assert_eq!(updated.email().as_ref(), "lovelace@example.com");
}

#[rstest]
#[tokio::test]
async fn update_without_fields_is_a_no_op(mut mocks: Mocks) {
    let user = existing_user("ada@example.com");
    let id = *user.id();
    let expected = user.clone();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks.users.expect_update().times(0);

    let unchanged = mocks
        .into_service()
        .update(&id, UpdateUserRequest::default())
        .await
        .expect("no-op update");

    assert_eq!(unchanged, expected);
}

fn change_request() -> ChangePasswordRequest {
    ChangePasswordRequest {
        old_password: password("old-secret"),
        new_password: password("new-secret"),
    }
}

#[rstest]
#[tokio::test]
async fn change_password_keeps_hash_when_old_password_is_wrong(mut mocks: Mocks) {
    let user = existing_user("ada@example.com");
    let id = *user.id();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .users
        .expect_find_password_hash()
        .return_once(|_| Ok(Some(PasswordHash::new("stored"))));
    mocks
        .hasher
        .expect_verify()
        .withf(|candidate, hash| candidate == "old-secret" && hash.as_str() == "stored")
        .times(1)
        .return_once(|_, _| Ok(false));
    mocks.hasher.expect_hash().times(0);
    mocks.users.expect_set_password_hash().times(0);

    let error = mocks
        .into_service()
        .change_password(&id, change_request())
        .await
        .expect_err("wrong old password");

    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), "old password does not match");
}

#[rstest]
#[tokio::test]
async fn change_password_stores_new_hash(mut mocks: Mocks) {
    let user = existing_user("ada@example.com");
    let id = *user.id();
    mocks
        .users
        .expect_find_by_id()
        .return_once(move |_| Ok(Some(user)));
    mocks
        .users
        .expect_find_password_hash()
        .return_once(|_| Ok(Some(PasswordHash::new("stored"))));
    mocks.hasher.expect_verify().return_once(|_, _| Ok(true));
    mocks
        .hasher
        .expect_hash()
        .withf(|password| password.expose() == "new-secret")
        .return_once(|_| Ok(PasswordHash::new("rotated")));
    mocks
        .users
        .expect_set_password_hash()
        .withf(move |user_id, hash| user_id == &id && hash.as_str() == "rotated")
        .times(1)
        .return_once(|_, _| Ok(true));

    let user = mocks
        .into_service()
        .change_password(&id, change_request())
        .await
        .expect("password changed");

    assert_eq!(user.id(), &id);
}

#[rstest]
#[tokio::test]
async fn change_password_reports_unknown_user(mut mocks: Mocks) {
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));
    mocks.hasher.expect_verify().times(0);

    let error = mocks
        .into_service()
        .change_password(&UserId::random(), change_request())
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn remove_returns_receipt(mut mocks: Mocks) {
    let id = UserId::random();
    mocks.users.expect_delete().times(1).return_once(|_| Ok(true));

    let receipt = mocks.into_service().remove(&id).await.expect("deleted");

    assert_eq!(receipt.message, format!("User with id {id} was deleted"));
}

#[rstest]
#[tokio::test]
async fn remove_reports_unknown_user(mut mocks: Mocks) {
    mocks.users.expect_delete().return_once(|_| Ok(false));

    let error = mocks
        .into_service()
        .remove(&UserId::random())
        .await
        .expect_err("missing user");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("not-a-uuid")]
#[tokio::test]
async fn find_by_id_rejects_malformed_ids(mut mocks: Mocks, #[case] raw: &str) {
    mocks.users.expect_find_by_id().times(0);

    let error = mocks
        .into_service()
        .find_by_id(raw)
        .await
        .expect_err("malformed id");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(
        error.details().and_then(|details| details.get("field")),
        Some(&json!("id"))
    );
}

#[rstest]
#[tokio::test]
async fn find_by_id_returns_none_for_absent_user(mut mocks: Mocks) {
    mocks.users.expect_find_by_id().return_once(|_| Ok(None));

    let found = mocks
        .into_service()
        .find_by_id("3fa85f64-5717-4562-b3fc-2c963f66afa6")
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn paginate_clamps_limit_and_builds_links(mut mocks: Mocks) {
    let users: Vec<User> = (0..3)
        .map(|n| existing_user(&format!("user{n}@example.com")))
        .collect();
    mocks
        .users
        .expect_list_page()
        .withf(|offset, limit| *offset == 100 && *limit == 100)
        .times(1)
        .return_once(move |_, _| Ok(UserListing { users, total: 103 }));

    let request = PageRequest::new(Some(2), Some(500)).expect("page request");
    let page = mocks
        .into_service()
        .paginate(request, "/api/users")
        .await
        .expect("page");

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.meta.items_per_page, 100);
    assert_eq!(page.meta.total_pages, 2);
    assert_eq!(page.links.previous.as_deref(), Some("/api/users?page=1&limit=100"));
    assert!(page.links.next.is_none());
}
