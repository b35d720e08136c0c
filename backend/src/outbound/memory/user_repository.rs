//! `UserRepository` backed by a map in process memory.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::ports::{UserCredentials, UserListing, UserPersistenceError, UserRepository};
use crate::domain::{PasswordHash, User, UserId};

#[derive(Debug, Clone)]
struct StoredUser {
    user: User,
    password_hash: PasswordHash,
}

/// In-memory implementation of the `UserRepository` port.
///
/// Keys are ordered by UUID so listing matches the `ORDER BY id DESC` used by
/// the Diesel adapter.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    rows: Mutex<BTreeMap<Uuid, StoredUser>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn rows(&self) -> Result<MutexGuard<'_, BTreeMap<Uuid, StoredUser>>, UserPersistenceError> {
        self.rows
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

fn email_taken_by_other(
    rows: &BTreeMap<Uuid, StoredUser>,
    email: &str,
    owner: &Uuid,
) -> bool {
    rows.iter()
        .any(|(id, row)| id != owner && row.user.email().as_ref() == email)
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut rows = self.rows()?;
        let id = *user.id().as_uuid();
        if email_taken_by_other(&rows, user.email().as_ref(), &id) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        if rows.contains_key(&id) {
            return Err(UserPersistenceError::query(format!("user {id} already exists")));
        }
        rows.insert(
            id,
            StoredUser {
                user: user.clone(),
                password_hash: password_hash.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .rows()?
            .get(id.as_uuid())
            .map(|row| row.user.clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .rows()?
            .values()
            .find(|row| row.user.email().as_ref() == email)
            .map(|row| row.user.clone()))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        Ok(self
            .rows()?
            .values()
            .find(|row| row.user.email().as_ref() == email)
            .map(|row| UserCredentials {
                user: row.user.clone(),
                password_hash: row.password_hash.clone(),
            }))
    }

    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError> {
        Ok(self
            .rows()?
            .get(id.as_uuid())
            .map(|row| row.password_hash.clone()))
    }

    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<UserListing, UserPersistenceError> {
        let rows = self.rows()?;
        let skip = usize::try_from(offset).unwrap_or(usize::MAX);
        let take = usize::try_from(limit).unwrap_or(usize::MAX);
        let users = rows
            .values()
            .rev()
            .skip(skip)
            .take(take)
            .map(|row| row.user.clone())
            .collect();
        Ok(UserListing {
            users,
            total: rows.len() as u64,
        })
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut rows = self.rows()?;
        let id = *user.id().as_uuid();
        if email_taken_by_other(&rows, user.email().as_ref(), &id) {
            return Err(UserPersistenceError::duplicate_email(user.email().as_ref()));
        }
        Ok(rows
            .get_mut(&id)
            .map(|row| row.user = user.clone())
            .is_some())
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        Ok(self
            .rows()?
            .get_mut(id.as_uuid())
            .map(|row| row.password_hash = password_hash.clone())
            .is_some())
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.rows()?.remove(id.as_uuid()).is_some())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::EmailAddress;
    use rstest::{fixture, rstest};

    fn user(email: &str) -> User {
        User::new(
            UserId::random(),
            EmailAddress::new(email).expect("valid email"),
        )
    }

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::new()
    }

    #[rstest]
    #[tokio::test]
    async fn insert_rejects_duplicate_email(repo: InMemoryUserRepository) {
        repo.insert(&user("ada@example.com"), &PasswordHash::new("h1"))
            .await
            .expect("first insert");

        let error = repo
            .insert(&user("ada@example.com"), &PasswordHash::new("h2"))
            .await
            .expect_err("duplicate");

        assert_eq!(
            error,
            UserPersistenceError::duplicate_email("ada@example.com")
        );
    }

    #[rstest]
    #[tokio::test]
    async fn list_page_orders_by_id_descending(repo: InMemoryUserRepository) {
        let mut ids = Vec::new();
        for n in 0..5 {
            let created = user(&format!("user{n}@example.com"));
            ids.push(*created.id());
            repo.insert(&created, &PasswordHash::new("h"))
                .await
                .expect("insert");
        }
        ids.sort_by(|a, b| b.as_uuid().cmp(a.as_uuid()));

        let listing = repo.list_page(1, 2).await.expect("listing");

        assert_eq!(listing.total, 5);
        let listed: Vec<UserId> = listing.users.iter().map(|user| *user.id()).collect();
        assert_eq!(listed, ids.get(1..3).expect("slice").to_vec());
    }

    #[rstest]
    #[tokio::test]
    async fn mutations_report_missing_rows(repo: InMemoryUserRepository) {
        let ghost = user("ghost@example.com");

        assert!(!repo.update(&ghost).await.expect("update"));
        assert!(
            !repo
                .set_password_hash(ghost.id(), &PasswordHash::new("h"))
                .await
                .expect("set hash")
        );
        assert!(!repo.delete(ghost.id()).await.expect("delete"));
    }

    #[rstest]
    #[tokio::test]
    async fn credentials_follow_password_changes(repo: InMemoryUserRepository) {
        let ada = user("ada@example.com");
        repo.insert(&ada, &PasswordHash::new("old"))
            .await
            .expect("insert");
        repo.set_password_hash(ada.id(), &PasswordHash::new("new"))
            .await
            .expect("set hash");

        let credentials = repo
            .find_credentials_by_email("ada@example.com")
            .await
            .expect("lookup")
            .expect("present");

        assert_eq!(credentials.password_hash, PasswordHash::new("new"));
        assert_eq!(credentials.user, ada);
    }
}
