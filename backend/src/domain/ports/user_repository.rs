//! Port abstraction for user persistence adapters and their errors.
use async_trait::async_trait;

use crate::domain::{PasswordHash, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "user repository query failed: {message}",
        /// The unique email constraint rejected the write.
        DuplicateEmail { email: String } => "email already registered: {email}",
    }
}

/// A user together with the stored hash, used only for credential checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCredentials {
    /// Profile of the matched user.
    pub user: User,
    /// Stored hash to verify against.
    pub password_hash: PasswordHash,
}

/// One slice of the users table ordered by id descending.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserListing {
    /// Rows in the requested window.
    pub users: Vec<User>,
    /// Row count across the whole table.
    pub total: u64,
}

/// Port for reading and writing user rows.
///
/// Mutations that target a single row report whether the row existed, so
/// services can decide between `not_found` and success without a second
/// round trip.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a new user with its password hash.
    ///
    /// Fails with [`UserPersistenceError::DuplicateEmail`] when the email is
    /// already taken.
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user by exact email match.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError>;

    /// Fetch a user and password hash by exact email match.
    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError>;

    /// Fetch the stored password hash for a user.
    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError>;

    /// Read `limit` users after skipping `offset`, newest id first.
    async fn list_page(&self, offset: u64, limit: u64)
    -> Result<UserListing, UserPersistenceError>;

    /// Overwrite the mutable profile fields. Returns `false` when missing.
    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError>;

    /// Replace the password hash. Returns `false` when missing.
    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError>;

    /// Delete a user. Returns `false` when missing.
    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError>;
}
