//! PostgreSQL-backed `UserRepository` implementation using Diesel ORM.

use std::str::FromStr;

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{UserCredentials, UserListing, UserPersistenceError, UserRepository};
use crate::domain::{EmailAddress, FileId, PasswordHash, User, UserId, UserRole};

use super::diesel_basic_error_mapping::{
    is_unique_violation, map_basic_diesel_error, map_basic_pool_error, to_sql_bigint,
};
use super::models::{NewUserRow, UserCredentialsRow, UserProfileUpdate, UserRow};
use super::pool::{DbPool, PoolError};
use super::schema::users;

/// Diesel-backed implementation of the `UserRepository` port.
#[derive(Clone)]
pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> UserPersistenceError {
    map_basic_pool_error(error, UserPersistenceError::connection)
}

fn map_diesel_error(error: diesel::result::Error) -> UserPersistenceError {
    map_basic_diesel_error(
        error,
        UserPersistenceError::query,
        UserPersistenceError::connection,
    )
}

/// Map a failed write, turning unique-email violations into
/// [`UserPersistenceError::DuplicateEmail`].
fn map_write_error(error: diesel::result::Error, email: &EmailAddress) -> UserPersistenceError {
    if is_unique_violation(&error) {
        UserPersistenceError::duplicate_email(email.as_ref())
    } else {
        map_diesel_error(error)
    }
}

fn row_to_user(row: UserRow) -> Result<User, UserPersistenceError> {
    let email = EmailAddress::new(&row.email).map_err(|err| {
        UserPersistenceError::query(format!("stored email for {} is invalid: {err}", row.id))
    })?;
    let role = UserRole::from_str(&row.role).map_err(|err| {
        UserPersistenceError::query(format!("stored role for {} is invalid: {err}", row.id))
    })?;
    Ok(User::new(UserId::from_uuid(row.id), email)
        .with_role(role)
        .with_avatar(row.avatar_id.map(FileId::from_uuid)))
}

/// SQL `OFFSET`/`LIMIT` pair for a page, or `None` when the offset lies past
/// every addressable row.
fn page_window(offset: u64, limit: u64) -> Result<Option<(i64, i64)>, UserPersistenceError> {
    let limit = to_sql_bigint(limit)
        .ok_or_else(|| UserPersistenceError::query(format!("limit {limit} is out of range")))?;
    Ok(to_sql_bigint(offset).map(|offset| (offset, limit)))
}

#[async_trait]
impl UserRepository for DieselUserRepository {
    async fn insert(
        &self,
        user: &User,
        password_hash: &PasswordHash,
    ) -> Result<(), UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = NewUserRow {
            id: *user.id().as_uuid(),
            email: user.email().as_ref(),
            password_hash: password_hash.as_str(),
            role: user.role().as_str(),
            avatar_id: user.avatar_id().map(|id| *id.as_uuid()),
        };

        diesel::insert_into(users::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(|err| map_write_error(err, user.email()))
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .find(*id.as_uuid())
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserRow> = users::table
            .filter(users::email.eq(email))
            .select(UserRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_user).transpose()
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<UserCredentialsRow> = users::table
            .filter(users::email.eq(email))
            .select(UserCredentialsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(|row| {
            Ok(UserCredentials {
                user: row_to_user(row.profile)?,
                password_hash: PasswordHash::new(row.password_hash),
            })
        })
        .transpose()
    }

    async fn find_password_hash(
        &self,
        id: &UserId,
    ) -> Result<Option<PasswordHash>, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let hash: Option<String> = users::table
            .find(*id.as_uuid())
            .select(users::password_hash)
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(hash.map(PasswordHash::new))
    }

    async fn list_page(
        &self,
        offset: u64,
        limit: u64,
    ) -> Result<UserListing, UserPersistenceError> {
        let window = page_window(offset, limit)?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = users::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let total = u64::try_from(total).unwrap_or_default();
        let Some((offset, limit)) = window else {
            return Ok(UserListing {
                users: Vec::new(),
                total,
            });
        };
        let rows: Vec<UserRow> = users::table
            .order(users::id.desc())
            .offset(offset)
            .limit(limit)
            .select(UserRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let users = rows
            .into_iter()
            .map(row_to_user)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(UserListing { users, total })
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let changes = UserProfileUpdate {
            email: user.email().as_ref(),
            role: user.role().as_str(),
            avatar_id: user.avatar_id().map(|id| *id.as_uuid()),
        };

        let affected = diesel::update(users::table.find(*user.id().as_uuid()))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .execute(&mut conn)
            .await
            .map_err(|err| map_write_error(err, user.email()))?;
        Ok(affected > 0)
    }

    async fn set_password_hash(
        &self,
        id: &UserId,
        password_hash: &PasswordHash,
    ) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::update(users::table.find(*id.as_uuid()))
            .set((
                users::password_hash.eq(password_hash.as_str()),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let affected = diesel::delete(users::table.find(*id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(affected > 0)
    }
}
