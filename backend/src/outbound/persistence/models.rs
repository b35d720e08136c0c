//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{files, users};

/// Public profile columns of the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub avatar_id: Option<Uuid>,
}

/// Profile columns plus the password hash, read only for sign-in.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserCredentialsRow {
    #[diesel(embed)]
    pub profile: UserRow,
    pub password_hash: String,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
    pub avatar_id: Option<Uuid>,
}

/// Changeset for the mutable profile columns.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = users)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct UserProfileUpdate<'a> {
    pub email: &'a str,
    pub role: &'a str,
    pub avatar_id: Option<Uuid>,
}

/// Row struct for reading from the files table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = files)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct FileRow {
    pub id: Uuid,
    pub filename: String,
    pub data: Vec<u8>,
}

/// Insertable struct for new files.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = files)]
pub(crate) struct NewFileRow<'a> {
    pub id: Uuid,
    pub filename: &'a str,
    pub data: &'a [u8],
}
