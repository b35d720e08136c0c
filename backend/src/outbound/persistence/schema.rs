//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match `backend/migrations` exactly. Regenerate with
//! `diesel print-schema` after changing a migration.

diesel::table! {
    /// Uploaded binary files.
    ///
    /// Rows are written once and never updated.
    files (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Display name echoed in download headers.
        filename -> Varchar,
        /// Raw payload.
        data -> Bytea,
        /// Record creation timestamp.
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// User accounts.
    ///
    /// `email` carries a unique constraint (`users_email_key`) and
    /// `avatar_id` references `files`.
    users (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Sign-in email, unique across accounts.
        email -> Varchar,
        /// bcrypt hash of the account password.
        password_hash -> Varchar,
        /// Either `admin` or `user`.
        role -> Varchar,
        /// Optional avatar file.
        avatar_id -> Nullable<Uuid>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(users -> files (avatar_id));
diesel::allow_tables_to_appear_in_same_query!(files, users);
