//! Driving port for account mutations.
//!
//! Requests arrive already shape-checked: emails and passwords are domain
//! newtypes, so services only enforce rules that need the store.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::{EmailAddress, Error, FileUpload, Password, User, UserId};

/// Request to create an account.
#[derive(Debug)]
pub struct CreateUserRequest {
    /// Sign-in email; must not be registered yet.
    pub email: EmailAddress,
    /// Plain password, hashed before it reaches the store.
    pub password: Password,
    /// Optional avatar stored alongside the account.
    pub avatar: Option<FileUpload>,
}

/// Partial profile update. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateUserRequest {
    /// Replacement email.
    pub email: Option<EmailAddress>,
}

/// Request to rotate a password.
#[derive(Debug)]
pub struct ChangePasswordRequest {
    /// Current password, checked against the stored hash.
    pub old_password: Password,
    /// Replacement password.
    pub new_password: Password,
}

/// Confirmation returned after deleting an account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeletionReceipt {
    /// Human-readable confirmation.
    pub message: String,
}

impl DeletionReceipt {
    /// Receipt for the removal of `id`.
    pub fn for_user(id: &UserId) -> Self {
        Self {
            message: format!("User with id {id} was deleted"),
        }
    }
}

/// Domain use-case port for creating and changing accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Register a new account.
    ///
    /// # Errors
    ///
    /// Returns `conflict` when the email is already registered.
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error>;

    /// Apply a partial profile update.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for unknown ids and `conflict` when the new email
    /// belongs to another account.
    async fn update(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error>;

    /// Replace the password after checking the current one.
    ///
    /// # Errors
    ///
    /// Returns `not_found` for unknown ids and when the old password does
    /// not match. The stored hash is left untouched on failure.
    async fn change_password(
        &self,
        id: &UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, Error>;

    /// Delete an account.
    async fn remove(&self, id: &UserId) -> Result<DeletionReceipt, Error>;
}
