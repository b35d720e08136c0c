//! Account services.
//!
//! [`UserAccountService`] implements the [`UsersCommand`] and [`UsersQuery`]
//! driving ports on top of the user repository, the file store, the password
//! hasher, and the mailer.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{info, warn};

use crate::domain::ports::{
    ChangePasswordRequest, CreateUserRequest, DeletionReceipt, FilesCommand, MailMessage,
    MailTemplate, Mailer, PasswordHashError, PasswordHasher, UpdateUserRequest,
    UserPersistenceError, UserRepository, UsersCommand, UsersQuery,
};
use crate::domain::{EmailAddress, Error, FileId, FileUpload, User, UserId, UserValidationError};

const WELCOME_SUBJECT: &str = "Welcome aboard";

/// Account service implementing the user driving ports.
#[derive(Clone)]
pub struct UserAccountService<U, F, H, M> {
    users: Arc<U>,
    files: Arc<F>,
    hasher: Arc<H>,
    mailer: Arc<M>,
}

impl<U, F, H, M> UserAccountService<U, F, H, M> {
    /// Create a new service with the given collaborators.
    pub fn new(users: Arc<U>, files: Arc<F>, hasher: Arc<H>, mailer: Arc<M>) -> Self {
        Self {
            users,
            files,
            hasher,
            mailer,
        }
    }
}

pub(crate) fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::Connection { message } => {
            Error::service_unavailable(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
        UserPersistenceError::DuplicateEmail { email } => email_taken(&email),
    }
}

pub(crate) fn map_hash_error(error: PasswordHashError) -> Error {
    match error {
        PasswordHashError::Hashing { message } => {
            Error::internal(format!("password hashing failed: {message}"))
        }
        PasswordHashError::Unavailable { message } => {
            Error::service_unavailable(format!("password hasher unavailable: {message}"))
        }
    }
}

fn email_taken(email: &str) -> Error {
    Error::conflict(format!("email {email} is already registered")).with_details(json!({
        "field": "email",
        "code": "email_taken",
    }))
}

fn user_not_found(id: &UserId) -> Error {
    Error::not_found(format!("user {id} not found"))
}

fn invalid_user_id(error: &UserValidationError) -> Error {
    let code = match error {
        UserValidationError::EmptyId => "missing_id",
        _ => "invalid_id",
    };
    Error::invalid_request(error.to_string()).with_details(json!({
        "field": "id",
        "code": code,
    }))
}

impl<U, F, H, M> UserAccountService<U, F, H, M>
where
    U: UserRepository,
    F: FilesCommand,
    H: PasswordHasher,
    M: Mailer,
{
    async fn require_user(&self, id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))
    }

    /// Fail with `conflict` when `email` belongs to an account other than
    /// `owner`.
    async fn ensure_email_available(
        &self,
        email: &EmailAddress,
        owner: Option<&UserId>,
    ) -> Result<(), Error> {
        let existing = self
            .users
            .find_by_email(email.as_ref())
            .await
            .map_err(map_user_error)?;
        match existing {
            Some(user) if Some(user.id()) != owner => Err(email_taken(email.as_ref())),
            _ => Ok(()),
        }
    }

    async fn store_avatar(&self, avatar: Option<FileUpload>) -> Result<Option<FileId>, Error> {
        let Some(upload) = avatar else {
            return Ok(None);
        };
        let file = self.files.store(upload).await?;
        Ok(Some(*file.id()))
    }

    async fn send_welcome(&self, user: &User) {
        let message = MailMessage {
            to: user.email().clone(),
            subject: WELCOME_SUBJECT.to_owned(),
            template: MailTemplate::Welcome,
            context: json!({ "email": user.email().as_ref() }),
        };
        if let Err(err) = self.mailer.send(&message).await {
            warn!(user_id = %user.id(), error = %err, "welcome mail not sent");
        }
    }
}

#[async_trait]
impl<U, F, H, M> UsersCommand for UserAccountService<U, F, H, M>
where
    U: UserRepository,
    F: FilesCommand,
    H: PasswordHasher,
    M: Mailer,
{
    async fn create(&self, request: CreateUserRequest) -> Result<User, Error> {
        let CreateUserRequest {
            email,
            password,
            avatar,
        } = request;

        self.ensure_email_available(&email, None).await?;
        let hash = self.hasher.hash(&password).await.map_err(map_hash_error)?;
        let avatar_id = self.store_avatar(avatar).await?;

        let user = User::new(UserId::random(), email).with_avatar(avatar_id);
        self.users
            .insert(&user, &hash)
            .await
            .map_err(map_user_error)?;
        info!(user_id = %user.id(), "user created");

        self.send_welcome(&user).await;
        Ok(user)
    }

    async fn update(&self, id: &UserId, request: UpdateUserRequest) -> Result<User, Error> {
        let existing = self.require_user(id).await?;
        let Some(email) = request.email else {
            return Ok(existing);
        };
        if &email == existing.email() {
            return Ok(existing);
        }

        self.ensure_email_available(&email, Some(id)).await?;
        let updated = existing.with_email(email);
        if !self.users.update(&updated).await.map_err(map_user_error)? {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user updated");
        Ok(updated)
    }

    async fn change_password(
        &self,
        id: &UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, Error> {
        let user = self.require_user(id).await?;
        let stored = self
            .users
            .find_password_hash(id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| user_not_found(id))?;

        let matches = self
            .hasher
            .verify(request.old_password.expose(), &stored)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            return Err(Error::not_found("old password does not match"));
        }

        let hash = self
            .hasher
            .hash(&request.new_password)
            .await
            .map_err(map_hash_error)?;
        if !self
            .users
            .set_password_hash(id, &hash)
            .await
            .map_err(map_user_error)?
        {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "password changed");
        Ok(user)
    }

    async fn remove(&self, id: &UserId) -> Result<DeletionReceipt, Error> {
        if !self.users.delete(id).await.map_err(map_user_error)? {
            return Err(user_not_found(id));
        }
        info!(user_id = %id, "user deleted");
        Ok(DeletionReceipt::for_user(id))
    }
}

#[async_trait]
impl<U, F, H, M> UsersQuery for UserAccountService<U, F, H, M>
where
    U: UserRepository,
    F: FilesCommand,
    H: PasswordHasher,
    M: Mailer,
{
    async fn paginate(&self, request: PageRequest, route: &str) -> Result<Page<User>, Error> {
        let listing = self
            .users
            .list_page(request.offset(), request.limit())
            .await
            .map_err(map_user_error)?;
        Ok(Page::new(listing.users, listing.total, request, route))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, Error> {
        self.users
            .find_by_email(email)
            .await
            .map_err(map_user_error)
    }

    async fn find_by_id(&self, raw_id: &str) -> Result<Option<User>, Error> {
        let id = UserId::new(raw_id).map_err(|err| invalid_user_id(&err))?;
        self.users.find_by_id(&id).await.map_err(map_user_error)
    }
}

#[cfg(test)]
#[path = "user_account_service_tests.rs"]
mod tests;
