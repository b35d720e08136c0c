//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hasher, token signer, mailer) are implemented
//! by outbound adapters. Driving ports (`*Command`, `*Query`,
//! [`LoginService`], [`SessionQuery`]) are implemented by domain services and
//! consumed by inbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod file_repository;
mod files_command;
mod files_query;
mod login_service;
mod mailer;
mod password_hasher;
mod session_query;
mod token_service;
mod user_repository;
mod users_command;
mod users_query;

#[cfg(test)]
pub use file_repository::MockFileRepository;
pub use file_repository::{FilePersistenceError, FileRepository};
#[cfg(test)]
pub use files_command::MockFilesCommand;
pub use files_command::FilesCommand;
#[cfg(test)]
pub use files_query::MockFilesQuery;
pub use files_query::FilesQuery;
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use mailer::MockMailer;
pub use mailer::{MailError, MailMessage, MailTemplate, Mailer};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use session_query::MockSessionQuery;
pub use session_query::SessionQuery;
#[cfg(test)]
pub use token_service::MockTokenService;
pub use token_service::{TokenError, TokenService};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserCredentials, UserListing, UserPersistenceError, UserRepository};
#[cfg(test)]
pub use users_command::MockUsersCommand;
pub use users_command::{
    ChangePasswordRequest, CreateUserRequest, DeletionReceipt, UpdateUserRequest, UsersCommand,
};
#[cfg(test)]
pub use users_query::MockUsersQuery;
pub use users_query::UsersQuery;
