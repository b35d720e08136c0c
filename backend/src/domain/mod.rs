//! Domain primitives, ports, and services.
//!
//! Purpose: Define strongly typed entities shared by the HTTP and persistence
//! adapters, the ports those adapters plug into, and the services that
//! implement the driving ports. Invariants and serialisation contracts live
//! in each type's Rustdoc.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, UserId, EmailAddress, UserRole: account identity.
//! - StoredFile, FileId, Filename: binary uploads.
//! - Password, PasswordHash, AccessToken, TokenClaims: credential material.
//! - UserAccountService, AuthService, FileService: driving port
//!   implementations.

pub mod auth;
mod auth_service;
pub mod error;
pub mod file;
mod file_service;
pub mod ports;
mod trace_id;
pub mod user;
mod user_account_service;

pub use self::auth::{
    AccessToken, LoginCredentials, LoginResponse, LoginValidationError, PASSWORD_MAX,
    PASSWORD_MIN, Password, PasswordHash, PasswordValidationError, TokenClaims,
};
pub use self::auth_service::AuthService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::file::{FileId, FileUpload, FileValidationError, Filename, StoredFile};
pub use self::file_service::FileService;
pub use self::trace_id::TraceId;
pub use self::user::{EmailAddress, User, UserId, UserRole, UserValidationError};
pub use self::user_account_service::UserAccountService;
