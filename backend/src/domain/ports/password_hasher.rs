//! Port for one-way password hashing.
//!
//! Implementations are expected to be slow on purpose; adapters move the work
//! off the async executor.

use async_trait::async_trait;

use crate::domain::{Password, PasswordHash};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        /// The primitive rejected its input or a stored hash was malformed.
        Hashing { message: String } => "password hashing failed: {message}",
        /// The worker running the hash could not complete.
        Unavailable { message: String } => "password hasher unavailable: {message}",
    }
}

/// Port for hashing and checking passwords.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PasswordHasher: Send + Sync {
    /// Produce a salted hash for `password`.
    async fn hash(&self, password: &Password) -> Result<PasswordHash, PasswordHashError>;

    /// Check `candidate` against a stored hash.
    async fn verify(
        &self,
        candidate: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
