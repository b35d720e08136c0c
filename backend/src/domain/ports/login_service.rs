//! Driving port for sign-in use-cases.
//!
//! Inbound adapters call this port to check credentials and mint a token
//! without knowing which hasher, signer, or store sits behind it.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, LoginResponse, User};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the matching user.
    ///
    /// # Errors
    ///
    /// Returns `unauthorized` when the email is unknown or the password does
    /// not verify. Both cases carry the same message.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error>;

    /// Issue a bearer token for an already authenticated user.
    async fn login(&self, user: &User) -> Result<LoginResponse, Error>;
}
