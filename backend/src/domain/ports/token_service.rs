//! Port for issuing and verifying bearer tokens.

use crate::domain::{AccessToken, TokenClaims, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token could not be signed.
        Signing { message: String } => "token signing failed: {message}",
        /// The token is malformed, forged, or carries an unusable subject.
        Invalid { message: String } => "token rejected: {message}",
        /// The token carried an expiry that has passed.
        Expired {} => "token expired",
    }
}

/// Port for stateless bearer tokens.
///
/// Signing with a shared secret is cheap, so the methods are synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait TokenService: Send + Sync {
    /// Sign a token whose subject is `subject`.
    fn issue(&self, subject: &UserId) -> Result<AccessToken, TokenError>;

    /// Verify the signature (and expiry, when present) and return the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
