//! Authentication services.
//!
//! [`AuthService`] implements [`LoginService`] and [`SessionQuery`]: it
//! checks email and password pairs against the user store and turns bearer
//! tokens back into account identifiers.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{
    LoginService, PasswordHasher, SessionQuery, TokenError, TokenService, UserRepository,
};
use crate::domain::user_account_service::{map_hash_error, map_user_error};
use crate::domain::{Error, LoginCredentials, LoginResponse, User, UserId};

const INVALID_CREDENTIALS: &str = "invalid credentials";

/// Authentication service implementing the session driving ports.
#[derive(Clone)]
pub struct AuthService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AuthService<U, H, T> {
    /// Create a new service with the given collaborators.
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_token_error(error: &TokenError) -> Error {
    match error {
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
        TokenError::Invalid { .. } | TokenError::Expired {} => {
            Error::unauthorized("invalid or expired token")
        }
    }
}

#[async_trait]
impl<U, H, T> LoginService for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<User, Error> {
        let Some(found) = self
            .users
            .find_credentials_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("sign-in rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        let matches = self
            .hasher
            .verify(credentials.password(), &found.password_hash)
            .await
            .map_err(map_hash_error)?;
        if !matches {
            debug!(user_id = %found.user.id(), "sign-in rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        Ok(found.user)
    }

    async fn login(&self, user: &User) -> Result<LoginResponse, Error> {
        let access_token = self
            .tokens
            .issue(user.id())
            .map_err(|err| map_token_error(&err))?;
        Ok(LoginResponse {
            access_token,
            id: *user.id(),
        })
    }
}

#[async_trait]
impl<U, H, T> SessionQuery for AuthService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenService,
{
    async fn authenticate_bearer(&self, token: &str) -> Result<UserId, Error> {
        self.tokens
            .verify(token)
            .map(|claims| claims.subject)
            .map_err(|err| {
                debug!(error = %err, "bearer token rejected");
                map_token_error(&err)
            })
    }

    async fn current_user(&self, token: &str) -> Result<Option<User>, Error> {
        let id = self.authenticate_bearer(token).await?;
        self.users.find_by_id(&id).await.map_err(map_user_error)
    }
}
