//! Bearer token guard for protected endpoints.
//!
//! Handlers opt in by taking an [`AuthenticatedUser`] argument. Extraction
//! reads `Authorization: Bearer <token>`, verifies it through the
//! [`SessionQuery`](crate::domain::ports::SessionQuery) port and fails with
//! `401` before the handler body runs.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, UserId};

use super::state::HttpState;

const BEARER_SCHEME: &str = "bearer";

/// Caller identity resolved from a verified bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    id: UserId,
    token: String,
}

impl AuthenticatedUser {
    /// Account the token was issued to.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Raw token, for ports that need to re-read it.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Reject requests that target another account.
    ///
    /// # Errors
    /// Returns a `forbidden` error when `target` is not the caller.
    pub fn require_self(&self, target: &UserId) -> Result<(), Error> {
        if &self.id == target {
            Ok(())
        } else {
            Err(Error::forbidden("you may only modify your own account"))
        }
    }
}

/// Split `Bearer <token>` into the token, accepting any scheme casing.
fn parse_bearer(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let state = req.app_data::<web::Data<HttpState>>().cloned();

        Box::pin(async move {
            let token = header
                .as_deref()
                .and_then(parse_bearer)
                .map(str::to_owned)
                .ok_or_else(|| Error::unauthorized("missing or malformed bearer token"))?;
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered with the app"))?;
            let id = state.session.authenticate_bearer(&token).await?;
            Ok(Self { id, token })
        })
    }
}
