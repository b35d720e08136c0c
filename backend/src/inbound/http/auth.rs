//! Sign-in and session endpoints.
//!
//! ```text
//! POST /api/auth/signin {"email":"ada@example.com","password":"hunter22"}
//! GET /api/auth/current-user  Authorization: Bearer <token>
//! ```

use actix_web::{get, post, web};
use serde::Deserialize;

use crate::domain::{LoginCredentials, LoginResponse, LoginValidationError, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::schemas::{ErrorSchema, LoginResponseSchema, UserSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::map_login_validation_error;

/// Sign-in request body for `POST /api/auth/signin`.
///
/// Example JSON:
/// `{"email":"ada@example.com","password":"hunter22"}`
#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    /// Registered email address.
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Account password.
    #[schema(example = "hunter22")]
    pub password: String,
}

impl TryFrom<SignInRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: SignInRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Exchange credentials for a bearer token.
///
/// Unknown emails and wrong passwords both answer `401` so callers cannot
/// probe which addresses are registered.
#[utoipa::path(
    post,
    path = "/api/auth/signin",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = LoginResponseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "signIn",
    security([])
)]
#[post("/auth/signin")]
pub async fn sign_in(
    state: web::Data<HttpState>,
    payload: web::Json<SignInRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let credentials = LoginCredentials::try_from(payload.into_inner())
        .map_err(|err| map_login_validation_error(&err))?;
    let user = state.login.authenticate(&credentials).await?;
    let response = state.login.login(&user).await?;
    Ok(web::Json(response))
}

/// Return the account the bearer token was issued to.
///
/// Answers `null` when the token is valid but the account has since been
/// deleted.
#[utoipa::path(
    get,
    path = "/api/auth/current-user",
    responses(
        (status = 200, description = "Current user, or null once deleted", body = UserSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/current-user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<web::Json<Option<User>>> {
    let user = state.session.current_user(caller.token()).await?;
    Ok(web::Json(user))
}
