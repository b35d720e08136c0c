//! Users API handlers.
//!
//! ```text
//! POST /api/users {"email":"ada@example.com","password":"hunter22"}
//! GET /api/users?page=1&limit=10
//! GET /api/users/findByEmail/{email}
//! GET /api/users/findById/{id}
//! PATCH /api/users/{id} {"email":"grace@example.com"}
//! PATCH /api/users/change-password/{id} {"oldPassword":"...","newPassword":"..."}
//! DELETE /api/users/{id}
//! ```
//!
//! Everything except sign-up needs a bearer token. The two `PATCH` routes
//! additionally require the path id to be the caller's own.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::{Page, PageRequest};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{
    ChangePasswordRequest, CreateUserRequest, DeletionReceipt, UpdateUserRequest,
};
use crate::domain::User;
use crate::inbound::http::ApiResult;
use crate::inbound::http::bearer::AuthenticatedUser;
use crate::inbound::http::multipart::{SignUpBody, SignUpForm};
use crate::inbound::http::schemas::{
    DeletionReceiptSchema, ErrorSchema, UserPageSchema, UserSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    EMAIL, FieldName, ID, PASSWORD, map_page_request_error, missing_field_error, parse_email,
    parse_password, parse_user_id,
};

/// Route hint embedded in pagination links.
pub const USERS_ROUTE: &str = "/api/users";

const OLD_PASSWORD: FieldName = FieldName::new("oldPassword");
const NEW_PASSWORD: FieldName = FieldName::new("newPassword");

/// Query parameters for `GET /api/users`.
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// One-based page number; defaults to 1.
    pub page: Option<u64>,
    /// Page size; defaults to 10 and is capped at 100.
    pub limit: Option<u64>,
}

/// Body for `PATCH /api/users/{id}`.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserBody {
    /// Replacement email address.
    #[schema(example = "grace@example.com")]
    pub email: Option<String>,
}

/// Body for `PATCH /api/users/change-password/{id}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
    /// Current password.
    pub old_password: String,
    /// Replacement password, 6 to 32 characters.
    pub new_password: String,
}

fn create_request(form: SignUpForm) -> ApiResult<CreateUserRequest> {
    let SignUpForm {
        email,
        password,
        avatar,
    } = form;
    let email = email.ok_or_else(|| missing_field_error(EMAIL))?;
    let password = password.ok_or_else(|| missing_field_error(PASSWORD))?;
    Ok(CreateUserRequest {
        email: parse_email(&email, EMAIL)?,
        password: parse_password(&password, PASSWORD)?,
        avatar,
    })
}

/// Register a new account.
///
/// Accepts JSON, or `multipart/form-data` with `email`, `password` and an
/// optional `file` part stored as the avatar.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body(
        content((SignUpBody = "application/json"), (SignUpBody = "multipart/form-data"))
    ),
    responses(
        (status = 201, description = "User created", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "createUser",
    security([])
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    form: SignUpForm,
) -> ApiResult<HttpResponse> {
    let request = create_request(form)?;
    let user = state.users.create(request).await?;
    Ok(HttpResponse::Created().json(user))
}

/// List accounts one page at a time, newest identifiers first.
#[utoipa::path(
    get,
    path = "/api/users",
    params(PageQuery),
    responses(
        (status = 200, description = "Users", body = UserPageSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    query: web::Query<PageQuery>,
) -> ApiResult<web::Json<Page<User>>> {
    let PageQuery { page, limit } = query.into_inner();
    let request = PageRequest::new(page, limit).map_err(map_page_request_error)?;
    let page = state.users_query.paginate(request, USERS_ROUTE).await?;
    Ok(web::Json(page))
}

/// Look an account up by exact email; `null` when none matches.
#[utoipa::path(
    get,
    path = "/api/users/findByEmail/{email}",
    params(("email" = String, Path, description = "Email of an existing user")),
    responses(
        (status = 200, description = "Matching user or null", body = UserSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUserByEmail"
)]
#[get("/users/findByEmail/{email}")]
pub async fn find_by_email(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let user = state.users_query.find_by_email(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Look an account up by id; `null` when none matches.
///
/// The segment may be empty so a missing id reaches validation as `400`
/// rather than falling through to a routing `404`.
#[utoipa::path(
    get,
    path = "/api/users/findById/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "Matching user or null", body = UserSchema),
        (status = 400, description = "Missing or malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "findUserById"
)]
#[get("/users/findById/{id:.*}")]
pub async fn find_by_id(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<Option<User>>> {
    let user = state.users_query.find_by_id(&path.into_inner()).await?;
    Ok(web::Json(user))
}

/// Update the caller's own profile.
#[utoipa::path(
    patch,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "Caller's own user id")),
    request_body = UpdateUserBody,
    responses(
        (status = 200, description = "Updated user", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the caller's account", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 409, description = "Email already registered", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[patch("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpdateUserBody>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    caller.require_self(&id)?;
    let email = payload
        .into_inner()
        .email
        .map(|raw| parse_email(&raw, EMAIL))
        .transpose()?;
    let user = state
        .users
        .update(&id, UpdateUserRequest { email })
        .await?;
    Ok(web::Json(user))
}

/// Replace the caller's password after checking the current one.
#[utoipa::path(
    patch,
    path = "/api/users/change-password/{id}",
    params(("id" = String, Path, description = "Caller's own user id")),
    request_body = ChangePasswordBody,
    responses(
        (status = 200, description = "Password changed", body = UserSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Not the caller's account", body = ErrorSchema),
        (status = 404, description = "User not found or old password mismatch", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "changePassword"
)]
#[patch("/users/change-password/{id}")]
pub async fn change_password(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<ChangePasswordBody>,
) -> ApiResult<web::Json<User>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    caller.require_self(&id)?;
    let ChangePasswordBody {
        old_password,
        new_password,
    } = payload.into_inner();
    let request = ChangePasswordRequest {
        old_password: parse_password(&old_password, OLD_PASSWORD)?,
        new_password: parse_password(&new_password, NEW_PASSWORD)?,
    };
    let user = state.users.change_password(&id, request).await?;
    Ok(web::Json(user))
}

/// Delete an account.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier (UUID)")),
    responses(
        (status = 200, description = "User deleted", body = DeletionReceiptSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "User not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    _caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionReceipt>> {
    let id = parse_user_id(&path.into_inner(), ID)?;
    let receipt = state.users.remove(&id).await?;
    Ok(web::Json(receipt))
}
