//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their corresponding
//! domain types but live in the inbound adapter layer where framework
//! concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request collides with existing state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing dependency is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// API error response payload with machine-readable code and human-readable
/// message.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "email must be a valid address")]
    message: String,
    /// Correlation identifier for tracing this error across systems.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details, usually `{field, code}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::UserRole`].
#[derive(ToSchema)]
#[schema(as = crate::domain::UserRole)]
pub enum UserRoleSchema {
    /// Operator account.
    #[schema(rename = "admin")]
    Admin,
    /// Regular account; the default at sign-up.
    #[schema(rename = "user")]
    User,
}

/// OpenAPI schema for [`crate::domain::User`].
///
/// Account record as returned to clients. Passwords are never serialised.
#[derive(ToSchema)]
#[schema(as = crate::domain::User)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserSchema {
    /// Stable user identifier.
    #[schema(value_type = String, example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    /// Sign-in email address.
    #[schema(example = "ada@example.com")]
    email: String,
    /// Account role.
    role: UserRoleSchema,
    /// Identifier of the avatar file, when one was uploaded.
    #[schema(value_type = Option<String>, example = "8d3e1f2a-5b7c-4d9e-8f10-2a3b4c5d6e7f")]
    avatar_id: Option<String>,
}

/// OpenAPI schema for [`crate::domain::LoginResponse`].
#[derive(ToSchema)]
#[schema(as = crate::domain::LoginResponse)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct LoginResponseSchema {
    /// Bearer token for the `Authorization` header.
    access_token: String,
    /// Identifier of the signed-in user.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
}

/// OpenAPI schema for [`crate::domain::ports::DeletionReceipt`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ports::DeletionReceipt)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct DeletionReceiptSchema {
    /// Confirmation naming the deleted id.
    #[schema(example = "User with id 3fa85f64-5717-4562-b3fc-2c963f66afa6 was deleted")]
    message: String,
}

/// Counters of a paginated response.
#[derive(ToSchema)]
#[schema(as = pagination::PageMeta)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageMetaSchema {
    /// Rows across all pages.
    total_items: u64,
    /// Rows on this page.
    item_count: u64,
    /// Effective page size.
    items_per_page: u64,
    /// Number of pages.
    total_pages: u64,
    /// One-based number of this page.
    current_page: u64,
}

/// Navigation links of a paginated response.
#[derive(ToSchema)]
#[schema(as = pagination::PageLinks)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct PageLinksSchema {
    /// First page.
    #[schema(example = "/api/users?page=1&limit=10")]
    first: String,
    /// Previous page, absent on the first.
    previous: Option<String>,
    /// Next page, absent on the last.
    next: Option<String>,
    /// Last page.
    last: String,
}

/// One page of users.
#[derive(ToSchema)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPageSchema {
    /// Users on this page.
    items: Vec<UserSchema>,
    /// Counters.
    meta: PageMetaSchema,
    /// Navigation links.
    links: PageLinksSchema,
}
