//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer
//! - **Schemas**: domain type wrappers from
//!   [`crate::inbound::http::schemas`] that provide OpenAPI definitions
//!   without coupling domain types to the utoipa framework
//! - **Security**: the bearer token scheme issued by `POST /api/auth/signin`
//!
//! The generated specification is served by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::auth::SignInRequest;
use crate::inbound::http::multipart::SignUpBody;
use crate::inbound::http::schemas::{
    DeletionReceiptSchema, ErrorCodeSchema, ErrorSchema, LoginResponseSchema, PageLinksSchema,
    PageMetaSchema, UserPageSchema, UserRoleSchema, UserSchema,
};
use crate::inbound::http::users::{ChangePasswordBody, UpdateUserBody};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Name of the bearer security scheme in the generated document.
pub const BEARER_SCHEME: &str = "BearerAuth";

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            BEARER_SCHEME,
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .description(Some("Access token issued by POST /api/auth/signin."))
                    .build(),
            ),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Concierge backend API",
        description = "User accounts, bearer-token sign-in, and avatar file storage."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerAuth" = [])),
    paths(
        crate::inbound::http::auth::sign_in,
        crate::inbound::http::auth::current_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::find_by_email,
        crate::inbound::http::users::find_by_id,
        crate::inbound::http::users::update_user,
        crate::inbound::http::users::change_password,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::files::get_file,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        UserSchema,
        UserRoleSchema,
        UserPageSchema,
        PageMetaSchema,
        PageLinksSchema,
        LoginResponseSchema,
        DeletionReceiptSchema,
        ErrorSchema,
        ErrorCodeSchema,
        SignInRequest,
        SignUpBody,
        UpdateUserBody,
        ChangePasswordBody,
    )),
    tags(
        (name = "auth", description = "Sign-in and session lookup"),
        (name = "users", description = "Account management"),
        (name = "files", description = "Stored file downloads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated document's paths and security.

    use super::*;
    use rstest::rstest;
    use utoipa::OpenApi;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const USER_SCHEMA_NAME: &str = "crate.domain.User";

    #[rstest]
    #[case("/api/auth/signin")]
    #[case("/api/auth/current-user")]
    #[case("/api/users")]
    #[case("/api/users/findByEmail/{email}")]
    #[case("/api/users/findById/{id}")]
    #[case("/api/users/{id}")]
    #[case("/api/users/change-password/{id}")]
    #[case("/api/files/{id}")]
    #[case("/health/ready")]
    fn every_route_is_documented(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key(BEARER_SCHEME));
    }

    #[rstest]
    fn user_schema_is_registered_under_the_domain_name() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let user = schemas.get(USER_SCHEMA_NAME).expect("User schema");
        match user {
            RefOr::T(Schema::Object(obj)) => {
                assert!(obj.properties.contains_key("email"));
                assert!(!obj.properties.contains_key("password"));
            }
            _ => panic!("expected Object schema"),
        }
    }
}
