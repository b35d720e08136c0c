//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into calls on domain ports held in
//! [`state::HttpState`] and map domain errors back to JSON responses.

pub mod auth;
pub mod bearer;
pub mod error;
pub mod files;
pub mod health;
pub mod multipart;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod users;
mod validation;

pub use error::ApiResult;

use actix_web::web;

/// Register every application route under the caller's scope.
///
/// Mount under `/api`; the body and query error handlers are scoped here so
/// rejections share the domain error schema.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use concierge::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(auth::sign_in)
        .service(auth::current_user)
        .service(users::create_user)
        .service(users::list_users)
        .service(users::find_by_email)
        .service(users::find_by_id)
        .service(users::change_password)
        .service(users::update_user)
        .service(users::delete_user)
        .service(files::get_file);
}
