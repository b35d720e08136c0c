//! Shared helpers for the HTTP integration tests.
//!
//! The app is assembled from the in-memory adapters with a fast bcrypt cost,
//! so every flow runs without external services.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::TestRequest;
use actix_web::{App, web};
use mockable::DefaultClock;

use concierge::Trace;
use concierge::domain::{AuthService, FileService, UserAccountService};
use concierge::inbound::http::configure_api;
use concierge::inbound::http::health::{HealthState, live, ready};
use concierge::inbound::http::multipart::UploadLimit;
use concierge::inbound::http::state::{HttpState, HttpStatePorts};
use concierge::outbound::mail::TracingMailer;
use concierge::outbound::memory::{InMemoryFileRepository, InMemoryUserRepository};
use concierge::outbound::security::{BCRYPT_MIN_COST, BcryptPasswordHasher, JwtTokenService};

const SECRET: &[u8] = b"integration-secret";
const BOUNDARY: &str = "concierge-boundary";

/// Handler state backed by fresh in-memory repositories.
pub fn in_memory_state() -> HttpState {
    in_memory_state_with(Arc::new(InMemoryUserRepository::new()))
}

/// Handler state over a caller-seeded user repository.
pub fn in_memory_state_with(users: Arc<InMemoryUserRepository>) -> HttpState {
    let files = Arc::new(InMemoryFileRepository::new());
    let hasher = Arc::new(BcryptPasswordHasher::new(BCRYPT_MIN_COST).expect("bcrypt cost"));
    let tokens = Arc::new(JwtTokenService::new(SECRET, None, Arc::new(DefaultClock)));

    let file_service = Arc::new(FileService::new(files));
    let accounts = Arc::new(UserAccountService::new(
        users.clone(),
        file_service.clone(),
        hasher.clone(),
        Arc::new(TracingMailer),
    ));
    let auth = Arc::new(AuthService::new(users, hasher, tokens));

    HttpState::new(HttpStatePorts {
        login: auth.clone(),
        session: auth,
        users: accounts.clone(),
        users_query: accounts,
        files_query: file_service,
    })
}

/// The application as the server mounts it, minus CORS and Swagger.
pub fn app(
    state: HttpState,
    upload_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let health = web::Data::new(HealthState::new());
    health.mark_ready();

    App::new()
        .app_data(health)
        .app_data(web::Data::new(state))
        .app_data(UploadLimit(upload_limit))
        .wrap(Trace)
        .service(web::scope("/api").configure(configure_api))
        .service(ready)
        .service(live)
}

/// One `multipart/form-data` part: name, optional filename, and bytes.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a [u8]);

/// `POST /api/users` carrying `parts` as `multipart/form-data`.
pub fn multipart_sign_up(parts: &[Part<'_>]) -> TestRequest {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let disposition = match filename {
            Some(filename) => format!("form-data; name=\"{name}\"; filename=\"{filename}\""),
            None => format!("form-data; name=\"{name}\""),
        };
        body.extend_from_slice(format!("Content-Disposition: {disposition}\r\n\r\n").as_bytes());
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    TestRequest::post()
        .uri("/api/users")
        .insert_header((
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(body)
}

/// `Authorization` header for `token`.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
