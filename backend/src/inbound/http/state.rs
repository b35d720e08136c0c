//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    FilesQuery, LoginService, SessionQuery, UsersCommand, UsersQuery,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub session: Arc<dyn SessionQuery>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub files_query: Arc<dyn FilesQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub session: Arc<dyn SessionQuery>,
    pub users: Arc<dyn UsersCommand>,
    pub users_query: Arc<dyn UsersQuery>,
    pub files_query: Arc<dyn FilesQuery>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    ///
    /// One service commonly backs several ports, so the same `Arc` is cloned
    /// into each slot it implements.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use concierge::domain::{AuthService, FileService, UserAccountService};
    /// use concierge::inbound::http::state::{HttpState, HttpStatePorts};
    /// use concierge::outbound::mail::TracingMailer;
    /// use concierge::outbound::memory::{InMemoryFileRepository, InMemoryUserRepository};
    /// use concierge::outbound::security::{BcryptPasswordHasher, JwtTokenService};
    /// use mockable::DefaultClock;
    ///
    /// let users = Arc::new(InMemoryUserRepository::new());
    /// let files = Arc::new(InMemoryFileRepository::new());
    /// let hasher = Arc::new(BcryptPasswordHasher::new(4).expect("valid cost"));
    /// let tokens = Arc::new(JwtTokenService::new(b"secret", None, Arc::new(DefaultClock)));
    ///
    /// let file_service = Arc::new(FileService::new(files));
    /// let accounts = Arc::new(UserAccountService::new(
    ///     users.clone(),
    ///     file_service.clone(),
    ///     hasher.clone(),
    ///     Arc::new(TracingMailer),
    /// ));
    /// let auth = Arc::new(AuthService::new(users, hasher, tokens));
    ///
    /// let state = HttpState::new(HttpStatePorts {
    ///     login: auth.clone(),
    ///     session: auth,
    ///     users: accounts.clone(),
    ///     users_query: accounts,
    ///     files_query: file_service,
    /// });
    /// let _login = state.login.clone();
    /// ```
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            login,
            session,
            users,
            users_query,
            files_query,
        } = ports;
        Self {
            login,
            session,
            users,
            users_query,
            files_query,
        }
    }
}
