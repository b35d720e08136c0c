//! Builders for the HTTP state from server settings.
//!
//! PostgreSQL repositories are used when a database URL is configured;
//! otherwise the process-local adapters back every port.

use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr};
use mockable::DefaultClock;
use tracing::{info, warn};

use concierge::domain::ports::{FileRepository, UserRepository};
use concierge::domain::{AuthService, FileService, UserAccountService};
use concierge::inbound::http::state::{HttpState, HttpStatePorts};
use concierge::outbound::mail::TracingMailer;
use concierge::outbound::memory::{InMemoryFileRepository, InMemoryUserRepository};
use concierge::outbound::persistence::{
    DbPool, DieselFileRepository, DieselUserRepository, PoolConfig, run_pending_migrations,
};
use concierge::outbound::security::{BcryptPasswordHasher, JwtTokenService};

use super::config::ServerSettings;

/// Credential adapters shared by the account and auth services.
struct Credentials {
    hasher: Arc<BcryptPasswordHasher>,
    tokens: Arc<JwtTokenService>,
}

impl Credentials {
    fn from_settings(settings: &ServerSettings) -> Result<Self> {
        let hasher = BcryptPasswordHasher::new(settings.bcrypt_cost())
            .wrap_err("invalid CONCIERGE_BCRYPT_COST")?;
        let secret = settings.signing_secret(cfg!(debug_assertions))?;
        let tokens = JwtTokenService::new(&secret, settings.token_ttl(), Arc::new(DefaultClock));
        Ok(Self {
            hasher: Arc::new(hasher),
            tokens: Arc::new(tokens),
        })
    }
}

/// Wire domain services over the given repositories.
fn assemble<U, F>(users: Arc<U>, files: Arc<F>, credentials: Credentials) -> HttpState
where
    U: UserRepository + 'static,
    F: FileRepository + 'static,
{
    let Credentials { hasher, tokens } = credentials;
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

/// Build the handler state for `settings`.
///
/// # Errors
///
/// Fails when the signing secret or bcrypt cost is unusable, or when the
/// configured database cannot be migrated or pooled.
pub async fn build_http_state(settings: &ServerSettings) -> Result<HttpState> {
    let credentials = Credentials::from_settings(settings)?;

    match settings.database_url() {
        Some(url) => {
            run_pending_migrations(url)
                .await
                .wrap_err("failed to migrate database")?;
            let pool = DbPool::new(PoolConfig::new(url))
                .await
                .wrap_err("failed to build database pool")?;
            info!("using PostgreSQL storage");
            Ok(assemble(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselFileRepository::new(pool)),
                credentials,
            ))
        }
        None => {
            warn!("CONCIERGE_DATABASE_URL not set; data is kept in memory and lost on restart");
            Ok(assemble(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryFileRepository::new()),
                credentials,
            ))
        }
    }
}
