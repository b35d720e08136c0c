//! Server settings loaded via OrthoConfig, plus the builder handed to
//! [`super::create_server`].
//!
//! Settings layer CLI flags over `CONCIERGE_*` environment variables over the
//! optional configuration file. Every value is optional; accessors supply the
//! defaults.

use std::fmt;
use std::time::Duration;

use ortho_config::OrthoConfig;
use rand::RngCore;
use serde::Deserialize;
use tracing::warn;
use zeroize::Zeroizing;

use concierge::inbound::http::multipart::DEFAULT_UPLOAD_LIMIT;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_BCRYPT_COST: u32 = 10;
const EPHEMERAL_SECRET_BYTES: usize = 32;

/// Failures resolving settings into usable server inputs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    /// Release builds refuse to invent a signing secret.
    #[error(
        "CONCIERGE_JWT_SECRET is not set; set it or enable \
         CONCIERGE_ALLOW_EPHEMERAL_SECRET for development"
    )]
    MissingJwtSecret,
}

/// Configuration values for the HTTP server and its adapters.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CONCIERGE")]
pub struct ServerSettings {
    /// Interface to bind; defaults to `0.0.0.0`.
    pub host: Option<String>,
    /// Port to bind; defaults to 3000.
    pub port: Option<u16>,
    /// PostgreSQL connection string. In-memory storage is used when absent.
    pub database_url: Option<String>,
    /// HS256 signing secret for access tokens.
    pub jwt_secret: Option<String>,
    /// Token lifetime in seconds. Tokens never expire when absent.
    pub token_ttl_secs: Option<u64>,
    /// bcrypt work factor; defaults to 10.
    pub bcrypt_cost: Option<u32>,
    /// Largest accepted multipart part in bytes; defaults to 8 MiB.
    pub upload_limit_bytes: Option<usize>,
    /// Generate a throwaway signing secret when none is configured.
    #[ortho_config(default = false)]
    pub allow_ephemeral_secret: bool,
}

impl fmt::Debug for ServerSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database_url", &self.database_url.as_ref().map(|_| "***"))
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("upload_limit_bytes", &self.upload_limit_bytes)
            .field("allow_ephemeral_secret", &self.allow_ephemeral_secret)
            .finish()
    }
}

impl ServerSettings {
    /// Host and port to bind.
    pub fn bind_address(&self) -> (String, u16) {
        (
            self.host.clone().unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port.unwrap_or(DEFAULT_PORT),
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }

    /// Token lifetime, if tokens should expire.
    pub fn token_ttl(&self) -> Option<Duration> {
        self.token_ttl_secs.map(Duration::from_secs)
    }

    /// bcrypt work factor.
    pub fn bcrypt_cost(&self) -> u32 {
        self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST)
    }

    /// Largest accepted multipart part in bytes.
    pub fn upload_limit_bytes(&self) -> usize {
        self.upload_limit_bytes.unwrap_or(DEFAULT_UPLOAD_LIMIT)
    }

    /// Resolve the token signing secret.
    ///
    /// Falls back to a random secret in debug builds or when
    /// `allow_ephemeral_secret` is set. Tokens signed with it do not survive
    /// a restart.
    pub fn signing_secret(&self, debug_build: bool) -> Result<Zeroizing<Vec<u8>>, SettingsError> {
        if let Some(secret) = self.jwt_secret.as_deref().filter(|s| !s.is_empty()) {
            return Ok(Zeroizing::new(secret.as_bytes().to_vec()));
        }
        if !(debug_build || self.allow_ephemeral_secret) {
            return Err(SettingsError::MissingJwtSecret);
        }
        warn!("using ephemeral JWT signing secret (dev only)");
        let mut secret = Zeroizing::new(vec![0_u8; EPHEMERAL_SECRET_BYTES]);
        rand::thread_rng().fill_bytes(secret.as_mut_slice());
        Ok(secret)
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) upload_limit: usize,
}

impl ServerConfig {
    /// Construct a server configuration for `bind_addr`.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }

    /// Cap buffered multipart parts at `limit` bytes.
    #[must_use]
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = limit;
        self
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self::new(settings.bind_address()).with_upload_limit(settings.upload_limit_bytes())
    }
}
