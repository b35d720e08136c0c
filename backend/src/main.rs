//! Concierge entry-point: loads settings, wires adapters, and serves the API.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use concierge::inbound::http::health::HealthState;
use server::{ServerConfig, ServerSettings, build_http_state, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| eyre!("failed to load settings: {e}"))?;
    info!(?settings, "settings loaded");

    let http_state = build_http_state(&settings).await?;
    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, ServerConfig::from(&settings), http_state)?;

    server.await?;
    Ok(())
}
