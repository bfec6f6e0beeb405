//! Bookstore entry-point: loads configuration, wires the catalogue and serves HTTP.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

mod server;

use std::io;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use bookstore::inbound::http::health::HealthState;
use bookstore::inbound::http::session_config::fingerprint::key_fingerprint;
use bookstore::inbound::http::session_config::{BuildMode, session_settings};
use bookstore::settings::BookstoreSettings;
use server::{ServerConfig, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = BookstoreSettings::load_from_iter(std::env::args_os())
        .map_err(|e| io::Error::other(format!("failed to load configuration: {e}")))?;
    let bind_addr = settings.bind_addr().map_err(io::Error::other)?;
    let session = session_settings(&settings, BuildMode::from_debug_assertions())
        .map_err(io::Error::other)?;

    info!(
        fingerprint = %key_fingerprint(&session.key),
        ephemeral = session.ephemeral,
        "session key loaded"
    );

    let config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    )
    .with_sections(settings.sections());

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "bookstore listening");
    server.await
}
