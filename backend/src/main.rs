//! Kitchen entry-point: loads configuration, prepares the store and serves
//! the HTTP surface.

mod server;

use actix_web::web;
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use kitchen::inbound::http::health::HealthState;
use kitchen::inbound::http::session_config::{
    BuildMode, fingerprint::key_fingerprint, session_settings_from_env,
};
use kitchen::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, ServerSettings, bootstrap_cook, build_kitchen_ports, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(e.to_string()))?;
    let session =
        session_settings_from_env(&DefaultEnv::new(), BuildMode::from_debug_assertions())
            .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let bind_addr = settings
        .bind_addr()
        .map_err(|e| std::io::Error::other(format!("invalid bind address: {e}")))?;
    let mut config = ServerConfig::new(
        session.key,
        session.cookie_secure,
        session.same_site,
        bind_addr,
    );

    if let Some(database_url) = settings.database_url.as_deref() {
        run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        let pool = DbPool::new(PoolConfig::new(database_url))
            .await
            .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    }

    let ports = build_kitchen_ports(config.db_pool.as_ref());
    if let Some((username, password)) = settings.bootstrap_cook() {
        bootstrap_cook(ports.commands.as_ref(), username, password)
            .await
            .map_err(|e| std::io::Error::other(e.to_string()))?;
    }

    let health_state = web::Data::new(HealthState::new());
    info!(addr = %config.bind_addr(), "kitchen listening");
    create_server(health_state, ports.http_state, config)?.await
}
