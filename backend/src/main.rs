//! User service entry-point: loads settings, prepares persistence and serves HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use mockable::DefaultEnv;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{DOCS_PATH, ServerConfig, create_server};
use user_service::config::AppSettings;
use user_service::inbound::http::health::HealthState;
use user_service::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(error) = dotenvy::dotenv() {
        if !error.not_found() {
            return Err(eyre!("failed to load .env: {error}"));
        }
    }
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = AppSettings::load().map_err(|e| eyre!("failed to load settings: {e}"))?;
    let bind_addr = settings.bind_addr();
    let mut config = ServerConfig::new(bind_addr);

    match settings.database_url(&DefaultEnv::new()) {
        Some(url) => {
            run_pending_migrations(&url)
                .await
                .wrap_err("failed to apply database migrations")?;
            let pool = DbPool::new(PoolConfig::new(url).with_max_size(settings.db_pool_size()))
                .await
                .wrap_err("failed to build database pool")?;
            info!(pool_size = settings.db_pool_size(), "database connected");
            config = config.with_db_pool(pool);
        }
        None => {
            warn!("no database URL configured; users are stored in memory");
        }
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config).wrap_err("failed to start HTTP server")?;
    info!(docs = %format!("http://{bind_addr}{DOCS_PATH}"), "API documentation available");
    info!(%bind_addr, "server listening");
    server.await.wrap_err("HTTP server terminated with an error")
}
