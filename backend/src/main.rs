//! Backend entry-point: loads settings, wires adapters and serves the API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use credx_backend::domain::OriginPolicy;
use credx_backend::inbound::http::health::HealthState;
use credx_backend::inbound::http::session_config::{
    BuildMode, ProcessEnv, session_settings_from_env,
};
use credx_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use credx_backend::settings::AppSettings;

use server::{ServerConfig, create_server};

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

    let settings = AppSettings::load()
        .map_err(|e| std::io::Error::other(format!("failed to load settings: {e}")))?;
    let session = session_settings_from_env(&ProcessEnv, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    let bind_addr = settings.bind_addr().map_err(std::io::Error::other)?;
    settings
        .check_production()
        .map_err(std::io::Error::other)?;

    let policy = OriginPolicy::for_environment(settings.production);
    if policy != OriginPolicy::Enforce {
        warn!("widget origin checks are disabled outside production");
    }

    let mut config = ServerConfig::new(session, bind_addr).with_origin_policy(policy);

    if let Some(identity) = settings.identity().map_err(std::io::Error::other)? {
        config = config.with_identity(identity);
    }

    if let Some(database_url) = settings.database_url() {
        let applied = run_pending_migrations(database_url)
            .await
            .map_err(std::io::Error::other)?;
        info!(applied, "database migrations complete");

        let pool = DbPool::new(
            PoolConfig::new(database_url).with_max_size(settings.pool_max_size()),
        )
        .await
        .map_err(std::io::Error::other)?;
        config = config.with_db_pool(pool);
    } else {
        warn!("CREDX_DATABASE_URL not set; serving fixture data");
    }

    #[cfg(feature = "metrics")]
    let config = config.with_metrics(server::make_metrics());

    let health_state = web::Data::new(HealthState::new());
    info!(%bind_addr, "starting server");
    create_server(health_state, config)?.await
}
