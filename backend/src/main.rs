//! Backend entry-point: loads settings, wires stores and serves the API.

mod server;

use actix_web::web;
#[cfg(feature = "metrics")]
use actix_web_prom::PrometheusMetricsBuilder;
use color_eyre::eyre::{Result, WrapErr as _};
use ortho_config::OrthoConfig as _;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use measurement_backend::inbound::http::health::HealthState;
use measurement_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use measurement_backend::settings::ServerSettings;
use server::{ServerConfig, create_server};

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

    let settings = ServerSettings::load().wrap_err("failed to load server settings")?;
    let bind_addr = settings
        .bind_addr()
        .wrap_err("invalid MEASUREMENT_BIND_ADDR")?;
    let mut config = ServerConfig::new(bind_addr);

    if let Some(database_url) = settings.database_url() {
        if settings.run_migrations() {
            let applied = run_pending_migrations(database_url)
                .await
                .wrap_err("database migrations failed")?;
            info!(?applied, "schema up to date");
        }
        let pool_config =
            PoolConfig::new(database_url).with_max_size(settings.db_max_connections());
        let pool = DbPool::new(pool_config)
            .await
            .wrap_err("failed to build database pool")?;
        config = config.with_db_pool(pool);
    }

    #[cfg(feature = "metrics")]
    {
        let prometheus = PrometheusMetricsBuilder::new("measurement")
            .registry(prometheus::Registry::new())
            .endpoint("/metrics")
            .build()
            .map_err(|err| color_eyre::eyre::eyre!("configure Prometheus metrics: {err}"))?;
        config = config.with_metrics(prometheus);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)
        .wrap_err_with(|| format!("failed to bind {bind_addr}"))?;
    health_state.mark_ready();
    info!(%bind_addr, "measurement backend listening");
    server.await.wrap_err("server terminated")
}
