//! Choose store adapters for the HTTP state.

use std::sync::Arc;

use actix_web::web;
use mockable::DefaultClock;
use tracing::{info, warn};

use measurement_backend::inbound::http::state::HttpState;
use measurement_backend::outbound::memory::{InMemorySeriesRepository, InMemoryUserRepository};
use measurement_backend::outbound::persistence::{
    DieselMeasurementRepository, DieselSeriesRepository, DieselUserRepository,
};

use super::ServerConfig;

/// PostgreSQL stores when a pool is configured, process-local ones otherwise.
pub(crate) fn build_http_state(config: &ServerConfig) -> web::Data<HttpState> {
    let clock = Arc::new(DefaultClock);
    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL stores");
            HttpState::from_repositories(
                Arc::new(DieselSeriesRepository::new(pool.clone())),
                Arc::new(DieselMeasurementRepository::new(pool.clone())),
                Arc::new(DieselUserRepository::new(pool.clone())),
                clock,
            )
        }
        None => {
            warn!("no database configured; data will not outlive the process");
            let series = InMemorySeriesRepository::default();
            let measurements = series.measurements();
            HttpState::from_repositories(
                Arc::new(series),
                Arc::new(measurements),
                Arc::new(InMemoryUserRepository::default()),
                clock,
            )
        }
    };
    web::Data::new(state)
}
