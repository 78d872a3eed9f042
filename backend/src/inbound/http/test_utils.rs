//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};
use mockable::MockClock;

use crate::Trace;
use crate::inbound::http::configure_api;
use crate::inbound::http::state::HttpState;
use crate::outbound::memory::{InMemorySeriesRepository, InMemoryUserRepository};

/// Instant reported by the clock of [`memory_state`].
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

/// HTTP state over fresh in-memory stores and a clock fixed at [`fixed_now`].
pub fn memory_state() -> HttpState {
    let mut clock = MockClock::new();
    clock.expect_utc().return_const(fixed_now());
    let series = InMemorySeriesRepository::default();
    let measurements = series.measurements();
    HttpState::from_repositories(
        Arc::new(series),
        Arc::new(measurements),
        Arc::new(InMemoryUserRepository::default()),
        Arc::new(clock),
    )
}

/// Application wired like the server, minus health and docs.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .configure(configure_api)
}
