//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use mockable::Clock;

use crate::domain::ports::{
    MeasurementCommand, MeasurementQuery, MeasurementRepository, SeriesCommand, SeriesQuery,
    SeriesRepository, UserCommand, UserQuery, UserRepository,
};
use crate::domain::{MeasurementService, SeriesService, UserService};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub series: Arc<dyn SeriesCommand>,
    pub series_query: Arc<dyn SeriesQuery>,
    pub measurements: Arc<dyn MeasurementCommand>,
    pub measurements_query: Arc<dyn MeasurementQuery>,
    pub users: Arc<dyn UserCommand>,
    pub users_query: Arc<dyn UserQuery>,
}

impl HttpState {
    /// Wire the domain services over the given stores.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use measurement_backend::inbound::http::state::HttpState;
    /// use measurement_backend::outbound::memory::{
    ///     InMemorySeriesRepository, InMemoryUserRepository,
    /// };
    /// use mockable::DefaultClock;
    ///
    /// let series = InMemorySeriesRepository::default();
    /// let measurements = series.measurements();
    /// let state = HttpState::from_repositories(
    ///     Arc::new(series),
    ///     Arc::new(measurements),
    ///     Arc::new(InMemoryUserRepository::default()),
    ///     Arc::new(DefaultClock),
    /// );
    /// let _series = state.series_query.clone();
    /// ```
    pub fn from_repositories<S, M, U>(
        series: Arc<S>,
        measurements: Arc<M>,
        users: Arc<U>,
        clock: Arc<dyn Clock>,
    ) -> Self
    where
        S: SeriesRepository + 'static,
        M: MeasurementRepository + 'static,
        U: UserRepository + 'static,
    {
        let series_service = Arc::new(SeriesService::new(
            Arc::clone(&series),
            Arc::clone(&measurements),
            Arc::clone(&clock),
        ));
        let measurement_service = Arc::new(MeasurementService::new(
            measurements,
            series,
            Arc::clone(&clock),
        ));
        let user_service = Arc::new(UserService::new(users, clock));

        Self {
            series: series_service.clone(),
            series_query: series_service,
            measurements: measurement_service.clone(),
            measurements_query: measurement_service,
            users: user_service.clone(),
            users_query: user_service,
        }
    }
}
