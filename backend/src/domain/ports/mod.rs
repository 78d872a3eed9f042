//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`*Repository`) describe the stores. Driving ports
//! (`*Command`, `*Query`) are what inbound adapters call.

mod macros;
pub(crate) use macros::define_port_error;

mod measurement_command;
mod measurement_query;
mod measurement_repository;
mod series_command;
mod series_query;
mod series_repository;
mod user_command;
mod user_query;
mod user_repository;

#[cfg(test)]
pub use measurement_command::MockMeasurementCommand;
pub use measurement_command::{CreateMeasurementRequest, MeasurementCommand};
#[cfg(test)]
pub use measurement_query::MockMeasurementQuery;
pub use measurement_query::MeasurementQuery;
#[cfg(test)]
pub use measurement_repository::MockMeasurementRepository;
pub use measurement_repository::{MeasurementRepository, MeasurementRepositoryError};
#[cfg(test)]
pub use series_command::MockSeriesCommand;
pub use series_command::{CreateSeriesRequest, SeriesCommand};
#[cfg(test)]
pub use series_query::MockSeriesQuery;
pub use series_query::SeriesQuery;
#[cfg(test)]
pub use series_repository::MockSeriesRepository;
pub use series_repository::{SeriesRepository, SeriesRepositoryError};
#[cfg(test)]
pub use user_command::MockUserCommand;
pub use user_command::UserCommand;
#[cfg(test)]
pub use user_query::MockUserQuery;
pub use user_query::UserQuery;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
