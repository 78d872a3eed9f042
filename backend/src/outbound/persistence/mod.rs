//! PostgreSQL store adapters built on Diesel.
//!
//! Repositories translate between Diesel rows and domain records and carry
//! no business rules. Rows (`models.rs`) and table definitions (`schema.rs`)
//! stay private to this module. Connections come from a `bb8` pool through
//! `diesel-async`; pool and Diesel failures are mapped to each port's error
//! type in `diesel_error_mapping`.
//!
//! # Example
//!
//! ```no_run
//! use measurement_backend::outbound::persistence::{
//!     DbPool, DieselSeriesRepository, PoolConfig,
//! };
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/measurements")).await?;
//! let series = DieselSeriesRepository::new(pool);
//! # let _ = series;
//! # Ok(())
//! # }
//! ```

mod diesel_error_mapping;
mod diesel_measurement_repository;
mod diesel_series_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_measurement_repository::DieselMeasurementRepository;
pub use diesel_series_repository::DieselSeriesRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
