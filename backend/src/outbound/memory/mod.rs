//! Process-local store adapters.
//!
//! Each store keeps its records behind one `tokio::sync::RwLock`, so every
//! operation is a single lock acquisition. The series and measurement stores
//! share that lock, so series references are checked and written atomically.
//! Data lives for the lifetime of the process only. The server falls back to
//! these stores when no database URL is configured; tests use them to
//! exercise handlers without I/O.

mod measurements;
mod series;
mod tables;
mod users;

pub use measurements::InMemoryMeasurementRepository;
pub use series::InMemorySeriesRepository;
pub use users::InMemoryUserRepository;
