//! Measurement recording backend.
//!
//! Series, measurements and users are kept behind domain ports with
//! PostgreSQL and in-memory adapters. The HTTP adapter exposes CRUD routes
//! and a paginated, time-windowed measurement query.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
