//! Helpers shared by the PostgreSQL integration suites.
//!
//! Each suite compiles as its own crate and pulls this module in with
//! `mod support;`, so not every suite uses every helper.

pub mod embedded_postgres;

pub use embedded_postgres::{PgHarness, harness};
