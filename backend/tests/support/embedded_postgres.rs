//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! A [`PgHarness`] owns a private cluster whose schema comes from the crate's
//! own embedded migrations, a pool over it, and the tokio runtime that drives
//! the async adapters. Binaries are installed once under `target/pg-embed`;
//! every cluster gets its own data directory so suites can run in parallel.
//!
//! Set `SKIP_TEST_CLUSTER=1` where PostgreSQL cannot start; without it a
//! bootstrap failure fails the test rather than hiding the breakage.
//!
//! PostgreSQL refuses to run as root. When the suites run with root
//! privileges, `pg-embed-setup-unpriv` requires `PG_EMBEDDED_WORKER` to name
//! a `pg_worker` helper binary that runs PostgreSQL as an unprivileged user.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use diesel::{Connection, PgConnection, RunQueryDsl};
use measurement_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::TestCluster;
use tokio::runtime::Runtime;
use uuid::Uuid;

/// Database created by `initdb`, used as the schema target.
const DATABASE: &str = "postgres";

static BOOTSTRAP_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn pg_embed_dir() -> PathBuf {
    if let Some(target_dir) = std::env::var_os("CARGO_TARGET_DIR") {
        return PathBuf::from(target_dir).join("pg-embed");
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("target")
        .join("pg-embed")
}

fn start_cluster() -> Result<TestCluster, String> {
    let _bootstrap = BOOTSTRAP_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|err| err.into_inner());

    let base = pg_embed_dir();
    let runtime_dir = std::env::var_os("PG_RUNTIME_DIR")
        .map_or_else(|| base.join("install"), PathBuf::from);
    let data_dir = base.join(format!("data-{}-{}", std::process::id(), Uuid::new_v4()));
    std::fs::create_dir_all(&runtime_dir).map_err(|err| err.to_string())?;
    std::fs::create_dir_all(&data_dir).map_err(|err| err.to_string())?;

    let _env = env_lock::lock_env([
        (
            "PG_RUNTIME_DIR",
            Some(runtime_dir.to_string_lossy().into_owned()),
        ),
        ("PG_DATA_DIR", Some(data_dir.to_string_lossy().into_owned())),
    ]);
    TestCluster::new().map_err(|err| format!("{err:?}"))
}

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// A migrated database plus the runtime used to drive it.
pub struct PgHarness {
    // Field order is drop order: the pool goes before its runtime, and both
    // before the cluster shuts down.
    pool: DbPool,
    runtime: Runtime,
    database_url: String,
    _cluster: TestCluster,
}

impl PgHarness {
    /// Boot a cluster, apply migrations and open a small pool.
    ///
    /// Must be called outside any tokio runtime.
    pub fn start() -> Result<Self, String> {
        let cluster = start_cluster()?;
        let database_url = cluster.connection().database_url(DATABASE).to_string();
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        runtime
            .block_on(run_pending_migrations(&database_url))
            .map_err(|err| err.to_string())?;
        let config = PoolConfig::new(database_url.as_str())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;
        Ok(Self {
            pool,
            runtime,
            database_url,
            _cluster: cluster,
        })
    }

    /// Handle to the pool for building repositories.
    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Drive `future` to completion on the harness runtime.
    pub fn run<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Run raw SQL outside the pool, e.g. to simulate schema loss.
    pub fn execute_sql(&self, sql: &str) {
        let mut conn = PgConnection::establish(&self.database_url).expect("direct connection");
        diesel::sql_query(sql)
            .execute(&mut conn)
            .expect("raw SQL executes");
    }
}

/// Start a harness, or return `None` when `SKIP_TEST_CLUSTER` allows it.
///
/// # Panics
///
/// Panics when the cluster cannot start and skipping is not enabled.
pub fn harness() -> Option<PgHarness> {
    match PgHarness::start() {
        Ok(harness) => Some(harness),
        Err(reason) if should_skip_test_cluster() => {
            eprintln!("SKIP-TEST-CLUSTER: {reason}");
            None
        }
        Err(reason) => {
            panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.")
        }
    }
}
