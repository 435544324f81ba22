//! Database connection manager backed by an r2d2 SQLite pool.

use std::path::{Path, PathBuf};

use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::params;
use slotwise_domain::{DatabaseConfig, Result, SlotwiseError};
use tracing::info;

use crate::errors::InfraError;

const SCHEMA_VERSION: i32 = 1;
const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Pooled connection handed out by [`DbManager`].
pub type SqliteConnection = PooledConnection<SqliteConnectionManager>;

/// Database manager that wraps an r2d2 pool.
pub struct DbManager {
    pool: Pool<SqliteConnectionManager>,
    path: PathBuf,
}

impl DbManager {
    /// Open (or create) the database file with `pool_size` connections.
    pub fn new<P: AsRef<Path>>(db_path: P, pool_size: u32) -> Result<Self> {
        let path = db_path.as_ref().to_path_buf();

        let manager = SqliteConnectionManager::file(&path).with_init(|conn| {
            conn.execute_batch(
                "PRAGMA journal_mode = WAL;
                 PRAGMA busy_timeout = 5000;
                 PRAGMA foreign_keys = ON;",
            )
        });
        let pool = Pool::builder()
            .max_size(pool_size.max(1))
            .build(manager)
            .map_err(|e| SlotwiseError::from(InfraError::from(e)))?;

        info!(
            db_path = %path.display(),
            max_connections = pool.max_size(),
            "sqlite pool initialised"
        );

        Ok(Self { pool, path })
    }

    /// Open the pool described by `config`.
    pub fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::new(&config.path, config.pool_size)
    }

    /// Acquire a connection from the pool.
    pub fn get_connection(&self) -> Result<SqliteConnection> {
        self.pool.get().map_err(|e| SlotwiseError::from(InfraError::from(e)))
    }

    /// Ensure the full schema exists on the current database.
    pub fn run_migrations(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.execute_batch(SCHEMA_SQL).map_err(map_sql_error)?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version, applied_at)
             VALUES (?1, CAST(strftime('%s','now') AS INTEGER))",
            params![SCHEMA_VERSION],
        )
        .map_err(map_sql_error)?;
        Ok(())
    }

    /// Path of the database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Verify the database is reachable and answering queries.
    pub fn health_check(&self) -> Result<()> {
        let conn = self.get_connection()?;
        conn.query_row("SELECT 1", params![], |row| row.get::<_, i32>(0)).map_err(map_sql_error)?;
        Ok(())
    }
}

pub(crate) fn map_sql_error(err: rusqlite::Error) -> SlotwiseError {
    SlotwiseError::from(InfraError::from(err))
}
