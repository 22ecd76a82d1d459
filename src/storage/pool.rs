//! Database connection pool management.
//!
//! This module initializes and configures the SQLite connection pool with:
//! - WAL mode enabled so several ingest workers can share one database file
//! - A busy timeout so concurrent writers wait instead of failing immediately
//! - Automatic database file creation

use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use log::{debug, error, info};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;

/// How long a connection waits on a locked database before giving up.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Initializes and returns a database connection pool for `db_path`.
///
/// Creates the database file if it doesn't exist. Every pooled connection
/// uses WAL mode and the busy timeout.
pub async fn init_db_pool_with_path(db_path: &Path) -> Result<SqlitePool, DatabaseError> {
    let db_path_str = db_path.to_string_lossy().to_string();
    match OpenOptions::new()
        .read(true)
        .write(true)
        .create_new(true)
        .open(&db_path_str)
    {
        Ok(_) => info!("Database file {} created.", db_path_str),
        Err(ref e) if e.kind() == ErrorKind::AlreadyExists => {
            debug!("Database file {} already exists.", db_path_str)
        }
        Err(e) => {
            error!("Failed to create database file: {e}");
            return Err(DatabaseError::FileCreationError(e.to_string()));
        }
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path_str))
        .map_err(DatabaseError::SqlError)?
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePool::connect_with(options).await.map_err(|e| {
        error!("Failed to connect to database: {e}");
        DatabaseError::SqlError(e)
    })?;

    Ok(pool)
}
