//! Greencheck log insertion.
//!
//! The log is append-only: rows are inserted here and never updated or
//! deleted by the ingest worker.

use sqlx::SqlitePool;

use crate::error_handling::DatabaseError;
use crate::storage::models::NewGreencheck;

/// Appends one row to the greencheck log and returns its id.
pub async fn insert_greencheck(
    pool: &SqlitePool,
    row: &NewGreencheck<'_>,
) -> Result<i64, DatabaseError> {
    let result = sqlx::query(
        "INSERT INTO greencheck (id_hp, id_greencheck, datum, green, ip, tld, type, url)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(row.hosting_provider_id)
    .bind(row.ip_range_id)
    .bind(row.date)
    .bind(row.green.as_ref())
    .bind(row.ip)
    .bind(row.tld)
    .bind(row.match_type)
    .bind(row.url)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(result.last_insert_rowid())
}
