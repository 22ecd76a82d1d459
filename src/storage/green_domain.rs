//! Green domain cache reads and writes.
//!
//! One row per url, recording the latest green sighting of that url. Rows are
//! created or overwritten, never deleted.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::GreenDomain;

/// Looks up the cache row for `url`.
pub async fn find_green_domain(
    pool: &SqlitePool,
    url: &str,
) -> Result<Option<GreenDomain>, DatabaseError> {
    let row = sqlx::query(
        "SELECT url, hosted_by, hosted_by_id, hosted_by_website, partner, modified, green
         FROM greendomain WHERE url = ?",
    )
    .bind(url)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(row.map(|row| GreenDomain {
        url: row.get("url"),
        hosted_by: row.get("hosted_by"),
        hosted_by_id: row.get("hosted_by_id"),
        hosted_by_website: row.get("hosted_by_website"),
        partner: row.get("partner"),
        modified: row.get("modified"),
        green: row.get("green"),
    }))
}

/// Creates the cache row for `domain.url`, or replaces every field of the
/// existing one.
///
/// The conflict clause makes concurrent writers for the same url converge on
/// the last write instead of failing on the unique index.
pub async fn upsert_green_domain(
    pool: &SqlitePool,
    domain: &GreenDomain,
) -> Result<(), DatabaseError> {
    sqlx::query(
        "INSERT INTO greendomain (url, hosted_by, hosted_by_id, hosted_by_website, partner, modified, green)
         VALUES (?, ?, ?, ?, ?, ?, ?)
         ON CONFLICT(url) DO UPDATE SET
             hosted_by=excluded.hosted_by,
             hosted_by_id=excluded.hosted_by_id,
             hosted_by_website=excluded.hosted_by_website,
             partner=excluded.partner,
             modified=excluded.modified,
             green=excluded.green",
    )
    .bind(&domain.url)
    .bind(&domain.hosted_by)
    .bind(domain.hosted_by_id)
    .bind(&domain.hosted_by_website)
    .bind(&domain.partner)
    .bind(&domain.modified)
    .bind(domain.green)
    .execute(pool)
    .await
    .map_err(DatabaseError::SqlError)?;

    Ok(())
}
