//! Hosting provider lookups.

use sqlx::{Row, SqlitePool};

use crate::error_handling::DatabaseError;
use crate::storage::models::HostingProvider;

/// Finds a hosting provider by id.
///
/// Returns `Ok(None)` when no provider has that id.
pub async fn find_provider(
    pool: &SqlitePool,
    id: i64,
) -> Result<Option<HostingProvider>, DatabaseError> {
    let row = sqlx::query("SELECT id, naam, website, partner FROM hostingproviders WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .map_err(DatabaseError::SqlError)?;

    Ok(row.map(|row| HostingProvider {
        id: row.get("id"),
        name: row.get("naam"),
        website: row.get("website"),
        partner: row.get("partner"),
    }))
}
