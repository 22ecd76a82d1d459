// storage/migrations.rs
// Database migration management

use sqlx::{Pool, Sqlite};

/// Runs the SQLx migrations from `migrations/`, embedded at compile time so
/// the binary does not depend on the source tree.
///
/// Creates the provider, greencheck log, and green domain tables.
pub async fn run_migrations(pool: &Pool<Sqlite>) -> Result<(), anyhow::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
