//! Shared test helpers for storage module tests.
//!
//! This module provides common utilities for database setup and test data creation
//! used across storage and reconciler tests.

#[cfg(test)]
use sqlx::{Row, SqlitePool};

#[cfg(test)]
use crate::storage::run_migrations;

/// Creates a test database pool with migrations applied.
/// Uses an in-memory database for fast test execution.
#[cfg(test)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Inserts a hosting provider.
#[cfg(test)]
pub async fn insert_test_provider(
    pool: &SqlitePool,
    id: i64,
    name: &str,
    website: &str,
    partner: Option<&str>,
) {
    sqlx::query("INSERT INTO hostingproviders (id, naam, website, partner) VALUES (?, ?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(website)
        .bind(partner)
        .execute(pool)
        .await
        .expect("Failed to insert test provider");
}

/// A greencheck row as read back from the database.
#[cfg(test)]
#[derive(Debug)]
pub struct StoredGreencheck {
    pub hosting_provider_id: Option<i64>,
    pub ip_range_id: Option<i64>,
    pub date: String,
    pub green: String,
    pub ip: String,
    pub tld: String,
    pub match_type: Option<String>,
    pub url: String,
}

#[cfg(test)]
pub async fn fetch_greencheck(pool: &SqlitePool, id: i64) -> StoredGreencheck {
    let row = sqlx::query(
        "SELECT id_hp, id_greencheck, datum, green, ip, tld, type, url FROM greencheck WHERE id = ?",
    )
    .bind(id)
    .fetch_one(pool)
    .await
    .expect("Failed to fetch greencheck row");
    StoredGreencheck {
        hosting_provider_id: row.get("id_hp"),
        ip_range_id: row.get("id_greencheck"),
        date: row.get("datum"),
        green: row.get("green"),
        ip: row.get("ip"),
        tld: row.get("tld"),
        match_type: row.get("type"),
        url: row.get("url"),
    }
}

#[cfg(test)]
pub async fn count_greenchecks(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM greencheck")
        .fetch_one(pool)
        .await
        .expect("Failed to count greencheck rows")
}

#[cfg(test)]
pub async fn count_green_domains(pool: &SqlitePool) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM greendomain")
        .fetch_one(pool)
        .await
        .expect("Failed to count greendomain rows")
}
