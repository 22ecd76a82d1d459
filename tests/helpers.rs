// Shared test helpers for building messages and seeding databases.
//
// Integration tests cannot reach the crate's private builders, so the small
// serializer used to produce legacy messages lives here.

use sqlx::SqlitePool;
use std::path::Path;

use greencheck_ingest::config::DEFAULT_NAMESPACE;
use greencheck_ingest::{init_db_pool_with_path, run_migrations};

pub fn php_str(value: &str) -> String {
    format!("s:{}:\"{}\";", value.len(), value)
}

pub fn php_int(value: i64) -> String {
    format!("i:{value};")
}

pub fn php_bool(value: bool) -> String {
    format!("b:{};", u8::from(value))
}

fn php_entries(entries: &[(String, String)]) -> String {
    entries
        .iter()
        .map(|(k, v)| format!("{}{}", php_str(k), v))
        .collect()
}

pub fn php_array(entries: &[(&str, String)]) -> String {
    let owned: Vec<(String, String)> = entries
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect();
    format!("a:{}:{{{}}}", owned.len(), php_entries(&owned))
}

pub fn php_object(class: &str, entries: &[(String, String)]) -> String {
    format!(
        "O:{}:\"{}\":{}:{{{}}}",
        class.len(),
        class,
        entries.len(),
        php_entries(entries)
    )
}

pub fn php_datetime(date: &str) -> String {
    php_object(
        "DateTime",
        &[
            ("date".to_string(), php_str(date)),
            ("timezone_type".to_string(), php_int(3)),
            ("timezone".to_string(), php_str("UTC")),
        ],
    )
}

/// Builder for one legacy sitecheck message.
#[derive(Debug, Clone)]
pub struct SitecheckMessage {
    pub url: Option<String>,
    pub ip: String,
    pub green: bool,
    pub provider_id: Option<i64>,
    pub match_type: Option<(&'static str, i64)>,
    pub checked_at: Option<String>,
}

impl SitecheckMessage {
    /// A green check of `url` hosted by `provider_id`, matched by IP range 7.
    pub fn green(url: &str, provider_id: i64) -> Self {
        Self {
            url: Some(url.to_string()),
            ip: "203.0.113.5".to_string(),
            green: true,
            provider_id: Some(provider_id),
            match_type: Some(("ip", 7)),
            checked_at: Some("2019-11-14 10:00:00.000000".to_string()),
        }
    }

    /// A grey check of `url` with no provider.
    pub fn grey(url: &str) -> Self {
        Self {
            green: false,
            provider_id: None,
            match_type: None,
            ..Self::green(url, 0)
        }
    }

    pub fn checked_at(mut self, date: &str) -> Self {
        self.checked_at = Some(date.to_string());
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let key = |field: &str| format!("\0{DEFAULT_NAMESPACE}\0{field}");
        let mut fields = vec![(key("ip"), php_str(&self.ip))];
        if let Some(url) = &self.url {
            fields.push((key("checkedUrl"), php_str(url)));
        }
        fields.push((key("data"), php_bool(true)));
        fields.push((key("green"), php_bool(self.green)));
        fields.push((key("cached"), php_bool(false)));
        fields.push((
            key("idHostingProvider"),
            self.provider_id.map_or_else(|| "N;".to_string(), php_int),
        ));
        let match_type = match self.match_type {
            Some((label, id)) => php_array(&[("type", php_str(label)), ("id", php_int(id))]),
            None => php_array(&[("type", "N;".to_string()), ("id", "N;".to_string())]),
        };
        fields.push((key("matchtype"), match_type));
        if let Some(date) = &self.checked_at {
            fields.push((key("checkedAt"), php_datetime(date)));
        }

        php_array(&[("result", php_object(DEFAULT_NAMESPACE, &fields))]).into_bytes()
    }
}

/// Opens a file-backed database with migrations applied.
#[allow(dead_code)] // Not every test file seeds a database up front
pub async fn create_test_pool_with_path(db_path: &Path) -> SqlitePool {
    let pool = init_db_pool_with_path(db_path)
        .await
        .expect("Failed to open test database");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

/// Creates an in-memory database with migrations applied.
#[allow(dead_code)]
pub async fn create_test_pool() -> SqlitePool {
    let pool = SqlitePool::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database pool");
    run_migrations(&pool)
        .await
        .expect("Failed to run migrations");
    pool
}

#[allow(dead_code)]
pub async fn insert_provider(pool: &SqlitePool, id: i64, name: &str, website: &str) {
    sqlx::query("INSERT INTO hostingproviders (id, naam, website) VALUES (?, ?, ?)")
        .bind(id)
        .bind(name)
        .bind(website)
        .execute(pool)
        .await
        .expect("Failed to insert provider");
}

#[allow(dead_code)]
pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .expect("Failed to count rows")
}
