// storage/mod.rs
// Database operations module

pub mod green_domain;
pub mod greencheck;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod provider;
#[cfg(test)]
pub mod test_helpers;

// Re-export commonly used items
pub use green_domain::{find_green_domain, upsert_green_domain};
pub use greencheck::insert_greencheck;
pub use migrations::run_migrations;
pub use models::{GreenDomain, GreenFlag, HostingProvider, NewGreencheck};
pub use pool::init_db_pool_with_path;
pub use provider::find_provider;
