//! Application initialization.
//!
//! Sets up the process-wide resources the ingest run depends on: the logger
//! and the field schema messages are decoded against.

mod logger;

use crate::config::Config;
use crate::extract::{FieldSchema, SchemaError};

pub use logger::init_logger_with;

/// Builds the field schema for the configured property namespace.
///
/// # Errors
///
/// Returns `SchemaError` when the namespace cannot produce distinct property
/// keys (empty, or containing a NUL byte).
pub fn init_schema(config: &Config) -> Result<FieldSchema, SchemaError> {
    FieldSchema::new(&config.namespace)
}
