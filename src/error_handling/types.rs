//! Error type definitions.
//!
//! This module defines the error types raised while ingesting a message and
//! the categories they are counted under.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

use crate::decode::DecodeError;
use crate::domain::ClassifyError;
use crate::extract::ExtractError;
use crate::sitecheck::MissingFieldError;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// Error types for database operations.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error creating the database file.
    #[error("Database file creation error: {0}")]
    FileCreationError(String),

    /// SQL execution error.
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

/// Any failure that ends processing of one message.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("extraction failed: {0}")]
    Extract(#[from] ExtractError),

    #[error("invalid record: {0}")]
    MissingField(#[from] MissingFieldError),

    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),

    #[error("storage failed: {0}")]
    Database(#[from] DatabaseError),
}

impl ProcessError {
    /// Category this error is counted under.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ProcessError::Decode(_) => ErrorType::DecodeError,
            ProcessError::Extract(ExtractError::Coercion { .. }) => ErrorType::CoercionError,
            ProcessError::Extract(ExtractError::Timestamp { .. }) => ErrorType::TimestampError,
            ProcessError::MissingField(_) => ErrorType::MissingFieldError,
            ProcessError::Classify(ClassifyError::NotADomain(_)) => {
                ErrorType::ClassificationRejected
            }
            ProcessError::Classify(ClassifyError::Transient(_)) => {
                ErrorType::ClassificationTransientError
            }
            ProcessError::Database(_) => ErrorType::StorageError,
        }
    }
}

/// Types of errors that can end processing of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Input
    MessageReadError,
    // Decoding and extraction
    DecodeError,
    CoercionError,
    TimestampError,
    MissingFieldError,
    // Classification
    ClassificationRejected,
    ClassificationTransientError,
    // Storage
    StorageError,
}

/// Types of informational metrics recorded while processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    GreenDomainCreated,
    GreenDomainUpdated,
    ProviderNotFound,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MessageReadError => "Message read error",
            ErrorType::DecodeError => "Decode error",
            ErrorType::CoercionError => "Field coercion error",
            ErrorType::TimestampError => "Timestamp error",
            ErrorType::MissingFieldError => "Missing required field",
            ErrorType::ClassificationRejected => "Not a domain or IP address",
            ErrorType::ClassificationTransientError => "Domain lookup error",
            ErrorType::StorageError => "Storage error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::GreenDomainCreated => "Green domain created",
            InfoType::GreenDomainUpdated => "Green domain updated",
            InfoType::ProviderNotFound => "Hosting provider not found",
        }
    }
}
