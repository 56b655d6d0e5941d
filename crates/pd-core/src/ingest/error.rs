//! Ingestion errors.

use thiserror::Error;

use crate::logging::LogError;

/// Errors from reading rows and logging them.
#[derive(Error, Debug)]
pub enum IngestError {
    /// The row source failed to open, prepare or step a query.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A row could not be written through the redacting logger.
    #[error("log error: {0}")]
    Log(#[from] LogError),

    /// Connection settings are unusable.
    #[error("configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, IngestError>;
