//! Errors raised while formatting or emitting log records.
//!
//! None of these variants carry message content, so reporting one can never
//! leak the record it was raised for.

use pd_redact::RedactionError;
use thiserror::Error;

/// Errors from the redacting log pipeline.
#[derive(Error, Debug)]
pub enum LogError {
    /// A message argument failed to format. The record is dropped.
    #[error("failed to render log message")]
    Render(#[from] std::fmt::Error),

    /// A line template is malformed.
    #[error("invalid log template: {0}")]
    Template(String),

    /// Redaction rules could not be built.
    #[error("redaction setup failed: {0}")]
    Redaction(#[from] RedactionError),

    /// Writing to the sink failed.
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    /// The diagnostics subscriber could not be installed.
    #[error("logging init failed: {0}")]
    Init(String),
}
