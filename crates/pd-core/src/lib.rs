//! Personal Data Core Library
//!
//! This library provides:
//! - Redacting loggers that mask PII field values before writing
//! - Row ingestion from a database into the `user_data` logger
//! - Exit codes for CLI operations
//!
//! The binary entry point is in `main.rs`.

pub mod exit_codes;
pub mod ingest;
pub mod logging;
