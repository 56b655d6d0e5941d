//! Read user rows and log each one through a redacting logger.
//!
//! Every row becomes a single INFO record of the form
//! `name=Bob; email=bob@x.io; ip=10.0.0.1;`, so PII columns are masked by the
//! logger's formatter before anything reaches the sink. Diagnostics about the
//! run carry row counts only.

mod config;
mod error;
mod source;

pub use config::{DbConfig, ENV_DB_HOST, ENV_DB_NAME, ENV_DB_PASSWORD, ENV_DB_USERNAME};
pub use error::{IngestError, Result};
pub use source::{render_value, Row, RowSource, SqliteSource};

use std::fmt::Write as _;
use std::sync::Arc;

use tracing::{debug, info};

use crate::logging::Logger;

/// Query used when none is given.
pub const DEFAULT_QUERY: &str = "SELECT * FROM users;";

/// Render a row as `col=val; ` pieces, trimmed.
pub fn format_row(row: &Row) -> String {
    let mut out = String::new();
    for (column, value) in row.iter() {
        // Writing into a String cannot fail.
        let _ = write!(out, "{}={}; ", column, value);
    }
    out.trim().to_string()
}

/// Outcome of one ingest run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestStats {
    pub rows: usize,
}

/// Streams rows from a [`RowSource`] into a logger.
#[derive(Debug, Clone)]
pub struct RowIngestor {
    logger: Arc<Logger>,
}

impl RowIngestor {
    pub fn new(logger: Arc<Logger>) -> Self {
        Self { logger }
    }

    pub fn logger(&self) -> &Arc<Logger> {
        &self.logger
    }

    /// Run `query` against `source` and log one INFO record per row.
    ///
    /// Stops at the first source or sink error; rows logged before it stay
    /// logged.
    pub fn ingest(&self, source: &mut dyn RowSource, query: &str) -> Result<IngestStats> {
        info!(logger = self.logger.name(), "ingest started");
        debug!(query, "running query");

        let logger = &self.logger;
        let rows = source.for_each_row(query, &mut |row| {
            logger.info(format_args!("{}", format_row(&row)))?;
            Ok(())
        })?;

        info!(rows, "ingest finished");
        Ok(IngestStats { rows })
    }
}
