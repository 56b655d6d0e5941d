//! Logger construction and lookup by name.
//!
//! A [`LoggerRegistry`] is created once by the program's entry point and
//! passed to whatever needs to log. It builds each logger the same way: level
//! INFO, one sink, one [`RedactingFormatter`] over the PII field set, and no
//! propagation. Asking for a name twice returns the same logger.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use pd_redact::{pii_fields, FieldSet};

use super::{Level, LogError, Logger, RedactingFormatter, Sink};

/// Name of the logger used for user rows.
pub const DEFAULT_LOGGER_NAME: &str = "user_data";

type SinkFactory = Box<dyn Fn(&str) -> Sink + Send + Sync>;

/// Name-keyed cache of redacting loggers.
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    fields: FieldSet,
    level: Level,
    sink_factory: SinkFactory,
}

impl LoggerRegistry {
    /// Registry whose loggers write to stderr.
    pub fn new() -> Self {
        Self::with_sink_factory(|_| Sink::stderr())
    }

    /// Registry whose loggers get their sink from `factory`, called once per
    /// logger name.
    pub fn with_sink_factory<F>(factory: F) -> Self
    where
        F: Fn(&str) -> Sink + Send + Sync + 'static,
    {
        Self {
            loggers: RwLock::new(HashMap::new()),
            fields: pii_fields(),
            level: Level::Info,
            sink_factory: Box::new(factory),
        }
    }

    /// Return the logger called `name`, creating it on first use.
    pub fn get_logger(&self, name: &str) -> Result<Arc<Logger>, LogError> {
        if let Some(logger) = self.get(name) {
            return Ok(logger);
        }

        let logger = {
            let mut loggers = self.loggers.write().unwrap_or_else(PoisonError::into_inner);
            if let Some(logger) = loggers.get(name) {
                return Ok(Arc::clone(logger));
            }

            let formatter = RedactingFormatter::new(self.fields.clone())?;
            let logger = Arc::new(Logger::new(
                name,
                self.level,
                (self.sink_factory)(name),
                formatter,
            ));
            loggers.insert(name.to_string(), Arc::clone(&logger));
            logger
        };

        // Emitted after the write lock is released: subscriber layers read
        // this registry.
        tracing::debug!(logger = name, fields = self.fields.len(), "created redacting logger");
        Ok(logger)
    }

    /// The logger for user rows.
    pub fn default_logger(&self) -> Result<Arc<Logger>, LogError> {
        self.get_logger(DEFAULT_LOGGER_NAME)
    }

    /// Look up an existing logger without creating one.
    pub fn get(&self, name: &str) -> Option<Arc<Logger>> {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Whether a logger called `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(name)
    }

    /// Names of all created loggers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .loggers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("names", &self.names())
            .field("fields", &self.fields)
            .field("level", &self.level)
            .finish_non_exhaustive()
    }
}
