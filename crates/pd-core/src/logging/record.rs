//! Log records and severity levels.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};

/// Severity of a log record, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Uppercase level name as it appears in formatted lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARNING",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE => Level::Trace,
            tracing::Level::DEBUG => Level::Debug,
            tracing::Level::INFO => Level::Info,
            tracing::Level::WARN => Level::Warn,
            tracing::Level::ERROR => Level::Error,
        }
    }
}

/// One pending log entry.
///
/// The message starts out as unrendered format arguments. A formatter may
/// replace it with a rewritten string via [`LogRecord::set_message`]; from then
/// on [`LogRecord::rendered_message`] returns the rewritten text.
#[derive(Debug)]
pub struct LogRecord<'a> {
    name: &'a str,
    level: Level,
    timestamp: DateTime<Local>,
    args: fmt::Arguments<'a>,
    message: Option<String>,
}

impl<'a> LogRecord<'a> {
    /// Create a record stamped with the current local time.
    pub fn new(name: &'a str, level: Level, args: fmt::Arguments<'a>) -> Self {
        Self {
            name,
            level,
            timestamp: Local::now(),
            args,
            message: None,
        }
    }

    /// Override the emission timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Local>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Name of the logger that emitted the record.
    pub fn name(&self) -> &str {
        self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// The fully interpolated message.
    ///
    /// Fails if one of the arguments' formatting implementations fails.
    pub fn rendered_message(&self) -> Result<String, fmt::Error> {
        if let Some(message) = &self.message {
            return Ok(message.clone());
        }
        let mut out = String::new();
        out.write_fmt(self.args)?;
        Ok(out)
    }

    /// Replace the message payload.
    pub fn set_message(&mut self, message: String) {
        self.message = Some(message);
    }

    /// Whether the payload has been rewritten.
    pub fn is_rewritten(&self) -> bool {
        self.message.is_some()
    }
}
