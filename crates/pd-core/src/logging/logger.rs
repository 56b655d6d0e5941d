//! Named, leveled emitter with a single redacting handler.

use std::fmt;

use super::{Formatter, Level, LogError, LogRecord, RedactingFormatter, Sink};

/// A sink paired with the formatter installed on it.
#[derive(Debug)]
struct Handler {
    sink: Sink,
    formatter: RedactingFormatter,
}

/// Emits records through exactly one [`RedactingFormatter`] into one [`Sink`].
///
/// Loggers are built by [`super::LoggerRegistry`]. There is no parent logger
/// and no other handler, so every emitted line has been redacted.
#[derive(Debug)]
pub struct Logger {
    name: String,
    level: Level,
    handler: Handler,
}

impl Logger {
    pub(crate) fn new(
        name: impl Into<String>,
        level: Level,
        sink: Sink,
        formatter: RedactingFormatter,
    ) -> Self {
        Self {
            name: name.into(),
            level,
            handler: Handler { sink, formatter },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum severity this logger emits.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Records are never forwarded to another logger.
    pub fn propagate(&self) -> bool {
        false
    }

    /// The formatter installed on the sink.
    pub fn formatter(&self) -> &RedactingFormatter {
        &self.handler.formatter
    }

    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Emit a message at `level`.
    ///
    /// Records below the logger's level are discarded. If formatting fails,
    /// nothing is written and the error is returned.
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        if !self.enabled(level) {
            return Ok(());
        }
        let mut record = LogRecord::new(&self.name, level, args);
        self.emit(&mut record)
    }

    /// Format and write a prepared record.
    pub fn emit(&self, record: &mut LogRecord<'_>) -> Result<(), LogError> {
        let line = self.handler.formatter.format(record)?;
        self.handler.sink.write_line(&line)?;
        Ok(())
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Debug, args)
    }

    pub fn info(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Info, args)
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Warn, args)
    }

    pub fn error(&self, args: fmt::Arguments<'_>) -> Result<(), LogError> {
        self.log(Level::Error, args)
    }
}

/// Emit a formatted message through a [`Logger`].
///
/// Usage:
/// ```ignore
/// pd_log!(logger, Level::Info, "name={};email={};", name, email)?;
/// ```
#[macro_export]
macro_rules! pd_log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::SharedBuffer;
    use pd_redact::pii_fields;

    struct Failing;

    impl fmt::Display for Failing {
        fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
            Err(fmt::Error)
        }
    }

    fn buffered_logger() -> (SharedBuffer, Logger) {
        let buffer = SharedBuffer::new();
        let logger = Logger::new(
            "user_data",
            Level::Info,
            Sink::new(buffer.clone()),
            RedactingFormatter::new(pii_fields()).unwrap(),
        );
        (buffer, logger)
    }

    #[test]
    fn test_info_is_redacted() {
        let (buffer, logger) = buffered_logger();
        logger
            .info(format_args!("name={};email={};", "Ann", "ann@x.io"))
            .unwrap();
        let lines = buffer.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].starts_with("[HOLBERTON] user_data INFO "));
        assert!(lines[0].ends_with(": name=***;email=***;"));
    }

    #[test]
    fn test_below_level_is_discarded() {
        let (buffer, logger) = buffered_logger();
        logger.debug(format_args!("ssn=1;")).unwrap();
        assert!(buffer.contents().is_empty());
        assert!(!logger.enabled(Level::Debug));
        assert!(logger.enabled(Level::Error));
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let (buffer, logger) = buffered_logger();
        let err = logger
            .info(format_args!("name=Ann;password={};", Failing))
            .unwrap_err();
        assert!(matches!(err, LogError::Render(_)));
        assert!(buffer.contents().is_empty());
    }

    #[test]
    fn test_macro_emits() {
        let (buffer, logger) = buffered_logger();
        crate::pd_log!(logger, Level::Warn, "phone={};", "555").unwrap();
        assert!(buffer.contents().contains(" WARNING "));
        assert!(buffer.contents().contains("phone=***;"));
    }

    #[test]
    fn test_logger_metadata() {
        let (_buffer, logger) = buffered_logger();
        assert_eq!(logger.name(), "user_data");
        assert_eq!(logger.level(), Level::Info);
        assert!(!logger.propagate());
        assert_eq!(logger.formatter().fields(), &pii_fields());
    }
}
