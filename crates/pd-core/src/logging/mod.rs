//! Redacting loggers and diagnostics setup for pd-core.
//!
//! Two kinds of output share stderr:
//! - Records on named loggers (e.g. `user_data`), rendered with the
//!   `[HOLBERTON] name LEVEL time: message` template after every PII field
//!   value has been masked
//! - pd-core's own diagnostics through `tracing`, which never carry row
//!   content
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use pd_core::logging::{init_logging, LogConfig, LoggerRegistry};
//!
//! let registry = Arc::new(LoggerRegistry::new());
//! let logger = registry.default_logger()?;
//! init_logging(&LogConfig::from_env(None), Arc::clone(&registry))?;
//!
//! logger.info(format_args!("name={};email={};", name, email))?;
//! tracing::info!(target: "user_data", "ssn={};", ssn);
//! ```
//!
//! Events sent with a registered logger name as their target go through
//! that logger and are left out of the diagnostics output.

pub mod config;
pub mod error;
pub mod formatter;
pub mod layer;
pub mod logger;
pub mod record;
pub mod registry;
pub mod sink;

pub use config::{LogConfig, LogLevel};
pub use error::LogError;
pub use formatter::{Formatter, RedactingFormatter, TemplateFormatter, FORMAT, TIMESTAMP_FORMAT};
pub use layer::RedactingLayer;
pub use logger::Logger;
pub use record::{Level, LogRecord};
pub use registry::{LoggerRegistry, DEFAULT_LOGGER_NAME};
pub use sink::{SharedBuffer, Sink};

use std::io::IsTerminal;
use std::sync::Arc;

use tracing::Subscriber;
use tracing_subscriber::filter::filter_fn;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Diagnostics filter directive for a level, used when RUST_LOG is unset.
fn default_directive(config: &LogConfig) -> String {
    format!("pd_core={}", config.level)
}

/// Human-readable diagnostics layer writing to `writer`.
///
/// Drops every event whose target names a logger in `registry`, then applies
/// `filter`.
fn diagnostics_layer<S, W>(
    config: &LogConfig,
    registry: Arc<LoggerRegistry>,
    filter: EnvFilter,
    writer: W,
    ansi: bool,
) -> Box<dyn Layer<S> + Send + Sync>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let not_routed = filter_fn(move |metadata| !registry.contains(metadata.target()));

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(ansi);

    if config.timestamps {
        fmt_layer
            .with_filter(not_routed)
            .with_filter(filter)
            .boxed()
    } else {
        fmt_layer
            .without_time()
            .with_filter(not_routed)
            .with_filter(filter)
            .boxed()
    }
}

/// Install the process-wide subscriber.
///
/// Events targeting a logger in `registry` are handed to [`RedactingLayer`];
/// everything else goes to a human-readable stderr layer filtered by
/// RUST_LOG (or `pd_core=<level>`). Register loggers before calling this if
/// their names should be excluded from diagnostics from the first event.
pub fn init_logging(config: &LogConfig, registry: Arc<LoggerRegistry>) -> Result<(), LogError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(config)));
    let use_ansi = std::io::stderr().is_terminal();

    tracing_subscriber::registry()
        .with(RedactingLayer::new(Arc::clone(&registry)))
        .with(diagnostics_layer(
            config,
            registry,
            filter,
            std::io::stderr,
            use_ansi,
        ))
        .try_init()
        .map_err(|err| LogError::Init(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_uses_level() {
        let config = LogConfig::default().with_level(LogLevel::Debug);
        assert_eq!(default_directive(&config), "pd_core=debug");
        let quiet = LogConfig::default().with_level(LogLevel::Off);
        assert_eq!(default_directive(&quiet), "pd_core=off");
    }

    #[test]
    fn test_second_init_is_rejected() {
        let registry = Arc::new(LoggerRegistry::with_sink_factory(|_| {
            Sink::new(SharedBuffer::new())
        }));
        let config = LogConfig::default().with_timestamps(false);
        // The first call may already have lost to another test in this binary.
        let _ = init_logging(&config, Arc::clone(&registry));
        let err = init_logging(&config, registry).unwrap_err();
        assert!(matches!(err, LogError::Init(_)));
    }

    #[test]
    fn test_logger_targets_never_reach_diagnostics() {
        let records = SharedBuffer::new();
        let sink_buffer = records.clone();
        let registry = Arc::new(LoggerRegistry::with_sink_factory(move |_| {
            Sink::new(sink_buffer.clone())
        }));
        registry.default_logger().unwrap();

        let diagnostics = SharedBuffer::new();
        let diag_writer = diagnostics.clone();
        let config = LogConfig::default().with_timestamps(false);
        let subscriber = tracing_subscriber::registry()
            .with(RedactingLayer::new(Arc::clone(&registry)))
            .with(diagnostics_layer(
                &config,
                Arc::clone(&registry),
                EnvFilter::new("trace"),
                move || diag_writer.clone(),
                false,
            ));

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "user_data", "password=hunter2;");
            tracing::info!(target: "pd_core::ingest", "ingest started");
        });

        let diag = diagnostics.contents();
        assert!(!diag.contains("hunter2"), "{}", diag);
        assert!(!diag.contains("password"), "{}", diag);
        assert!(diag.contains("ingest started"), "{}", diag);

        let lines = records.lines();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with(": password=***;"), "{}", lines[0]);
    }
}
