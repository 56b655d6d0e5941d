//! Tracing layer that routes events into redacting loggers.
//!
//! Events whose target names a logger in the [`LoggerRegistry`] are rebuilt
//! as a `key=value;` message and emitted through that logger, so
//! `tracing::info!(target: "user_data", email = %email, "login")` is redacted
//! exactly like a direct call on the logger. Events for other targets are
//! ignored here.

use std::fmt::{self, Write as _};
use std::sync::Arc;

use tracing::{Event, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use super::{Level, LoggerRegistry};

/// Collects an event's message and fields as redactable text.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
    pairs: String,
}

impl MessageVisitor {
    fn push_pair(&mut self, name: &str, value: fmt::Arguments<'_>) {
        if !self.pairs.is_empty() {
            self.pairs.push(' ');
        }
        // Writing into a String cannot fail.
        let _ = write!(self.pairs, "{}={};", name, value);
    }

    /// Message first, then fields in recording order.
    fn finish(self) -> String {
        match (self.message, self.pairs.is_empty()) {
            (Some(message), true) => message,
            (Some(message), false) => format!("{} {}", message, self.pairs),
            (None, _) => self.pairs,
        }
    }
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_string());
        } else {
            self.push_pair(field.name(), format_args!("{}", value));
        }
    }

    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{:?}", value));
        } else {
            self.push_pair(field.name(), format_args!("{:?}", value));
        }
    }
}

/// Layer forwarding events for registered logger names to those loggers.
pub struct RedactingLayer {
    registry: Arc<LoggerRegistry>,
}

impl RedactingLayer {
    pub fn new(registry: Arc<LoggerRegistry>) -> Self {
        Self { registry }
    }
}

impl<S> Layer<S> for RedactingLayer
where
    S: Subscriber,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let Some(logger) = self.registry.get(metadata.target()) else {
            return;
        };

        let level = Level::from(*metadata.level());
        if !logger.enabled(level) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        let message = visitor.finish();

        if let Err(err) = logger.log(level, format_args!("{}", message)) {
            // The record is dropped; the error text carries no message content.
            eprintln!("pd-core: dropped record for logger {}: {}", logger.name(), err);
        }
    }
}
