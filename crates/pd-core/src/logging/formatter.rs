//! Line formatting for log records.
//!
//! [`TemplateFormatter`] turns a record into a line. [`RedactingFormatter`]
//! wraps any base formatter and rewrites the record's message through a
//! [`FieldRedactor`] first, so the base formatter only ever sees redacted text.

use pd_redact::{FieldRedactor, FieldSet, RegexFieldRedactor};

use super::{LogError, LogRecord};

/// Default line template.
pub const FORMAT: &str = "[HOLBERTON] {name} {levelname} {asctime}: {message}";

/// Timestamp layout used for `{asctime}` (local time, milliseconds).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Minimum width of the `{asctime}` column.
const ASCTIME_WIDTH: usize = 15;

/// Turns a record into one output line.
pub trait Formatter: Send + Sync {
    /// Format `record`. May rewrite the record's message in place.
    fn format(&self, record: &mut LogRecord<'_>) -> Result<String, LogError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Name,
    Level,
    Time,
    Message,
}

/// Renders records through a `{placeholder}` template.
///
/// Supported placeholders: `{name}`, `{levelname}`, `{asctime}`, `{message}`.
#[derive(Debug, Clone)]
pub struct TemplateFormatter {
    template: String,
    segments: Vec<Segment>,
}

impl TemplateFormatter {
    /// Parse `template`. Unknown or unterminated placeholders are rejected.
    pub fn new(template: &str) -> Result<Self, LogError> {
        let mut segments = Vec::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            if open > 0 {
                segments.push(Segment::Literal(rest[..open].to_string()));
            }
            let after = &rest[open + 1..];
            let close = after
                .find('}')
                .ok_or_else(|| LogError::Template(format!("unterminated placeholder in {template:?}")))?;
            let segment = match &after[..close] {
                "name" => Segment::Name,
                "levelname" => Segment::Level,
                "asctime" => Segment::Time,
                "message" => Segment::Message,
                other => {
                    return Err(LogError::Template(format!(
                        "unknown placeholder {{{other}}}"
                    )))
                }
            };
            segments.push(segment);
            rest = &after[close + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest.to_string()));
        }

        Ok(Self {
            template: template.to_string(),
            segments,
        })
    }

    /// The formatter for [`FORMAT`].
    pub fn standard() -> Self {
        Self {
            template: FORMAT.to_string(),
            segments: vec![
                Segment::Literal("[HOLBERTON] ".to_string()),
                Segment::Name,
                Segment::Literal(" ".to_string()),
                Segment::Level,
                Segment::Literal(" ".to_string()),
                Segment::Time,
                Segment::Literal(": ".to_string()),
                Segment::Message,
            ],
        }
    }

    /// The template source.
    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for TemplateFormatter {
    fn default() -> Self {
        Self::standard()
    }
}

impl Formatter for TemplateFormatter {
    fn format(&self, record: &mut LogRecord<'_>) -> Result<String, LogError> {
        let message = record.rendered_message()?;
        let mut line = String::with_capacity(message.len() + 64);

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => line.push_str(text),
                Segment::Name => line.push_str(record.name()),
                Segment::Level => line.push_str(record.level().as_str()),
                Segment::Time => {
                    let ts = record.timestamp().format(TIMESTAMP_FORMAT).to_string();
                    line.push_str(&format!("{:<width$}", ts, width = ASCTIME_WIDTH));
                }
                Segment::Message => line.push_str(&message),
            }
        }

        Ok(line)
    }
}

/// Formatter that redacts sensitive fields before delegating.
///
/// The record's message is rendered, passed through the redactor with
/// [`RedactingFormatter::REDACTION`], and written back into the record. Only
/// then is the base formatter invoked. A render failure is returned as is and
/// nothing is formatted.
pub struct RedactingFormatter {
    redactor: Box<dyn FieldRedactor>,
    base: Box<dyn Formatter>,
}

impl RedactingFormatter {
    /// Mask substituted for sensitive values.
    pub const REDACTION: &'static str = pd_redact::REDACTION;

    /// Pair terminator the redactor is built with.
    pub const SEPARATOR: &'static str = pd_redact::SEPARATOR;

    /// Redact `fields` with the regex engine, then format with [`FORMAT`].
    pub fn new(fields: FieldSet) -> Result<Self, LogError> {
        let redactor = RegexFieldRedactor::new(fields, Self::SEPARATOR)?;
        Ok(Self::with_parts(
            Box::new(redactor),
            Box::new(TemplateFormatter::standard()),
        ))
    }

    /// Compose an arbitrary redactor and base formatter.
    pub fn with_parts(redactor: Box<dyn FieldRedactor>, base: Box<dyn Formatter>) -> Self {
        Self { redactor, base }
    }

    /// The fields this formatter masks.
    pub fn fields(&self) -> &FieldSet {
        self.redactor.fields()
    }
}

impl Formatter for RedactingFormatter {
    fn format(&self, record: &mut LogRecord<'_>) -> Result<String, LogError> {
        let rendered = record.rendered_message()?;
        record.set_message(self.redactor.filter(Self::REDACTION, &rendered));
        self.base.format(record)
    }
}

impl std::fmt::Debug for RedactingFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedactingFormatter")
            .field("fields", self.fields())
            .finish_non_exhaustive()
    }
}
