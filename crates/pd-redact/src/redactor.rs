//! Field redactors.
//!
//! A [`FieldRedactor`] owns a [`FieldSet`] and a separator and rewrites
//! messages so that every value of a listed field becomes the mask. Fields are
//! processed one at a time, each across the whole message, in set order.
//!
//! Two engines are provided:
//! - [`RegexFieldRedactor`]: one compiled [`RedactionRule`] per field.
//! - [`LiteralFieldRedactor`]: substring scanning, no pattern compilation.
//!
//! Both produce byte-identical output, including the truncation of values that
//! contain the separator.

use std::borrow::Cow;

use crate::{FieldSet, RedactionRule, Result};

/// Rewrites sensitive field values in a `key=value<separator>` message.
pub trait FieldRedactor: Send + Sync {
    /// The fields this redactor masks.
    fn fields(&self) -> &FieldSet;

    /// The literal pair terminator.
    fn separator(&self) -> &str;

    /// Return `message` with every listed field's value replaced by `redaction`.
    ///
    /// The input is never modified. With an empty field set the output equals
    /// the input.
    fn filter(&self, redaction: &str, message: &str) -> String;
}

/// Regex-backed redactor with rules compiled once at construction.
#[derive(Debug, Clone)]
pub struct RegexFieldRedactor {
    fields: FieldSet,
    separator: String,
    rules: Vec<RedactionRule>,
}

impl RegexFieldRedactor {
    /// Compile one rule per field.
    pub fn new(fields: FieldSet, separator: impl Into<String>) -> Result<Self> {
        let separator = separator.into();
        let rules = fields
            .iter()
            .map(|field| RedactionRule::new(field, &separator))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            fields,
            separator,
            rules,
        })
    }

    /// The compiled rules, in field order.
    pub fn rules(&self) -> &[RedactionRule] {
        &self.rules
    }
}

impl FieldRedactor for RegexFieldRedactor {
    fn fields(&self) -> &FieldSet {
        &self.fields
    }

    fn separator(&self) -> &str {
        &self.separator
    }

    fn filter(&self, redaction: &str, message: &str) -> String {
        let mut output = message.to_string();
        for rule in &self.rules {
            let replaced = match rule.apply(redaction, &output) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(replaced) => replaced,
            };
            output = replaced;
        }
        output
    }
}

/// Scanning redactor that needs no pattern compilation.
#[derive(Debug, Clone)]
pub struct LiteralFieldRedactor {
    fields: FieldSet,
    separator: String,
}

impl LiteralFieldRedactor {
    /// Create a scanning redactor. Construction cannot fail.
    pub fn new(fields: FieldSet, separator: impl Into<String>) -> Self {
        Self {
            fields,
            separator: separator.into(),
        }
    }

    fn redact_field(&self, field: &str, redaction: &str, message: &str) -> String {
        let key = format!("{}=", field);
        // `key` always ends in '=', so it is never empty.
        let step = key.chars().next().map_or(1, char::len_utf8);

        let mut output = String::with_capacity(message.len());
        let mut rest = message;

        while let Some(start) = rest.find(&key) {
            let value_start = start + key.len();
            let tail = &rest[value_start..];

            match tail.find(self.separator.as_str()) {
                Some(end) => {
                    output.push_str(&rest[..start]);
                    output.push_str(&key);
                    output.push_str(redaction);
                    output.push_str(&self.separator);
                    rest = &tail[end + self.separator.len()..];
                }
                None => {
                    output.push_str(&rest[..start + step]);
                    rest = &rest[start + step..];
                }
            }
        }

        output.push_str(rest);
        output
    }
}

impl FieldRedactor for LiteralFieldRedactor {
    fn fields(&self) -> &FieldSet {
        &self.fields
    }

    fn separator(&self) -> &str {
        &self.separator
    }

    fn filter(&self, redaction: &str, message: &str) -> String {
        self.fields
            .iter()
            .fold(message.to_string(), |acc, field| {
                self.redact_field(field, redaction, &acc)
            })
    }
}

/// Redact `fields` in `message`, replacing each value with `redaction`.
///
/// Convenience form of [`RegexFieldRedactor`] for one-off calls. Field names
/// and the separator are matched literally. Fails only if a rule cannot be
/// compiled.
pub fn filter_datum<S: AsRef<str>>(
    fields: &[S],
    redaction: &str,
    message: &str,
    separator: &str,
) -> Result<String> {
    if fields.is_empty() {
        return Ok(message.to_string());
    }
    let fields = FieldSet::new(fields.iter().map(|f| f.as_ref().to_string()));
    let redactor = RegexFieldRedactor::new(fields, separator)?;
    Ok(redactor.filter(redaction, message))
}
