//! Per-field match rules.

use std::borrow::Cow;

use regex::{NoExpand, Regex};

use crate::{RedactionError, Result};

/// Match rule for one sensitive field.
///
/// Matches `<field>=<value><separator>` where the value is the shortest run of
/// any characters, newlines included (possibly empty), followed by the
/// separator. Field name and separator are matched literally.
#[derive(Debug, Clone)]
pub struct RedactionRule {
    field: String,
    separator: String,
    pattern: Regex,
}

impl RedactionRule {
    /// Compile the rule for `field` terminated by `separator`.
    pub fn new(field: &str, separator: &str) -> Result<Self> {
        let source = format!(
            "(?s){}=.*?{}",
            regex::escape(field),
            regex::escape(separator)
        );
        let pattern = Regex::new(&source).map_err(|e| RedactionError::PatternError {
            field: field.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            field: field.to_string(),
            separator: separator.to_string(),
            pattern,
        })
    }

    /// The field this rule redacts.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The compiled pattern source.
    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Whether `message` contains at least one match.
    pub fn is_match(&self, message: &str) -> bool {
        self.pattern.is_match(message)
    }

    /// Replace every non-overlapping match, left to right, with
    /// `<field>=<redaction><separator>`.
    ///
    /// Returns `Cow::Borrowed` when nothing matched.
    pub fn apply<'h>(&self, redaction: &str, message: &'h str) -> Cow<'h, str> {
        let replacement = format!("{}={}{}", self.field, redaction, self.separator);
        self.pattern.replace_all(message, NoExpand(&replacement))
    }
}
