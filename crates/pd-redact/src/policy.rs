//! Compiled-in redaction policy.
//!
//! The field list, mask and separator are constants. Nothing here is loaded
//! from disk or the environment.

use once_cell::sync::Lazy;

use crate::FieldSet;

/// Field names that carry personally identifiable information.
pub const PII_FIELDS: [&str; 5] = ["name", "email", "phone", "ssn", "password"];

/// Mask substituted for every redacted value.
pub const REDACTION: &str = "***";

/// Delimiter terminating each `key=value` pair.
pub const SEPARATOR: &str = ";";

static PII_FIELD_SET: Lazy<FieldSet> = Lazy::new(|| FieldSet::new(PII_FIELDS));

/// The default PII [`FieldSet`], built once and shared.
pub fn pii_fields() -> FieldSet {
    PII_FIELD_SET.clone()
}
