//! Field-aware redaction for personal data in log messages.
//!
//! Log messages in this system are flat `key=value` pairs terminated by a
//! literal separator (`name=Bob;email=bob@example.com;`). This crate finds the
//! values of a configured set of sensitive field names and replaces them with a
//! fixed mask before the message is written anywhere.
//!
//! # Key Features
//!
//! - **Sequential field passes**: each field is redacted across the whole
//!   message before the next one is considered.
//! - **Non-greedy values**: a value ends at the first separator after its `=`.
//!   Values that contain the separator are truncated there.
//! - **Swappable engines**: [`FieldRedactor`] is implemented by a regex engine
//!   ([`RegexFieldRedactor`]) and a scanning engine ([`LiteralFieldRedactor`])
//!   that produce identical output.
//!
//! # Example
//!
//! ```
//! use pd_redact::filter_datum;
//!
//! let out = filter_datum(&["password"], "***", "name=Bob;password=hunter2;", ";").unwrap();
//! assert_eq!(out, "name=Bob;password=***;");
//! ```

pub mod error;
pub mod field_set;
pub mod policy;
pub mod redactor;
pub mod rule;

pub use error::{RedactionError, Result};
pub use field_set::FieldSet;
pub use policy::{pii_fields, PII_FIELDS, REDACTION, SEPARATOR};
pub use redactor::{filter_datum, FieldRedactor, LiteralFieldRedactor, RegexFieldRedactor};
pub use rule::RedactionRule;
