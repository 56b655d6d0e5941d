//! Fuzz target for log line templates.
//!
//! Tests that template parsing handles arbitrary input without panicking and
//! that accepted templates format a redacted record.

#![no_main]

use libfuzzer_sys::fuzz_target;
use pd_core::logging::{Formatter, Level, LogRecord, RedactingFormatter, TemplateFormatter};
use pd_redact::{pii_fields, RegexFieldRedactor};

fuzz_target!(|data: &[u8]| {
    let Ok(template) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(base) = TemplateFormatter::new(template) else {
        return;
    };
    let Ok(redactor) = RegexFieldRedactor::new(pii_fields(), RedactingFormatter::SEPARATOR) else {
        return;
    };
    let formatter = RedactingFormatter::with_parts(Box::new(redactor), Box::new(base));
    let mut record = LogRecord::new("user_data", Level::Info, format_args!("name=fuzz;"));
    let line = formatter.format(&mut record).unwrap_or_default();
    if !template.contains("fuzz") {
        assert!(!line.contains("name=fuzz;"));
    }
});
