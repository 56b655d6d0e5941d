//! Fuzz target for field redaction.
//!
//! Both redaction engines must produce identical output for arbitrary
//! fields, separators, redaction strings and messages.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use pd_redact::{FieldRedactor, FieldSet, LiteralFieldRedactor, RegexFieldRedactor};

#[derive(Arbitrary, Debug)]
struct Input<'a> {
    fields: Vec<&'a str>,
    separator: &'a str,
    redaction: &'a str,
    message: &'a str,
}

fuzz_target!(|input: Input<'_>| {
    let fields = FieldSet::new(input.fields.iter().copied());
    // Oversized patterns are rejected with an error, never a panic.
    let Ok(regex) = RegexFieldRedactor::new(fields.clone(), input.separator) else {
        return;
    };
    let literal = LiteralFieldRedactor::new(fields, input.separator);

    let expected = regex.filter(input.redaction, input.message);
    assert_eq!(expected, literal.filter(input.redaction, input.message));
});
