//! Integration tests for pd-redact.
//!
//! These tests verify:
//! - The documented redaction scenarios produce exact output
//! - Canary PII values never survive redaction of the default field set
//! - Both engines agree on realistic row-shaped messages

use pd_redact::{
    filter_datum, pii_fields, FieldRedactor, FieldSet, LiteralFieldRedactor, RegexFieldRedactor,
    REDACTION, SEPARATOR,
};

/// Canary values that must NEVER appear in redacted output.
const CANARY_ROWS: &[&str] = &[
    "name=Marlene Wood;email=hwilliams@example.org;phone=(473) 675-4939;ssn=261-72-6780;password=K5?BMNv;ip=60ed:c396:2ff:244:bbd0:9208:26f2:93ea;",
    "name=Belen Bailey;email=bcook@example.net;phone=(352) 298-0918;ssn=528-38-7434;password=^3EZ~TkX;ip=f724:c5d1:a14d:c4c5:bae2:9457:3769:1969;",
    "name=Robert Tolbert; email=trevorwilliams@example.com; phone=+1-123-555-0100; ssn=078-05-1120; password=correct horse battery staple; last_login=2019-11-14T06:14:24;",
];

const CANARY_VALUES: &[&str] = &[
    "Marlene Wood",
    "hwilliams@example.org",
    "(473) 675-4939",
    "261-72-6780",
    "K5?BMNv",
    "Belen Bailey",
    "bcook@example.net",
    "528-38-7434",
    "^3EZ~TkX",
    "Robert Tolbert",
    "trevorwilliams@example.com",
    "+1-123-555-0100",
    "078-05-1120",
    "correct horse battery staple",
];

// ============================================================================
// Documented Scenarios
// ============================================================================

#[test]
fn test_scenario_single_password() {
    let out = filter_datum(&["password"], "***", "name=Bob;password=hunter2;", ";").unwrap();
    assert_eq!(out, "name=Bob;password=***;");
}

#[test]
fn test_scenario_two_fields_custom_mask() {
    let out = filter_datum(
        &["email", "ssn"],
        "xxx",
        "email=a@b.com;ssn=123-45-6789;note=ok;",
        ";",
    )
    .unwrap();
    assert_eq!(out, "email=xxx;ssn=xxx;note=ok;");
}

#[test]
fn test_scenario_empty_fields_unchanged() {
    let messages = [
        "",
        "name=Bob;",
        "no pairs at all",
        "password=pw;ssn=1;\nname=x;",
    ];
    for message in messages {
        let out = filter_datum::<&str>(&[], "***", message, ";").unwrap();
        assert_eq!(out.as_bytes(), message.as_bytes());
    }
}

#[test]
fn test_scenario_separator_inside_value_truncates() {
    let out = filter_datum(&["note"], "***", "note=a;b;", ";").unwrap();
    assert_eq!(out, "note=***;b;");
}

// ============================================================================
// Canary Leak Tests
// ============================================================================

#[test]
fn test_canary_values_never_leak_regex() {
    let redactor = RegexFieldRedactor::new(pii_fields(), SEPARATOR).unwrap();
    for row in CANARY_ROWS {
        let out = redactor.filter(REDACTION, row);
        for canary in CANARY_VALUES {
            assert!(
                !out.contains(canary),
                "canary {:?} leaked in {:?}",
                canary,
                out
            );
        }
    }
}

#[test]
fn test_canary_values_never_leak_literal() {
    let redactor = LiteralFieldRedactor::new(pii_fields(), SEPARATOR);
    for row in CANARY_ROWS {
        let out = redactor.filter(REDACTION, row);
        for canary in CANARY_VALUES {
            assert!(!out.contains(canary), "canary {:?} leaked", canary);
        }
    }
}

#[test]
fn test_non_pii_fields_survive() {
    let redactor = RegexFieldRedactor::new(pii_fields(), SEPARATOR).unwrap();
    let out = redactor.filter(REDACTION, CANARY_ROWS[0]);
    assert!(out.ends_with("ip=60ed:c396:2ff:244:bbd0:9208:26f2:93ea;"));

    let out = redactor.filter(REDACTION, CANARY_ROWS[2]);
    assert!(out.ends_with("last_login=2019-11-14T06:14:24;"));
}

#[test]
fn test_row_shaped_message_with_spaces() {
    let redactor = RegexFieldRedactor::new(pii_fields(), SEPARATOR).unwrap();
    let out = redactor.filter(REDACTION, CANARY_ROWS[2]);
    assert_eq!(
        out,
        "name=***; email=***; phone=***; ssn=***; password=***; last_login=2019-11-14T06:14:24;"
    );
}

// ============================================================================
// Engine Agreement
// ============================================================================

#[test]
fn test_engines_agree_on_canary_rows() {
    let fields = FieldSet::new(["password", "ssn", "name", "email", "phone"]);
    let regex = RegexFieldRedactor::new(fields.clone(), SEPARATOR).unwrap();
    let literal = LiteralFieldRedactor::new(fields, SEPARATOR);
    for row in CANARY_ROWS {
        assert_eq!(regex.filter("[X]", row), literal.filter("[X]", row));
    }
}

#[test]
fn test_engines_usable_as_trait_objects() {
    let engines: Vec<Box<dyn FieldRedactor>> = vec![
        Box::new(RegexFieldRedactor::new(pii_fields(), SEPARATOR).unwrap()),
        Box::new(LiteralFieldRedactor::new(pii_fields(), SEPARATOR)),
    ];
    for engine in &engines {
        assert_eq!(engine.fields(), &pii_fields());
        assert_eq!(engine.separator(), ";");
        assert_eq!(engine.filter("***", "ssn=1;"), "ssn=***;");
    }
}
