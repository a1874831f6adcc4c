//! Integration tests for log redaction of echoed input.

use klass_access_app::redact_sensitive;

#[test]
fn log_redaction_tests_removes_obvious_secret_markers() {
    let raw = "password hunter2";
    let redacted = redact_sensitive(raw);

    assert!(redacted.contains("<redacted>"));
    assert!(!redacted.contains("hunter2"));
}

#[test]
fn log_redaction_tests_strips_bypass_key_text() {
    let redacted = redact_sensitive("key BYPASS2025");
    assert!(!redacted.contains("BYPASS2025"));
}
