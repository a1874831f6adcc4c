//! Integration tests for the registration flow.

mod common;

use klass_access_app::{SubmitError, SubmitOutcome};
use klass_access_core::AuthMode;

#[test]
fn registration_flow_tests_emits_event_and_returns_to_login() {
    let (mut controller, sink) = common::fixture_controller();
    controller.toggle_mode();
    assert_eq!(controller.ui().mode, AuthMode::Register);

    controller.set_email("new@example.com");
    controller.set_password("abcdef");
    controller.set_confirm_password("abcdef");

    let outcome = controller.submit(2_000).expect("registration should succeed");
    assert_eq!(outcome, SubmitOutcome::Registered);

    let registrations = sink.registrations.lock().expect("lock");
    assert_eq!(registrations.len(), 1);
    assert_eq!(registrations[0].email, "new@example.com");
    assert_eq!(registrations[0].registered_at_ms, 2_000);

    assert_eq!(controller.ui().mode, AuthMode::Login);
    assert!(controller.form().password.is_empty());
    assert!(controller.form().confirm_password.is_empty());
}

#[test]
fn registration_flow_tests_rejects_confirmation_mismatch() {
    let (mut controller, sink) = common::fixture_controller();
    controller.toggle_mode();
    controller.set_email("new@example.com");
    controller.set_password("abcdef");
    controller.set_confirm_password("abcdeg");

    let error = controller.submit(2_000).expect_err("mismatch should fail");
    assert!(matches!(
        error,
        SubmitError::Invalid(validation) if !validation.confirm_matches
    ));
    assert!(controller.ui().field_errors.confirm);
    assert!(sink.registrations.lock().expect("lock").is_empty());
}
