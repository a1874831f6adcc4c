//! Integration tests for bypass key submission against the capability gate.

mod common;

use std::sync::Arc;

use klass_access_app::{BYPASS_KEY_DIGEST_HEX, FormController, SubmitError};
use klass_access_auth::{AuthError, BypassGate, DemoCredentialBackend};
use klass_access_store::MemoryProfileStore;
use klass_access_ui::OverlayState;

fn arm_overlay(controller: &mut FormController) {
    for tap in 0..5_u64 {
        controller.record_logo_tap(tap * 100);
    }
    assert_eq!(controller.ui().overlay, OverlayState::Armed);
}

#[test]
fn bypass_key_tests_shipped_digest_matches_legacy_key() {
    assert_eq!(
        BypassGate::digest_for_key(common::TEST_BYPASS_KEY),
        BYPASS_KEY_DIGEST_HEX
    );
}

#[test]
fn bypass_key_tests_correct_key_grants_admin_session_regardless_of_fields() {
    let (mut controller, sink) = common::fixture_controller();
    controller.set_email("not-an-email");
    controller.set_password("x");
    arm_overlay(&mut controller);

    controller.set_bypass_key(common::TEST_BYPASS_KEY);
    let session = controller
        .submit_bypass_key(9_000)
        .expect("correct key should authorize");

    assert!(session.admin);
    assert!(session.bypass);
    assert_eq!(controller.ui().overlay, OverlayState::Hidden);
    assert!(controller.entered_bypass_key().is_empty());

    let logins = sink.logins.lock().expect("lock");
    assert_eq!(logins.len(), 1);
    assert!(logins[0].bypass);
}

#[test]
fn bypass_key_tests_wrong_key_is_rejected_and_cleared() {
    let (mut controller, sink) = common::fixture_controller();
    arm_overlay(&mut controller);

    controller.set_bypass_key("not-the-key");
    let error = controller
        .submit_bypass_key(9_000)
        .expect_err("wrong key should be rejected");

    assert!(matches!(
        error,
        SubmitError::Rejected(AuthError::BypassRejected)
    ));
    assert!(controller.entered_bypass_key().is_empty());
    assert_eq!(controller.ui().overlay, OverlayState::Hidden);
    assert!(sink.logins.lock().expect("lock").is_empty());
}

#[test]
fn bypass_key_tests_disabled_gate_rejects_even_the_correct_key() {
    let sink = Arc::new(common::RecordingSink::default());
    let mut controller = FormController::new(
        Arc::new(DemoCredentialBackend::instant()),
        Arc::new(MemoryProfileStore::new()),
        sink,
        BypassGate::disabled(),
    );
    arm_overlay(&mut controller);

    controller.set_bypass_key(common::TEST_BYPASS_KEY);
    let error = controller
        .submit_bypass_key(9_000)
        .expect_err("disabled gate should reject");
    assert!(matches!(
        error,
        SubmitError::Rejected(AuthError::BypassDisabled)
    ));
}

#[test]
fn bypass_key_tests_submission_requires_armed_overlay() {
    let (mut controller, _sink) = common::fixture_controller();
    controller.set_bypass_key(common::TEST_BYPASS_KEY);

    let error = controller
        .submit_bypass_key(9_000)
        .expect_err("hidden overlay should block submission");
    assert!(matches!(error, SubmitError::BypassHidden));
}
