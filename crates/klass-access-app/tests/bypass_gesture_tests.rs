//! Integration tests for the tap gesture arming the bypass overlay.

mod common;

use klass_access_auth::BypassPhase;
use klass_access_ui::OverlayState;

#[test]
fn bypass_gesture_tests_arms_after_five_taps_within_window() {
    let (mut controller, _sink) = common::fixture_controller();

    for tap in 0..4_u64 {
        let phase = controller.record_logo_tap(tap * 500);
        assert!(matches!(phase, BypassPhase::Counting(_)));
        assert_eq!(controller.ui().overlay, OverlayState::Hidden);
    }

    assert_eq!(controller.record_logo_tap(2_000), BypassPhase::Armed);
    assert_eq!(controller.ui().overlay, OverlayState::Armed);
}

#[test]
fn bypass_gesture_tests_inactivity_gap_restarts_the_count() {
    let (mut controller, _sink) = common::fixture_controller();

    for tap in 0..4_u64 {
        controller.record_logo_tap(tap * 300);
    }

    // 3+ seconds of inactivity; the next tap counts from one again.
    assert_eq!(controller.record_logo_tap(10_000), BypassPhase::Counting(1));
    assert_eq!(controller.ui().overlay, OverlayState::Hidden);
}

#[test]
fn bypass_gesture_tests_tick_expires_stale_counts() {
    let (mut controller, _sink) = common::fixture_controller();
    controller.record_logo_tap(0);
    controller.record_logo_tap(100);

    controller.on_tick(5_000);
    assert_eq!(controller.record_logo_tap(5_100), BypassPhase::Counting(1));
}
