//! Integration tests pinning the host-facing event payload shapes.

mod common;

use klass_access_app::SubmitOutcome;

#[test]
fn session_event_shape_tests_session_json_carries_contract_fields() {
    let (mut controller, _sink) = common::fixture_controller();
    controller.set_email("a@b.com");
    controller.set_password("abcdef");

    let SubmitOutcome::LoggedIn(session) = controller.submit(1_000).expect("submit should work")
    else {
        panic!("login mode should grant a session");
    };

    let value = serde_json::to_value(&session).expect("session should serialize");
    for field in ["email", "session_id", "established_at_ms", "admin", "bypass"] {
        assert!(value.get(field).is_some(), "session json should carry {field}");
    }
    assert_eq!(value["bypass"], serde_json::json!(false));
}

#[test]
fn session_event_shape_tests_registration_json_carries_contract_fields() {
    let (mut controller, sink) = common::fixture_controller();
    controller.toggle_mode();
    controller.set_email("new@example.com");
    controller.set_password("abcdef");
    controller.set_confirm_password("abcdef");
    controller.submit(2_000).expect("registration should work");

    let registrations = sink.registrations.lock().expect("lock");
    let value = serde_json::to_value(&registrations[0]).expect("event should serialize");
    assert!(value.get("email").is_some());
    assert!(value.get("registered_at_ms").is_some());
}
