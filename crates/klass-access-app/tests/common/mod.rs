//! Shared fixtures for app integration tests.

use std::sync::{Arc, Mutex};

use klass_access_app::{EventSink, FormController, RegistrationEvent};
use klass_access_auth::{BypassGate, DemoCredentialBackend, Session};
use klass_access_store::{MemoryProfileStore, ProfileStore};

/// Legacy bypass key exercised by gesture and key tests.
#[allow(dead_code)]
pub const TEST_BYPASS_KEY: &str = "BYPASS2025";

/// Captures emitted host events for assertions.
#[derive(Default)]
pub struct RecordingSink {
    /// Sessions delivered through `on_login`.
    pub logins: Mutex<Vec<Session>>,
    /// Registrations delivered through `on_register`.
    pub registrations: Mutex<Vec<RegistrationEvent>>,
}

impl EventSink for RecordingSink {
    fn on_login(&self, session: &Session) {
        self.logins
            .lock()
            .expect("login lock should work")
            .push(session.clone());
    }

    fn on_register(&self, registration: &RegistrationEvent) {
        self.registrations
            .lock()
            .expect("registration lock should work")
            .push(registration.clone());
    }
}

/// Builds a controller over the given store with an instant backend and an
/// enabled bypass gate.
#[allow(dead_code)]
pub fn controller_with(store: Arc<dyn ProfileStore>, sink: Arc<RecordingSink>) -> FormController {
    FormController::new(
        Arc::new(DemoCredentialBackend::instant()),
        store,
        sink,
        BypassGate::with_key_digest(BypassGate::digest_for_key(TEST_BYPASS_KEY)),
    )
}

/// Builds a controller over an empty in-memory store.
#[allow(dead_code)]
pub fn fixture_controller() -> (FormController, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::default());
    let controller = controller_with(Arc::new(MemoryProfileStore::new()), sink.clone());
    (controller, sink)
}
