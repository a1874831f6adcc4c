#![warn(missing_docs)]
//! # klass-access-app
//!
//! ## Purpose
//! Orchestrates form state, validation, auth, profile persistence, and UI
//! projection for `klass-access`.
//!
//! ## Responsibilities
//! - Drive the login/registration form through [`FormController`].
//! - Enforce the bypass capability gate and its env opt-in.
//! - Emit host events on successful login, bypass, and registration.
//! - Provide log redaction helpers for echoed input.
//!
//! ## Data flow
//! Host input events -> [`FormController`] -> validation/strength via core,
//! credential decisions via the auth backend, profile reads/writes via the
//! store -> [`klass_access_ui::UiState`] projection plus host events.
//!
//! ## Ownership and lifetimes
//! The controller owns its state and holds `Arc` trait objects for the
//! backend, store, and event sink, so hosts can share those freely.
//!
//! ## Error model
//! User-facing operation failures are [`SubmitError`] values; profile store
//! failures are swallowed with a logged warning and fall back to defaults.
//!
//! ## Security and privacy notes
//! - The bypass capability is disabled unless `KLASS_ACCESS_BYPASS` opts in;
//!   only a SHA-256 digest of the legacy key ships in the binary.
//! - Credential and key text is never logged; [`redact_sensitive`] guards
//!   echoed shell input.

mod controller;

pub use controller::{
    EventSink, FormController, RegistrationEvent, SocialProvider, SubmitError, SubmitOutcome,
};

/// Build-time application version loaded from root `VERSION`.
pub const APP_VERSION: &str = env!("KLASS_ACCESS_VERSION");

/// Default simulated auth latency in milliseconds.
pub const DEFAULT_DEMO_LATENCY_MS: u64 = 1_200;

/// SHA-256 digest of the legacy bypass key.
///
/// The plaintext key is deliberately absent from the shipped code; the gate
/// only ever compares digests, and only when [`bypass_enabled_from_env`]
/// opted the process in.
pub const BYPASS_KEY_DIGEST_HEX: &str =
    "6f5f1dda7b9834cf1408c40d60b4fcad11ea4408e7363f6e19c7da2c86d34184";

/// Returns the app version sourced from root `VERSION`.
pub fn app_version() -> &'static str {
    APP_VERSION
}

/// Checks the bypass capability env opt-in.
///
/// Semantics:
/// - Unset => bypass disabled (secure default).
/// - `1`, `true`, `on` (case-insensitive) => bypass enabled.
/// - Any other value => bypass disabled.
pub fn bypass_enabled_from_env() -> bool {
    match std::env::var("KLASS_ACCESS_BYPASS") {
        Ok(value) => {
            let normalized = value.trim().to_ascii_lowercase();
            normalized == "1" || normalized == "true" || normalized == "on"
        }
        Err(_) => false,
    }
}

/// Simulated auth latency from `KLASS_ACCESS_DEMO_LATENCY_MS`.
pub fn demo_latency_from_env() -> std::time::Duration {
    let millis = std::env::var("KLASS_ACCESS_DEMO_LATENCY_MS")
        .ok()
        .and_then(|value| value.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_DEMO_LATENCY_MS);
    std::time::Duration::from_millis(millis)
}

/// Redacts common secret markers in log-safe output.
pub fn redact_sensitive(input: &str) -> String {
    let mut redacted = input.to_string();
    for key in ["password", "confirm", "key", "secret", "token"] {
        redacted = redact_key_value(&redacted, key);
    }
    redacted
}

fn redact_key_value(input: &str, key: &str) -> String {
    let lower = input.to_ascii_lowercase();
    if let Some(position) = lower.find(key) {
        let prefix = &input[..position];
        return format!("{prefix}{key} <redacted>");
    }

    input.to_string()
}
