#![warn(missing_docs)]
//! # klass-access-auth
//!
//! ## Purpose
//! Implements credential checking, session construction, and the two entry
//! paths to "session granted" for `klass-access`: normal submission and the
//! tap-gesture bypass capability.
//!
//! ## Responsibilities
//! - Model credentials, login requests, and opaque sessions.
//! - Execute login checks through an injectable backend abstraction.
//! - Track the logo tap gesture with its rolling inactivity window.
//! - Gate the bypass path behind an explicit, digest-based capability.
//!
//! ## Data flow
//! UI collects credentials -> controller validates -> [`CredentialBackend`]
//! decides -> [`Session`] is handed to the host. Independently, logo taps
//! drive [`TapTracker`] until [`BypassGate::authorize`] may be attempted.
//!
//! ## Ownership and lifetimes
//! Credential and session values are owned (`String`) to decouple backend
//! and controller lifetimes.
//!
//! ## Error model
//! Rejections and misuse of the bypass capability surface as [`AuthError`],
//! letting the controller clear transient input and report per field.
//!
//! ## Security and privacy notes
//! This crate never logs credential or key values and never stores a
//! plaintext bypass secret: the gate holds only a SHA-256 digest and is
//! disabled unless explicitly constructed with one.
//!
//! ## Example
//! ```rust
//! use klass_access_auth::{BypassPhase, TapTracker};
//!
//! let mut taps = TapTracker::new();
//! assert_eq!(taps.record_tap(1_000), BypassPhase::Counting(1));
//! ```

use std::thread;
use std::time::Duration;

use klass_access_core::{valid_email, valid_password};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Baked-in demo account email.
pub const DEMO_EMAIL: &str = "john.smith@example.com";

/// Baked-in demo account password.
pub const DEMO_PASSWORD: &str = "Password123!";

/// Taps required to arm the bypass overlay.
pub const BYPASS_TAP_COUNT: u8 = 5;

/// Inactivity window after which the tap counter resets.
pub const TAP_RESET_WINDOW_MS: u64 = 3_000;

/// Email attached to sessions granted through the bypass path.
pub const BYPASS_SESSION_EMAIL: &str = "bypass@admin.com";

/// User-provided credentials packaged for the credential backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// Email for account lookup.
    pub email: String,
    /// Password for the check.
    pub password: String,
}

/// Opaque success value handed to the host application.
///
/// Raw passwords are deliberately excluded; the email plus flags are all a
/// host needs to route the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Email the session was established for.
    pub email: String,
    /// Random 128-bit identifier, hex encoded.
    pub session_id: String,
    /// Unix epoch milliseconds when the session was granted.
    pub established_at_ms: u64,
    /// Whether the session carries admin privileges.
    pub admin: bool,
    /// Whether the session was granted through the bypass path.
    pub bypass: bool,
}

impl Session {
    /// Creates a session for a normally authenticated user.
    pub fn standard(email: impl Into<String>, now_ms: u64) -> Self {
        Self {
            email: email.into(),
            session_id: generate_session_id(),
            established_at_ms: now_ms,
            admin: false,
            bypass: false,
        }
    }

    /// Creates the admin session granted by the bypass capability.
    pub fn bypass_admin(now_ms: u64) -> Self {
        Self {
            email: BYPASS_SESSION_EMAIL.to_string(),
            session_id: generate_session_id(),
            established_at_ms: now_ms,
            admin: true,
            bypass: true,
        }
    }
}

fn generate_session_id() -> String {
    let mut bytes = [0_u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Abstract credential decision seam.
///
/// Hosts with a real verification path implement this; the shipped
/// [`DemoCredentialBackend`] keeps the historical demo behavior.
pub trait CredentialBackend: Send + Sync {
    /// Decides whether the request may establish a session.
    ///
    /// # Errors
    /// Returns [`AuthError`] when the credentials are rejected.
    fn authenticate(&self, request: &LoginRequest) -> Result<(), AuthError>;
}

/// Backend with the historical demo semantics: the baked-in demo pair or
/// any syntactically valid email/password pair is accepted, after a fixed
/// simulated-latency delay.
///
/// There is no real verification here; that is deliberate and documented,
/// not something to harden.
#[derive(Debug, Clone)]
pub struct DemoCredentialBackend {
    latency: Duration,
}

impl DemoCredentialBackend {
    /// Creates a backend with the given simulated latency.
    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    /// Creates a backend that answers immediately (tests, headless hosts).
    pub fn instant() -> Self {
        Self::with_latency(Duration::ZERO)
    }
}

impl CredentialBackend for DemoCredentialBackend {
    fn authenticate(&self, request: &LoginRequest) -> Result<(), AuthError> {
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(AuthError::EmptyCredential);
        }

        if request.email == DEMO_EMAIL && request.password == DEMO_PASSWORD {
            return Ok(());
        }

        if valid_email(&request.email) && valid_password(&request.password) {
            return Ok(());
        }

        Err(AuthError::InvalidCredentials)
    }
}

/// Bypass arming progress reported per logo tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassPhase {
    /// Taps observed so far within the rolling window.
    Counting(u8),
    /// Required tap count reached; the key overlay may be shown.
    Armed,
}

/// Counts logo taps against a rolling inactivity window.
///
/// The window behaves like a single-shot timer that every tap cancels and
/// restarts; expiry is detected by monotonic timestamp comparison, so no
/// timer thread is needed.
#[derive(Debug, Clone)]
pub struct TapTracker {
    taps: u8,
    last_tap_at_ms: Option<u64>,
}

impl TapTracker {
    /// Creates an idle tracker.
    pub fn new() -> Self {
        Self {
            taps: 0,
            last_tap_at_ms: None,
        }
    }

    /// Records one tap at `now_ms` and restarts the inactivity window.
    ///
    /// Returns [`BypassPhase::Armed`] once [`BYPASS_TAP_COUNT`] taps land
    /// within rolling [`TAP_RESET_WINDOW_MS`] windows, else the running
    /// count.
    pub fn record_tap(&mut self, now_ms: u64) -> BypassPhase {
        if let Some(last) = self.last_tap_at_ms
            && now_ms.saturating_sub(last) >= TAP_RESET_WINDOW_MS
        {
            self.taps = 0;
        }

        self.last_tap_at_ms = Some(now_ms);
        self.taps = self.taps.saturating_add(1).min(BYPASS_TAP_COUNT);

        if self.taps >= BYPASS_TAP_COUNT {
            BypassPhase::Armed
        } else {
            BypassPhase::Counting(self.taps)
        }
    }

    /// Resets the counter when the inactivity window has elapsed.
    pub fn on_tick(&mut self, now_ms: u64) {
        if let Some(last) = self.last_tap_at_ms
            && now_ms.saturating_sub(last) >= TAP_RESET_WINDOW_MS
        {
            self.reset();
        }
    }

    /// Clears all tap progress.
    pub fn reset(&mut self) {
        self.taps = 0;
        self.last_tap_at_ms = None;
    }

    /// Current tap count within the active window.
    pub fn count(&self) -> u8 {
        self.taps
    }
}

impl Default for TapTracker {
    fn default() -> Self {
        Self::new()
    }
}

/// Explicit bypass capability.
///
/// Disabled gates reject every key. An enabled gate compares the SHA-256
/// digest of the entered key against its configured digest; the plaintext
/// secret never lives in this crate.
#[derive(Debug, Clone)]
pub struct BypassGate {
    key_digest_hex: Option<String>,
}

impl BypassGate {
    /// Creates a gate that rejects every key.
    pub fn disabled() -> Self {
        Self {
            key_digest_hex: None,
        }
    }

    /// Creates a gate accepting keys whose SHA-256 digest matches.
    pub fn with_key_digest(digest_hex: impl Into<String>) -> Self {
        Self {
            key_digest_hex: Some(digest_hex.into().to_ascii_lowercase()),
        }
    }

    /// Returns `true` when the capability was explicitly enabled.
    pub fn is_enabled(&self) -> bool {
        self.key_digest_hex.is_some()
    }

    /// Hex SHA-256 digest for a key, for configuring gates.
    pub fn digest_for_key(key: &str) -> String {
        hex::encode(Sha256::digest(key.as_bytes()))
    }

    /// Attempts to grant the bypass admin session for an entered key.
    ///
    /// # Errors
    /// Returns [`AuthError::BypassDisabled`] when no digest is configured
    /// and [`AuthError::BypassRejected`] on digest mismatch. Rejection is
    /// silent by design: no lockout, no rate limiting.
    pub fn authorize(&self, key: &str, now_ms: u64) -> Result<Session, AuthError> {
        let expected = self
            .key_digest_hex
            .as_deref()
            .ok_or(AuthError::BypassDisabled)?;

        if Self::digest_for_key(key) != expected {
            return Err(AuthError::BypassRejected);
        }

        Ok(Session::bypass_admin(now_ms))
    }
}

/// Errors produced by credential and bypass logic.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email or password is missing/blank.
    #[error("email and password must be non-empty")]
    EmptyCredential,
    /// Credentials were rejected by the backend.
    #[error("credentials were rejected")]
    InvalidCredentials,
    /// The bypass capability is not enabled in this build/runtime.
    #[error("bypass capability is disabled")]
    BypassDisabled,
    /// The entered bypass key did not match the configured digest.
    #[error("bypass key rejected")]
    BypassRejected,
}
