//! Form controller: the single component owning form, bypass, and session
//! flow state.
//!
//! All transitions happen on discrete input events or [`FormController::on_tick`];
//! submission is synchronous and serialized by `&mut self`, so no locking is
//! needed around the controller itself.

use std::fmt;
use std::sync::Arc;

use klass_access_auth::{
    AuthError, BypassGate, BypassPhase, CredentialBackend, DEMO_EMAIL, DEMO_PASSWORD,
    LoginRequest, Session, TapTracker,
};
use klass_access_core::{
    AuthMode, FormState, ValidationResult, password_strength, valid_email, validate,
};
use klass_access_store::{ProfileRecord, ProfileStore};
use klass_access_ui::{OverlayState, StageStatus, UiState};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_version;

/// Host event payload for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationEvent {
    /// Email the account was created for.
    pub email: String,
    /// Unix epoch milliseconds when registration completed.
    pub registered_at_ms: u64,
}

/// Host application boundary.
///
/// These are the only caller-facing contracts the controller honors;
/// navigation, real verification, and persistence backends stay with the
/// host.
pub trait EventSink: Send + Sync {
    /// Invoked on successful authentication or bypass.
    fn on_login(&self, session: &Session);

    /// Invoked on successful registration.
    fn on_register(&self, registration: &RegistrationEvent);
}

/// Social sign-in providers shown on the login screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialProvider {
    /// Google sign-in button.
    Google,
    /// Facebook sign-in button.
    Facebook,
    /// Apple sign-in button.
    Apple,
    /// Twitter sign-in button.
    Twitter,
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Google => "Google",
            Self::Facebook => "Facebook",
            Self::Apple => "Apple",
            Self::Twitter => "Twitter",
        })
    }
}

/// Successful submit outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Login mode: a session was granted.
    LoggedIn(Session),
    /// Register mode: the registration event fired and the form returned to
    /// login.
    Registered,
}

/// User-facing operation failures.
#[derive(Debug, Error)]
pub enum SubmitError {
    /// One or more fields failed validation; the failing result is returned
    /// so the host can surface per-field errors.
    #[error("one or more fields failed validation")]
    Invalid(ValidationResult),
    /// Credentials or bypass key were rejected.
    #[error(transparent)]
    Rejected(#[from] AuthError),
    /// A bypass key was submitted while the overlay was hidden.
    #[error("bypass overlay is not armed")]
    BypassHidden,
    /// Social login buttons are stubs in this build.
    #[error("{0} login is not available")]
    ProviderUnavailable(SocialProvider),
    /// Password reset needs a syntactically valid email first.
    #[error("a valid email address is required")]
    EmailRequired,
}

/// Holds form field state, validation results, bypass state, and the UI
/// projection; decides which screen variant and overlay are visible.
pub struct FormController {
    form: FormState,
    ui: UiState,
    taps: TapTracker,
    gate: BypassGate,
    entered_key: String,
    backend: Arc<dyn CredentialBackend>,
    store: Arc<dyn ProfileStore>,
    sink: Arc<dyn EventSink>,
}

impl FormController {
    /// Creates a controller and pre-fills the email field.
    ///
    /// A stored remembered email wins and turns the remember-me flag on;
    /// absence or any store failure falls back to the demo email
    /// (best effort, never fatal).
    pub fn new(
        backend: Arc<dyn CredentialBackend>,
        store: Arc<dyn ProfileStore>,
        sink: Arc<dyn EventSink>,
        gate: BypassGate,
    ) -> Self {
        let mut form = FormState::new();
        let mut ui = UiState::new(app_version());

        let remembered = match store.load() {
            Ok(Some(record)) => record.remembered_email,
            Ok(None) => None,
            Err(error) => {
                warn!("profile: remembered email load failed: {error}");
                None
            }
        };

        match remembered {
            Some(email) => {
                form.email = email.clone();
                form.remember_email = true;
                ui.remembered_email = Some(email);
            }
            None => {
                form.email = DEMO_EMAIL.to_string();
                ui.remembered_email = Some(DEMO_EMAIL.to_string());
            }
        }

        Self {
            form,
            ui,
            taps: TapTracker::new(),
            gate,
            entered_key: String::new(),
            backend,
            store,
            sink,
        }
    }

    /// Current UI projection snapshot.
    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    /// Current form field state.
    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Current bypass key entry text.
    pub fn entered_bypass_key(&self) -> &str {
        &self.entered_key
    }

    /// Taps counted within the active inactivity window.
    pub fn tap_count(&self) -> u8 {
        self.taps.count()
    }

    /// Updates the email field.
    pub fn set_email(&mut self, email: impl Into<String>) {
        self.form.email = email.into();
    }

    /// Updates the password field and recomputes the strength meter.
    pub fn set_password(&mut self, password: impl Into<String>) {
        self.form.password = password.into();
        self.ui.set_strength(password_strength(&self.form.password));
    }

    /// Updates the confirmation field.
    pub fn set_confirm_password(&mut self, confirm: impl Into<String>) {
        self.form.confirm_password = confirm.into();
    }

    /// Updates the remember-me flag.
    pub fn set_remember(&mut self, remember: bool) {
        self.form.remember_email = remember;
    }

    /// Updates the bypass key entry text.
    pub fn set_bypass_key(&mut self, key: impl Into<String>) {
        self.entered_key = key.into();
    }

    /// Fills the baked-in demo credentials into the form.
    pub fn use_demo_credentials(&mut self) {
        self.form.email = DEMO_EMAIL.to_string();
        self.set_password(DEMO_PASSWORD);
        self.ui.set_status("Demo credentials filled.");
    }

    /// Flips between login and registration.
    ///
    /// Clears passwords and transient errors, restores the remembered email
    /// when returning to login, and dismisses any armed bypass overlay.
    pub fn toggle_mode(&mut self) {
        if self.ui.overlay == OverlayState::Armed {
            self.cancel_bypass();
        }

        let remembered = self.ui.remembered_email.clone();
        self.form.toggle_mode(remembered.as_deref());
        self.ui.mode = self.form.mode;
        self.ui.clear_errors();
        self.ui.set_strength(password_strength(""));
        self.ui.submit = StageStatus::Idle;
        self.ui.set_status(match self.form.mode {
            AuthMode::Login => "Switched to login.",
            AuthMode::Register => "Switched to registration.",
        });
    }

    /// Records one logo tap and restarts the inactivity window.
    ///
    /// Arms the bypass overlay once the required tap count is reached.
    pub fn record_logo_tap(&mut self, now_ms: u64) -> BypassPhase {
        let phase = self.taps.record_tap(now_ms);
        if phase == BypassPhase::Armed && self.ui.overlay == OverlayState::Hidden {
            self.ui.overlay = OverlayState::Armed;
            info!("bypass: overlay armed by tap gesture");
        }
        phase
    }

    /// Dismisses the bypass overlay and clears tap and key state.
    pub fn cancel_bypass(&mut self) {
        self.entered_key.clear();
        self.taps.reset();
        self.ui.overlay = OverlayState::Hidden;
    }

    /// Submits the entered bypass key against the capability gate.
    ///
    /// Success and failure both return the overlay to hidden and clear the
    /// entered key; success emits `on_login` with the admin session and an
    /// audit log line.
    ///
    /// # Errors
    /// [`SubmitError::BypassHidden`] when the overlay is not armed;
    /// [`SubmitError::Rejected`] on gate rejection.
    pub fn submit_bypass_key(&mut self, now_ms: u64) -> Result<Session, SubmitError> {
        if self.ui.overlay != OverlayState::Armed {
            return Err(SubmitError::BypassHidden);
        }

        let verdict = self.gate.authorize(&self.entered_key, now_ms);
        self.cancel_bypass();

        match verdict {
            Ok(session) => {
                warn!(
                    "audit: bypass session granted session_id={}",
                    session.session_id
                );
                self.ui.submit = StageStatus::Granted;
                self.ui.set_status("Bypass session granted.");
                self.sink.on_login(&session);
                Ok(session)
            }
            Err(error) => {
                warn!("audit: bypass key rejected");
                self.ui.submit = StageStatus::Rejected;
                self.ui.set_status("Bypass key rejected.");
                Err(SubmitError::Rejected(error))
            }
        }
    }

    /// Re-validates and submits the form for the active mode.
    ///
    /// Any validation failure returns the failing [`ValidationResult`]
    /// without partial success. Login success persists or clears the
    /// remembered email per the remember-me flag (best effort) and emits
    /// `on_login`; registration success emits `on_register` and switches the
    /// form back to login mode.
    ///
    /// # Errors
    /// [`SubmitError::Invalid`] with the per-field result, or
    /// [`SubmitError::Rejected`] when the backend declines.
    pub fn submit(&mut self, now_ms: u64) -> Result<SubmitOutcome, SubmitError> {
        let validation = validate(self.form.mode, &self.form);
        self.ui.apply_validation(&validation);
        if !validation.is_valid() {
            self.ui.submit = StageStatus::Rejected;
            self.ui.set_status("Please correct the highlighted fields.");
            return Err(SubmitError::Invalid(validation));
        }

        self.ui.submit = StageStatus::Pending;
        info!(
            "auth: submit attempt mode={:?} email_len={} password_len={}",
            self.form.mode,
            self.form.email.trim().len(),
            self.form.password.len()
        );

        match self.form.mode {
            AuthMode::Login => {
                let request = LoginRequest {
                    email: self.form.email.clone(),
                    password: self.form.password.clone(),
                };
                if let Err(error) = self.backend.authenticate(&request) {
                    self.ui.submit = StageStatus::Rejected;
                    self.ui.set_status("Login failed.");
                    info!("auth: login rejected");
                    return Err(SubmitError::Rejected(error));
                }

                self.persist_remembered_email();

                let session = Session::standard(self.form.email.clone(), now_ms);
                self.ui.submit = StageStatus::Granted;
                self.ui.set_status("Login successful.");
                info!("auth: login granted session_id={}", session.session_id);
                self.sink.on_login(&session);
                Ok(SubmitOutcome::LoggedIn(session))
            }
            AuthMode::Register => {
                let registration = RegistrationEvent {
                    email: self.form.email.clone(),
                    registered_at_ms: now_ms,
                };
                info!("auth: registration accepted");
                self.sink.on_register(&registration);

                // Back to login with the remembered email restored.
                let remembered = self.ui.remembered_email.clone();
                self.form.toggle_mode(remembered.as_deref());
                self.ui.mode = self.form.mode;
                self.ui.clear_errors();
                self.ui.set_strength(password_strength(""));
                self.ui.submit = StageStatus::Granted;
                self.ui.set_status("Account created successfully.");
                Ok(SubmitOutcome::Registered)
            }
        }
    }

    /// Acknowledges a password reset request locally.
    ///
    /// No mail is sent anywhere; a valid email yields the address a reset
    /// link would target, and the status line acknowledges the request.
    ///
    /// # Errors
    /// [`SubmitError::EmailRequired`] when the email field is not a valid
    /// address (the email error flag is set for the host).
    pub fn request_password_reset(&mut self) -> Result<String, SubmitError> {
        if valid_email(&self.form.email) {
            self.ui
                .set_status(format!("Password reset link sent to {}", self.form.email));
            Ok(self.form.email.clone())
        } else {
            self.ui.field_errors.email = true;
            self.ui
                .set_status("Enter a valid email address to reset your password.");
            Err(SubmitError::EmailRequired)
        }
    }

    /// Social login buttons are stubs: no provider integration exists.
    ///
    /// # Errors
    /// Always [`SubmitError::ProviderUnavailable`].
    pub fn social_login(&mut self, provider: SocialProvider) -> Result<Session, SubmitError> {
        self.ui
            .set_status(format!("{provider} login is not available in this build."));
        Err(SubmitError::ProviderUnavailable(provider))
    }

    /// Drives tap-window expiry; hosts call this from their tick source.
    pub fn on_tick(&mut self, now_ms: u64) {
        self.taps.on_tick(now_ms);
    }

    fn persist_remembered_email(&mut self) {
        let result = if self.form.remember_email {
            self.ui.remembered_email = Some(self.form.email.clone());
            self.store
                .save(&ProfileRecord::with_email(self.form.email.clone()))
        } else {
            self.ui.remembered_email = None;
            self.store.clear()
        };

        // Store failures are non-fatal; the user keeps working with defaults.
        if let Err(error) = result {
            warn!("profile: remembered email persistence failed: {error}");
        }
    }
}
