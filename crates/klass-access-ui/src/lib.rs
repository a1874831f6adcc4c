#![warn(missing_docs)]
//! # klass-access-ui
//!
//! ## Purpose
//! Defines the UI-facing runtime state model for `klass-access`.
//!
//! ## Responsibilities
//! - Represent screen mode, overlay visibility, and submit lifecycle.
//! - Project validation results into per-field error flags.
//! - Carry the strength meter snapshot for the password field.
//!
//! ## Data flow
//! Controller events mutate [`UiState`], which drives whatever shell the
//! host renders (the workspace ships a console shell).
//!
//! ## Ownership and lifetimes
//! `UiState` owns all of its values to simplify event reducers.
//!
//! ## Error model
//! This crate favors explicit state over recoverable errors. Invalid
//! combinations are prevented by guard methods.
//!
//! ## Security and privacy notes
//! UI state intentionally excludes secrets: neither password text nor
//! bypass keys are stored here, only the derived strength snapshot.

use klass_access_core::{AuthMode, PasswordStrength, StrengthLabel, ValidationResult};

/// Bypass overlay visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayState {
    /// Overlay is not shown; taps are still being counted.
    Hidden,
    /// Overlay is visible and accepts a key.
    Armed,
}

/// Submit lifecycle status shown next to the primary action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    /// No submission attempted yet.
    Idle,
    /// A submission is being decided.
    Pending,
    /// The last submission succeeded.
    Granted,
    /// The last submission was rejected.
    Rejected,
}

/// Per-field error flags surfaced by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    /// Email field failed validation.
    pub email: bool,
    /// Password field failed validation.
    pub password: bool,
    /// Confirmation field failed validation.
    pub confirm: bool,
}

impl FieldErrors {
    /// Derives error flags from a validation result.
    pub fn from_validation(result: &ValidationResult) -> Self {
        Self {
            email: !result.email_valid,
            password: !result.password_valid,
            confirm: !result.confirm_matches,
        }
    }

    /// Returns `true` when any field is flagged.
    pub fn any(&self) -> bool {
        self.email || self.password || self.confirm
    }
}

/// Aggregate UI runtime state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    /// App version string sourced from root `VERSION`.
    pub version: String,
    /// Active screen variant.
    pub mode: AuthMode,
    /// Bypass overlay visibility.
    pub overlay: OverlayState,
    /// Submit lifecycle status.
    pub submit: StageStatus,
    /// Remembered email shown in the saved-user hint.
    pub remembered_email: Option<String>,
    /// Per-field error flags from the last submit attempt.
    pub field_errors: FieldErrors,
    /// Strength snapshot for the current password text.
    pub strength: PasswordStrength,
    /// Human-readable status line.
    pub status_line: String,
}

impl UiState {
    /// Creates default UI state in `Login` mode.
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            mode: AuthMode::Login,
            overlay: OverlayState::Hidden,
            submit: StageStatus::Idle,
            remembered_email: None,
            field_errors: FieldErrors::default(),
            strength: PasswordStrength {
                score: 0,
                label: StrengthLabel::None,
            },
            status_line: "Ready".to_string(),
        }
    }

    /// Applies a validation result to the per-field error flags.
    pub fn apply_validation(&mut self, result: &ValidationResult) {
        self.field_errors = FieldErrors::from_validation(result);
    }

    /// Clears all per-field error flags.
    pub fn clear_errors(&mut self) {
        self.field_errors = FieldErrors::default();
    }

    /// Updates the strength meter snapshot.
    pub fn set_strength(&mut self, strength: PasswordStrength) {
        self.strength = strength;
    }

    /// Sets the status line.
    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_line = status.into();
    }

    /// Returns `true` when the primary action may be pressed.
    pub fn can_submit(&self) -> bool {
        self.submit != StageStatus::Pending
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for UI state gates and projections.

    use klass_access_core::ValidationResult;

    use super::*;

    #[test]
    fn submit_gate_blocks_while_pending() {
        let mut state = UiState::new("v0.1.0");
        assert!(state.can_submit());

        state.submit = StageStatus::Pending;
        assert!(!state.can_submit());
    }

    #[test]
    fn field_errors_invert_validation_flags() {
        let errors = FieldErrors::from_validation(&ValidationResult {
            email_valid: false,
            password_valid: true,
            confirm_matches: false,
        });
        assert!(errors.email);
        assert!(!errors.password);
        assert!(errors.confirm);
        assert!(errors.any());
    }
}
