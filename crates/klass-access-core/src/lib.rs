#![warn(missing_docs)]
//! # klass-access-core
//!
//! ## Purpose
//! Defines the pure form data model used across the `klass-access` workspace.
//!
//! ## Responsibilities
//! - Represent login/registration form state and its mode transitions.
//! - Validate email/password/confirmation input deterministically.
//! - Score password strength with the fixed additive heuristic.
//!
//! ## Data flow
//! Host input events mutate [`FormState`]. On submit, callers derive a
//! [`ValidationResult`] via [`validate`]; on every password keystroke they
//! derive a [`PasswordStrength`] via [`password_strength`].
//!
//! ## Ownership and lifetimes
//! Form fields are owned (`String`) so controllers can hold state across
//! events without borrowing from transient input buffers.
//!
//! ## Error model
//! This crate favors explicit result data over recoverable errors: invalid
//! input is reported per field in [`ValidationResult`], never as a fault.
//!
//! ## Security and privacy notes
//! Password text stays inside [`FormState`]; nothing in this crate logs or
//! serializes raw credential fields.
//!
//! ## Example
//! ```rust
//! use klass_access_core::{AuthMode, FormState, password_strength, validate};
//!
//! let mut form = FormState::new();
//! form.email = "a@b.com".to_string();
//! form.password = "abcdef".to_string();
//! assert!(validate(AuthMode::Login, &form).is_valid());
//! assert_eq!(password_strength("Password123!").score, 5);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Maximum password strength score.
pub const MAX_STRENGTH_SCORE: u8 = 5;

static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern should compile")
});

/// Which screen variant the form is presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthMode {
    /// Existing-account login form.
    Login,
    /// New-account registration form.
    Register,
}

/// Mutable form field state for the active screen variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    /// Active screen variant.
    pub mode: AuthMode,
    /// Email field text.
    pub email: String,
    /// Password field text.
    pub password: String,
    /// Confirmation field text (registration only).
    pub confirm_password: String,
    /// Whether the email should be remembered across launches.
    pub remember_email: bool,
}

impl FormState {
    /// Creates empty form state in `Login` mode.
    pub fn new() -> Self {
        Self {
            mode: AuthMode::Login,
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            remember_email: false,
        }
    }

    /// Clears both password fields.
    pub fn clear_passwords(&mut self) {
        self.password.clear();
        self.confirm_password.clear();
    }

    /// Flips between `Login` and `Register` and resets transient fields.
    ///
    /// # Semantics
    /// Password and confirmation are always cleared. Entering `Login`
    /// restores `remembered` into the email field (empty when absent);
    /// entering `Register` clears the email field.
    pub fn toggle_mode(&mut self, remembered: Option<&str>) {
        self.mode = match self.mode {
            AuthMode::Login => AuthMode::Register,
            AuthMode::Register => AuthMode::Login,
        };
        self.clear_passwords();
        self.email = match self.mode {
            AuthMode::Login => remembered.unwrap_or_default().to_string(),
            AuthMode::Register => String::new(),
        };
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-field validation outcome for one submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Email matches the `local@domain.tld` shape.
    pub email_valid: bool,
    /// Password meets the minimum length.
    pub password_valid: bool,
    /// Confirmation equals the password (always `true` in `Login` mode).
    pub confirm_matches: bool,
}

impl ValidationResult {
    /// Returns `true` when every field passed.
    pub fn is_valid(&self) -> bool {
        self.email_valid && self.password_valid && self.confirm_matches
    }
}

/// Lightweight email sanity check used before any submit is attempted.
pub fn valid_email(email: &str) -> bool {
    EMAIL_SHAPE.is_match(email)
}

/// Returns `true` when the password meets [`MIN_PASSWORD_LEN`].
pub fn valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

/// Validates form fields for the given mode.
///
/// Pure and deterministic; `confirm_matches` is only meaningful in
/// `Register` mode and reports `true` otherwise.
pub fn validate(mode: AuthMode, form: &FormState) -> ValidationResult {
    ValidationResult {
        email_valid: valid_email(&form.email),
        password_valid: valid_password(&form.password),
        confirm_matches: match mode {
            AuthMode::Login => true,
            AuthMode::Register => form.confirm_password == form.password,
        },
    }
}

/// Fixed label table for password strength scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthLabel {
    /// Score 0.
    None,
    /// Score 1.
    Weak,
    /// Score 2.
    Fair,
    /// Score 3.
    Good,
    /// Score 4.
    Strong,
    /// Score 5.
    Excellent,
}

impl StrengthLabel {
    /// Maps a score to its label; scores above the table clamp to the top.
    pub fn from_score(score: u8) -> Self {
        match score {
            0 => Self::None,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            4 => Self::Strong,
            _ => Self::Excellent,
        }
    }

    /// Display text for the label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
            Self::Excellent => "Excellent",
        }
    }
}

/// Password strength snapshot recomputed on every keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordStrength {
    /// Additive score in `0..=5`.
    pub score: u8,
    /// Label from the fixed score table.
    pub label: StrengthLabel,
}

impl PasswordStrength {
    /// Meter fill fraction in `[0.0, 1.0]` for strength bars.
    pub fn meter_fraction(&self) -> f32 {
        f32::from(self.score) / f32::from(MAX_STRENGTH_SCORE)
    }
}

/// Scores a password with the additive heuristic.
///
/// # Semantics
/// One point each for: length over 6, length over 10, an uppercase letter,
/// a digit, and a non-alphanumeric symbol. Empty input scores zero. The
/// score is monotonically non-decreasing in the number of satisfied
/// criteria.
pub fn password_strength(password: &str) -> PasswordStrength {
    let mut score = 0_u8;
    if !password.is_empty() {
        let length = password.chars().count();
        if length > 6 {
            score += 1;
        }
        if length > 10 {
            score += 1;
        }
        if password.chars().any(|c| c.is_ascii_uppercase()) {
            score += 1;
        }
        if password.chars().any(|c| c.is_ascii_digit()) {
            score += 1;
        }
        if password.chars().any(|c| !c.is_alphanumeric()) {
            score += 1;
        }
    }

    PasswordStrength {
        score,
        label: StrengthLabel::from_score(score),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for validation and strength scoring.

    use super::*;

    #[test]
    fn validates_documented_login_example() {
        let mut form = FormState::new();
        form.email = "a@b.com".to_string();
        form.password = "abcdef".to_string();

        let result = validate(AuthMode::Login, &form);
        assert!(result.email_valid);
        assert!(result.password_valid);
        assert!(result.confirm_matches);
        assert!(result.is_valid());
    }

    #[test]
    fn rejects_malformed_email_shapes() {
        assert!(valid_email("user@example.com"));
        assert!(!valid_email("user.example.com"));
        assert!(!valid_email("user@example"));
        assert!(!valid_email("us er@example.com"));
        assert!(!valid_email(""));
    }

    #[test]
    fn register_mode_requires_matching_confirmation() {
        let mut form = FormState::new();
        form.mode = AuthMode::Register;
        form.email = "a@b.com".to_string();
        form.password = "abcdef".to_string();
        form.confirm_password = "abcdeg".to_string();

        let result = validate(AuthMode::Register, &form);
        assert!(!result.confirm_matches);
        assert!(!result.is_valid());
    }

    #[test]
    fn strength_table_matches_fixed_labels() {
        assert_eq!(password_strength("").score, 0);
        assert_eq!(password_strength("").label, StrengthLabel::None);
        assert_eq!(password_strength("abcdefg").score, 1);
        assert_eq!(password_strength("Password123!").score, 5);
        assert_eq!(
            password_strength("Password123!").label,
            StrengthLabel::Excellent
        );
    }

    #[test]
    fn toggle_mode_round_trip_preserves_remembered_email() {
        let mut form = FormState::new();
        form.email = "saved@example.com".to_string();
        form.password = "abcdef".to_string();

        form.toggle_mode(Some("saved@example.com"));
        assert_eq!(form.mode, AuthMode::Register);
        assert!(form.email.is_empty());
        assert!(form.password.is_empty());

        form.toggle_mode(Some("saved@example.com"));
        assert_eq!(form.mode, AuthMode::Login);
        assert_eq!(form.email, "saved@example.com");
    }
}
