//! Per-instance form state and its transitions.
//!
//! DESIGN
//! ======
//! `FormState` is plain data with synchronous transitions; the async
//! workflow in the parent module only locks it around those calls and never
//! across an `.await`. The phase doubles as the mutual-exclusion marker:
//! `Phase::Submitting(token)` is the only way an [`ActionToken`] is set.
//!
//! ```text
//! Idle ──submit──▶ Validating ──invalid──▶ Idle (field errors)
//!                      │
//!                    valid
//!                      ▼
//!              Submitting(token) ──ok──▶ Success ──reset (register)──▶ Idle
//!                      │
//!                    error
//!                      ▼
//!                 Failed(msg) ──submit──▶ Validating
//! ```
//!
//! A social action parks the current phase and restores it once settled, so
//! it never touches the primary error message.

use serde::{Deserialize, Serialize};

use super::action::{ActionToken, SocialProvider};
use super::error::SubmitError;
use super::mode::{Field, Mode};
use super::validate::{FormFields, ValidFields, ValidationErrors, validate};

/// Record echoed back by the register endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl RegisteredUser {
    /// One `*` per password character.
    #[must_use]
    pub fn masked_password(&self) -> String {
        "*".repeat(self.password.chars().count())
    }
}

/// What a successful submission produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Submission {
    /// Credentials created; the user was sent into the app.
    SignedUp,
    /// Record created and retained for the confirmation view.
    Registered { user: RegisteredUser },
    /// Identity provider accepted the credentials.
    SignedIn { url: Option<String> },
}

impl Submission {
    #[must_use]
    pub fn registered(&self) -> Option<&RegisteredUser> {
        match self {
            Self::Registered { user } => Some(user),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "detail", rename_all = "snake_case")]
pub enum Phase {
    Idle,
    Validating,
    Submitting(ActionToken),
    Success(Submission),
    Failed(String),
}

/// Result of pressing the primary submit button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another action holds the form; nothing was sent.
    Busy(ActionToken),
    /// A registered record is on display; reset first.
    Locked,
    /// Validation failed; field errors are populated.
    Invalid(ValidationErrors),
    Succeeded(Submission),
    /// Normalized message now shown under the form.
    Failed(String),
}

/// Result of pressing a social provider button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocialOutcome {
    Busy(ActionToken),
    /// This form has no social buttons.
    Unavailable,
    /// Provider accepted; the browser should follow `url`.
    Redirected(Option<String>),
    /// Provider failed; logged, not shown.
    Swallowed,
}

/// Read model handed to whatever renders the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormSnapshot {
    pub mode: Mode,
    pub phase: Phase,
    pub action: Option<ActionToken>,
    pub fields: FormFields,
    pub field_errors: ValidationErrors,
    pub error_message: Option<String>,
    pub registered: Option<RegisteredUser>,
    pub controls_disabled: bool,
    pub fields_editable: bool,
    pub show_password: bool,
    pub show_registered_password: bool,
}

impl FormSnapshot {
    /// Registered password as it should be displayed: clear text only when
    /// toggled visible.
    #[must_use]
    pub fn registered_password_display(&self) -> Option<String> {
        self.registered.as_ref().map(|user| {
            if self.show_registered_password {
                user.password.clone()
            } else {
                user.masked_password()
            }
        })
    }
}

#[derive(Debug, Clone)]
pub struct FormState {
    mode: Mode,
    phase: Phase,
    fields: FormFields,
    field_errors: ValidationErrors,
    error_message: Option<String>,
    show_password: bool,
    show_registered_password: bool,
    /// Phase to restore once a social action settles.
    parked: Option<Phase>,
}

impl FormState {
    #[must_use]
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
            fields: FormFields::default(),
            field_errors: ValidationErrors::default(),
            error_message: None,
            show_password: false,
            show_registered_password: false,
            parked: None,
        }
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    #[must_use]
    pub fn action(&self) -> Option<ActionToken> {
        match self.phase {
            Phase::Submitting(token) => Some(token),
            _ => None,
        }
    }

    fn retained_registration(&self) -> Option<&RegisteredUser> {
        match &self.phase {
            Phase::Success(submission) => submission.registered(),
            _ => None,
        }
    }

    #[must_use]
    pub fn controls_disabled(&self) -> bool {
        self.action().is_some()
    }

    #[must_use]
    pub fn fields_editable(&self) -> bool {
        !self.controls_disabled() && self.retained_registration().is_none()
    }

    /// Update one input. Refused while the form is locked or for a field the
    /// mode does not render.
    pub fn set_field(&mut self, field: Field, value: String) -> bool {
        if !self.fields_editable() || !self.mode.requires(field) {
            return false;
        }
        self.fields.set(field, value);
        true
    }

    /// `Idle/Failed/Success → Validating → Submitting | Idle`.
    ///
    /// # Errors
    ///
    /// Returns the outcome to report when nothing should be dispatched.
    pub fn begin_submit(&mut self) -> Result<ValidFields, SubmitOutcome> {
        if let Some(token) = self.action() {
            return Err(SubmitOutcome::Busy(token));
        }
        if self.retained_registration().is_some() {
            return Err(SubmitOutcome::Locked);
        }

        self.phase = Phase::Validating;
        self.error_message = None;
        match validate(&self.fields, self.mode) {
            Ok(valid) => {
                self.field_errors = ValidationErrors::default();
                self.phase = Phase::Submitting(ActionToken::Credentials);
                Ok(valid)
            }
            Err(errors) => {
                self.field_errors = errors.clone();
                self.phase = Phase::Idle;
                Err(SubmitOutcome::Invalid(errors))
            }
        }
    }

    /// `Submitting → Success | Failed`.
    pub fn finish_submit(&mut self, result: Result<Submission, SubmitError>) -> SubmitOutcome {
        match result {
            Ok(submission) => {
                self.phase = Phase::Success(submission.clone());
                SubmitOutcome::Succeeded(submission)
            }
            Err(err) => {
                let message = err.display_message();
                self.error_message = Some(message.clone());
                self.phase = Phase::Failed(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    /// Park the current phase and mark `provider` in flight.
    ///
    /// # Errors
    ///
    /// Returns the outcome to report when nothing should be dispatched.
    pub fn begin_social(&mut self, provider: SocialProvider) -> Result<(), SocialOutcome> {
        if !self.mode.offers_social() {
            return Err(SocialOutcome::Unavailable);
        }
        if let Some(token) = self.action() {
            return Err(SocialOutcome::Busy(token));
        }
        let previous = std::mem::replace(&mut self.phase, Phase::Submitting(ActionToken::Social(provider)));
        self.parked = Some(previous);
        Ok(())
    }

    /// Clear `token` if it still holds the form.
    ///
    /// Runs on every exit path of a dispatch, including cancellation. A
    /// credentials submit that never resolved falls back to `Idle`; a social
    /// action restores the parked phase.
    pub fn release(&mut self, token: ActionToken) {
        if self.action() != Some(token) {
            return;
        }
        self.phase = match token {
            ActionToken::Credentials => Phase::Idle,
            ActionToken::Social(_) => self.parked.take().unwrap_or(Phase::Idle),
        };
    }

    /// `Success → Idle` for the register form: drop the record and every
    /// input so another user can be registered.
    pub fn reset(&mut self) -> bool {
        if self.mode != Mode::Register || self.retained_registration().is_none() {
            return false;
        }
        *self = Self::new(self.mode);
        true
    }

    pub fn toggle_password_visibility(&mut self) {
        self.show_password = !self.show_password;
    }

    /// Only meaningful while a registered record is on display.
    pub fn toggle_registered_password_visibility(&mut self) -> bool {
        if self.retained_registration().is_none() {
            return false;
        }
        self.show_registered_password = !self.show_registered_password;
        true
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            mode: self.mode,
            phase: self.phase.clone(),
            action: self.action(),
            fields: self.fields.clone(),
            field_errors: self.field_errors.clone(),
            error_message: self.error_message.clone(),
            registered: self.retained_registration().cloned(),
            controls_disabled: self.controls_disabled(),
            fields_editable: self.fields_editable(),
            show_password: self.show_password,
            show_registered_password: self.show_registered_password,
        }
    }
}

#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
