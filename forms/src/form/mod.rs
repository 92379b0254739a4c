//! Form workflow: validate, submit and resolve one user action at a time.
//!
//! DESIGN
//! ======
//! One [`FormWorkflow`] backs one rendered form. The mode picks the schema and
//! the submission strategy:
//!
//! - `Signup`: POST to the credentials endpoint, then navigate into the app.
//! - `Register`: POST to the generic resource endpoint and keep the echoed
//!   record on screen until [`FormWorkflow::reset`].
//! - `Login`: hand email/password to the identity provider; Google/GitHub
//!   buttons go through [`FormWorkflow::social_sign_in`].
//!
//! ERROR HANDLING
//! ==============
//! Nothing escapes the workflow. Credentials failures become the single
//! displayed message via [`SubmitError::display_message`]. Social provider
//! failures are logged and dropped; they never replace that message.

pub mod action;
pub mod error;
pub mod mode;
pub mod state;
pub mod validate;

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use action::{ActionToken, SocialProvider};
pub use error::{FALLBACK_ERROR_MESSAGE, SubmitError};
pub use mode::{Field, Mode};
pub use state::{FormSnapshot, FormState, Phase, RegisteredUser, SocialOutcome, Submission, SubmitOutcome};
pub use validate::{FormFields, ValidFields, ValidationErrors, validate};

use crate::config::FormsConfig;
use crate::net::{Credentials, HttpClient, IdentityProvider, Navigator, RequestError, SignInOptions};

/// Provider id for email/password sign-in.
pub const CREDENTIALS_PROVIDER: &str = "credentials";

/// Invoked after any successful submission.
pub type CompletionCallback = Arc<dyn Fn() + Send + Sync>;

/// External services a workflow submits through.
#[derive(Clone)]
pub struct Collaborators {
    pub identity: Arc<dyn IdentityProvider>,
    pub http: Arc<dyn HttpClient>,
    pub navigator: Arc<dyn Navigator>,
}

/// Destinations a workflow needs, lifted out of [`FormsConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub signup_url: String,
    pub register_url: String,
    pub callback_url: String,
    pub signup_redirect_path: String,
}

impl From<&FormsConfig> for Endpoints {
    fn from(config: &FormsConfig) -> Self {
        Self {
            signup_url: config.signup_url.clone(),
            register_url: config.register_url.clone(),
            callback_url: config.callback_url.clone(),
            signup_redirect_path: config.signup_redirect_path.clone(),
        }
    }
}

pub struct FormWorkflow {
    mode: Mode,
    endpoints: Endpoints,
    collaborators: Collaborators,
    on_success: Option<CompletionCallback>,
    state: Mutex<FormState>,
}

impl FormWorkflow {
    #[must_use]
    pub fn new(mode: Mode, config: &FormsConfig, collaborators: Collaborators) -> Self {
        Self {
            mode,
            endpoints: Endpoints::from(config),
            collaborators,
            on_success: None,
            state: Mutex::new(FormState::new(mode)),
        }
    }

    #[must_use]
    pub fn with_on_success(mut self, callback: CompletionCallback) -> Self {
        self.on_success = Some(callback);
        self
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    fn state(&self) -> MutexGuard<'_, FormState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[must_use]
    pub fn snapshot(&self) -> FormSnapshot {
        self.state().snapshot()
    }

    /// Type into one input. Returns `false` when the input is disabled.
    pub fn set_field(&self, field: Field, value: impl Into<String>) -> bool {
        self.state().set_field(field, value.into())
    }

    pub fn toggle_password_visibility(&self) {
        self.state().toggle_password_visibility();
    }

    pub fn toggle_registered_password_visibility(&self) -> bool {
        self.state().toggle_registered_password_visibility()
    }

    /// "Register another user": back to an empty, editable form.
    pub fn reset(&self) -> bool {
        let reset = self.state().reset();
        if reset {
            tracing::debug!(mode = %self.mode, "form reset");
        }
        reset
    }

    /// Primary submit button.
    ///
    /// Validates the current inputs, then dispatches through the mode's
    /// strategy while holding [`ActionToken::Credentials`]. A click while any
    /// action is in flight returns [`SubmitOutcome::Busy`] without calling a
    /// collaborator.
    pub async fn submit(&self) -> SubmitOutcome {
        let begun = self.state().begin_submit();
        let valid = match begun {
            Ok(valid) => valid,
            Err(outcome) => {
                tracing::debug!(mode = %self.mode, ?outcome, "submit not dispatched");
                return outcome;
            }
        };

        let token = TokenGuard { workflow: self, token: ActionToken::Credentials };
        tracing::info!(mode = %self.mode, "submitting form");
        let result = self.dispatch(&valid).await;

        match &result {
            Ok(_) => {
                tracing::info!(mode = %self.mode, "form submitted");
                if let Some(callback) = &self.on_success {
                    callback();
                }
            }
            Err(e) => tracing::warn!(mode = %self.mode, error = %e, "form submission failed"),
        }
        let outcome = self.state().finish_submit(result);
        drop(token);
        outcome
    }

    /// Run the mode's submission strategy for already-validated fields.
    ///
    /// Touches no form state; [`FormWorkflow::submit`] wraps it with the
    /// token and error bookkeeping.
    ///
    /// # Errors
    ///
    /// [`SubmitError::Auth`] when the identity provider rejects the
    /// credentials, [`SubmitError::Network`] when a call fails.
    pub async fn dispatch(&self, fields: &ValidFields) -> Result<Submission, SubmitError> {
        match self.mode {
            Mode::Signup => {
                let body = to_body(fields)?;
                self.collaborators
                    .http
                    .post(&self.endpoints.signup_url, &body)
                    .await?;
                self.collaborators
                    .navigator
                    .push(&self.endpoints.signup_redirect_path);
                Ok(Submission::SignedUp)
            }
            Mode::Register => {
                let body = to_body(fields)?;
                let response = self
                    .collaborators
                    .http
                    .post(&self.endpoints.register_url, &body)
                    .await?;
                let user = serde_json::from_value::<RegisteredUser>(response.data)
                    .map_err(|e| RequestError::Decode(e.to_string()))?;
                Ok(Submission::Registered { user })
            }
            Mode::Login => {
                let credentials =
                    Credentials { email: fields.email.clone(), password: fields.password.clone(), redirect: true };
                let response = self
                    .collaborators
                    .identity
                    .sign_in(CREDENTIALS_PROVIDER, Some(&credentials), &self.sign_in_options())
                    .await?;
                if let Some(error) = response.failure() {
                    return Err(SubmitError::Auth(error.to_owned()));
                }
                Ok(Submission::SignedIn { url: response.url })
            }
        }
    }

    /// Google/GitHub button on the login form.
    ///
    /// Shares the in-flight lock with the primary button. Provider failures
    /// are logged and never reach the displayed error message.
    pub async fn social_sign_in(&self, provider: SocialProvider) -> SocialOutcome {
        let begun = self.state().begin_social(provider);
        if let Err(outcome) = begun {
            tracing::debug!(%provider, ?outcome, "social sign-in not dispatched");
            return outcome;
        }

        let _token = TokenGuard { workflow: self, token: ActionToken::Social(provider) };
        tracing::info!(%provider, "social sign-in");
        let result = self
            .collaborators
            .identity
            .sign_in(provider.id(), None, &self.sign_in_options())
            .await;

        match result {
            Ok(response) => {
                if let Some(error) = response.failure() {
                    tracing::error!(%provider, %error, "social sign-in rejected");
                    return SocialOutcome::Swallowed;
                }
                SocialOutcome::Redirected(response.url)
            }
            Err(e) => {
                tracing::error!(%provider, error = %e, "social sign-in failed");
                SocialOutcome::Swallowed
            }
        }
    }

    fn sign_in_options(&self) -> SignInOptions {
        SignInOptions { callback_url: self.endpoints.callback_url.clone() }
    }
}

/// Clears the action token on every exit path of a dispatch, including a
/// dropped future.
struct TokenGuard<'a> {
    workflow: &'a FormWorkflow,
    token: ActionToken,
}

impl Drop for TokenGuard<'_> {
    fn drop(&mut self) {
        self.workflow.state().release(self.token);
    }
}

fn to_body(fields: &ValidFields) -> Result<serde_json::Value, RequestError> {
    serde_json::to_value(fields).map_err(|e| RequestError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
