//! User form workflow for credentials login, signup and generic registration.
//!
//! This crate owns the validate → submit → resolve cycle shared by the login,
//! signup and register forms. Everything the workflow talks to (identity
//! provider, HTTP client, navigation) is injected through the traits in
//! [`net`], so hosts can swap the reqwest-backed collaborators for mocks.

pub mod config;
pub mod form;
pub mod net;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use config::{ConfigError, FormsConfig};
pub use form::{
    ActionToken, Collaborators, Field, FormFields, FormSnapshot, FormWorkflow, Mode, Phase, SocialOutcome,
    SocialProvider, Submission, SubmitError, SubmitOutcome, ValidFields, ValidationErrors, validate,
};
pub use net::{HttpClient, IdentityProvider, Navigator, RequestError};
