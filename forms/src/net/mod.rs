//! Collaborators the form workflow talks to.
//!
//! DESIGN
//! ======
//! The workflow never reaches for a global router or session client. Each
//! collaborator is a trait object handed to [`crate::form::FormWorkflow`], so
//! tests drive the full submit path with in-memory mocks and hosts plug in
//! the reqwest-backed implementations from [`http`] and [`identity`].

pub mod api;
pub mod http;
pub mod identity;
pub mod types;

use std::sync::Mutex;

pub use types::{Credentials, HttpResponse, RequestError, SignInOptions, SignInResponse};

/// Identity/session provider. Enables mocking in tests.
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Start a sign-in with `provider` (`"credentials"`, `"google"`, ...).
    ///
    /// Bad credentials are reported through [`SignInResponse::error`], not as
    /// an `Err`.
    ///
    /// # Errors
    ///
    /// Returns a [`RequestError`] when the provider cannot be reached.
    async fn sign_in(
        &self,
        provider: &str,
        credentials: Option<&Credentials>,
        options: &SignInOptions,
    ) -> Result<SignInResponse, RequestError>;
}

/// JSON-over-HTTP client.
#[async_trait::async_trait]
pub trait HttpClient: Send + Sync {
    /// # Errors
    ///
    /// Returns a [`RequestError`] on transport failure or a non-2xx status.
    async fn get(&self, url: &str) -> Result<HttpResponse, RequestError>;

    /// # Errors
    ///
    /// Returns a [`RequestError`] on transport failure or a non-2xx status.
    async fn post(&self, url: &str, body: &serde_json::Value) -> Result<HttpResponse, RequestError>;
}

/// Client-side router.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths pushed so far, oldest first.
    #[must_use]
    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn push(&self, path: &str) {
        tracing::debug!(%path, "navigate");
        self.visited
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(path.to_owned());
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
