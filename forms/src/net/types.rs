//! Request/response shapes shared by the collaborator traits.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// =============================================================================
// ERROR
// =============================================================================

/// Failure reaching a remote collaborator.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RequestError {
    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    /// The request never produced a response (DNS, TLS, timeout, ...).
    #[error("request failed: {0}")]
    Transport(String),

    /// The server answered with a non-success status.
    #[error("request failed with status {status}")]
    Status { status: u16, body: Option<Value> },

    /// The response body was not the JSON we expected.
    #[error("response decode failed: {0}")]
    Decode(String),
}

impl RequestError {
    /// The `message` field of the response body, when the server sent one.
    ///
    /// Empty strings count as absent.
    #[must_use]
    pub fn response_message(&self) -> Option<&str> {
        match self {
            Self::Status { body: Some(body), .. } => body
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// A decoded 2xx response.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub data: Value,
}

// =============================================================================
// IDENTITY
// =============================================================================

/// Fields handed to the `credentials` sign-in flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    /// Let the provider redirect the browser once the session is issued.
    pub redirect: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignInOptions {
    pub callback_url: String,
}

/// Result of a sign-in call that reached the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignInResponse {
    /// Provider error code/message, e.g. `"CredentialsSignin"`.
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub ok: bool,
    /// Where the provider wants the browser to go next.
    #[serde(default)]
    pub url: Option<String>,
}

impl SignInResponse {
    /// A non-empty `error`, if the provider rejected the attempt.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.is_empty())
    }
}

#[cfg(test)]
#[path = "types_test.rs"]
mod tests;
