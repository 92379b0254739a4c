//! Submission failures and the single rule that turns them into UI text.

use crate::net::RequestError;

pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

#[derive(Debug, Clone, thiserror::Error)]
pub enum SubmitError {
    /// The identity provider answered but rejected the attempt.
    #[error("sign-in rejected: {0}")]
    Auth(String),

    /// The call itself failed.
    #[error(transparent)]
    Network(#[from] RequestError),
}

impl SubmitError {
    /// Text shown under the form.
    ///
    /// Provider rejections are shown verbatim. Anything else shows the
    /// server's `message` when the response carried one, else
    /// [`FALLBACK_ERROR_MESSAGE`].
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::Auth(message) => message.clone(),
            Self::Network(err) => err
                .response_message()
                .unwrap_or(FALLBACK_ERROR_MESSAGE)
                .to_owned(),
        }
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
