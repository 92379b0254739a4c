//! In-flight action markers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Third-party identity delegates offered on the login form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialProvider {
    Google,
    GitHub,
}

impl SocialProvider {
    pub const ALL: [Self; 2] = [Self::Google, Self::GitHub];

    /// Provider id understood by the identity provider.
    #[must_use]
    pub fn id(self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Google => "Google",
            Self::GitHub => "GitHub",
        }
    }
}

impl fmt::Display for SocialProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for SocialProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == s)
            .ok_or_else(|| format!("unknown social provider: {s}"))
    }
}

/// Which action currently holds the form. While one is set, every control
/// on the form is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "provider", rename_all = "lowercase")]
pub enum ActionToken {
    /// The primary submit button.
    Credentials,
    Social(SocialProvider),
}

impl fmt::Display for ActionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Credentials => f.write_str("credentials"),
            Self::Social(provider) => f.write_str(provider.id()),
        }
    }
}

#[cfg(test)]
#[path = "action_test.rs"]
mod tests;
