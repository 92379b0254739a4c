//! Form variants and the field set each one validates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which form a workflow instance drives. Fixed for the instance's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Create credentials on the auth backend, then enter the app.
    Signup,
    /// Create a record on the generic REST endpoint and show it back.
    Register,
    /// Credentials sign-in through the identity provider, plus social providers.
    Login,
}

/// An input on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Email,
    Password,
}

impl Field {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Password => "password",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const LOGIN_FIELDS: &[Field] = &[Field::Email, Field::Password];
const ACCOUNT_FIELDS: &[Field] = &[Field::Name, Field::Email, Field::Password];

impl Mode {
    pub const ALL: [Self; 3] = [Self::Signup, Self::Register, Self::Login];

    /// Fields rendered and validated in this mode, in display order.
    #[must_use]
    pub fn schema(self) -> &'static [Field] {
        match self {
            Self::Login => LOGIN_FIELDS,
            Self::Signup | Self::Register => ACCOUNT_FIELDS,
        }
    }

    #[must_use]
    pub fn requires(self, field: Field) -> bool {
        self.schema().contains(&field)
    }

    /// Only the login form offers Google/GitHub buttons.
    #[must_use]
    pub fn offers_social(self) -> bool {
        matches!(self, Self::Login)
    }

    #[must_use]
    pub fn submit_label(self) -> &'static str {
        match self {
            Self::Signup => "Sign Up",
            Self::Register => "Register",
            Self::Login => "Sign In",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Signup => "signup",
            Self::Register => "register",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "signup" => Ok(Self::Signup),
            "register" => Ok(Self::Register),
            "login" => Ok(Self::Login),
            other => Err(format!("unknown form mode: {other}")),
        }
    }
}

#[cfg(test)]
#[path = "mode_test.rs"]
mod tests;
