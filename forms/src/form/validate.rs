//! Field validation.
//!
//! Every rule runs on every attempt so the form can show all violations at
//! once instead of stopping at the first one.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::mode::{Field, Mode};

pub const NAME_REQUIRED: &str = "Name is required";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const MIN_PASSWORD_LEN: usize = 6;

/// Raw input values as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl FormFields {
    #[must_use]
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Password => &self.password,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Password => self.password = value,
        }
    }
}

/// Fields that passed the mode's schema. `name` is only present when the
/// mode asks for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidFields {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Field → message for every rule the input broke.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationErrors(BTreeMap<Field, String>);

impl ValidationErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_owned());
    }
}

/// Check `fields` against the schema for `mode`.
///
/// # Errors
///
/// Returns every violated field with its message.
pub fn validate(fields: &FormFields, mode: Mode) -> Result<ValidFields, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if mode.requires(Field::Name) && fields.name.is_empty() {
        errors.insert(Field::Name, NAME_REQUIRED);
    }
    if !is_valid_email(&fields.email) {
        errors.insert(Field::Email, INVALID_EMAIL);
    }
    if fields.password.chars().count() < MIN_PASSWORD_LEN {
        errors.insert(Field::Password, PASSWORD_TOO_SHORT);
    }

    if !errors.is_empty() {
        return Err(errors);
    }
    Ok(ValidFields {
        name: mode.requires(Field::Name).then(|| fields.name.clone()),
        email: fields.email.clone(),
        password: fields.password.clone(),
    })
}

/// Address grammar: `local@label.label...tld`.
///
/// Local part is `[A-Za-z0-9_'+.-]`, may not start or end with `.` or
/// contain `..`, and its last character may not be `'`. Domain labels
/// start alphanumeric and continue with alphanumerics or `-`; the TLD is at
/// least two ASCII letters.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if domain.contains('@') || email.contains("..") {
        return false;
    }
    valid_local_part(local) && valid_domain(domain)
}

fn valid_local_part(local: &str) -> bool {
    let Some(last) = local.chars().last() else {
        return false;
    };
    !local.starts_with('.')
        && last != '.'
        && last != '\''
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '\'' | '+' | '-' | '.'))
}

fn valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    let Some((tld, hosts)) = labels.split_last() else {
        return false;
    };
    if hosts.is_empty() || tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) {
        return false;
    }
    hosts.iter().all(|label| {
        let mut chars = label.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphanumeric())
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
#[path = "validate_test.rs"]
mod tests;
