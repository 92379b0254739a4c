//! Form endpoints and HTTP settings parsed from environment variables.

pub const DEFAULT_SIGNUP_URL: &str = "http://localhost:8080/user/signup";
pub const DEFAULT_REGISTER_URL: &str = "https://jsonplaceholder.typicode.com/posts";
pub const DEFAULT_CALLBACK_URL: &str = "http://localhost:3000";
pub const DEFAULT_AUTH_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
pub const DEFAULT_SIGNUP_REDIRECT_PATH: &str = "/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an http(s) URL, got '{value}'")]
    InvalidUrl { var: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for HttpTimeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormsConfig {
    /// Credentials-management endpoint hit by the signup form.
    pub signup_url: String,
    /// Generic resource endpoint hit by the register form.
    pub register_url: String,
    /// Where the identity provider sends the browser after sign-in.
    pub callback_url: String,
    /// Root of the identity provider's `/api/auth/*` routes.
    pub auth_base_url: String,
    /// Root of the mock REST API used by the fetch helpers.
    pub api_base_url: String,
    /// Path pushed to the navigator after a successful signup.
    pub signup_redirect_path: String,
    pub timeouts: HttpTimeouts,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            signup_url: DEFAULT_SIGNUP_URL.to_owned(),
            register_url: DEFAULT_REGISTER_URL.to_owned(),
            callback_url: DEFAULT_CALLBACK_URL.to_owned(),
            auth_base_url: DEFAULT_AUTH_BASE_URL.to_owned(),
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            signup_redirect_path: DEFAULT_SIGNUP_REDIRECT_PATH.to_owned(),
            timeouts: HttpTimeouts::default(),
        }
    }
}

impl FormsConfig {
    /// Build typed form config from environment variables.
    ///
    /// All optional:
    /// - `FORMS_SIGNUP_URL`, `FORMS_REGISTER_URL`, `FORMS_CALLBACK_URL`
    /// - `FORMS_AUTH_BASE_URL`, `FORMS_API_BASE_URL` (trailing `/` trimmed)
    /// - `FORMS_SIGNUP_REDIRECT_PATH`: default `/`
    /// - `FORMS_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FORMS_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidUrl`] when a URL variable is not http(s).
    pub fn from_env() -> Result<Self, ConfigError> {
        let signup_url = env_url("FORMS_SIGNUP_URL", DEFAULT_SIGNUP_URL)?;
        let register_url = env_url("FORMS_REGISTER_URL", DEFAULT_REGISTER_URL)?;
        let callback_url = env_url("FORMS_CALLBACK_URL", DEFAULT_CALLBACK_URL)?;
        let auth_base_url = env_url("FORMS_AUTH_BASE_URL", DEFAULT_AUTH_BASE_URL)?
            .trim_end_matches('/')
            .to_owned();
        let api_base_url = env_url("FORMS_API_BASE_URL", DEFAULT_API_BASE_URL)?
            .trim_end_matches('/')
            .to_owned();
        let signup_redirect_path = std::env::var("FORMS_SIGNUP_REDIRECT_PATH")
            .unwrap_or_else(|_| DEFAULT_SIGNUP_REDIRECT_PATH.to_owned());
        let timeouts = HttpTimeouts {
            request_secs: env_parse("FORMS_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: env_parse("FORMS_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
        };

        Ok(Self { signup_url, register_url, callback_url, auth_base_url, api_base_url, signup_redirect_path, timeouts })
    }
}

fn env_url(var: &'static str, default: &str) -> Result<String, ConfigError> {
    let value = std::env::var(var).unwrap_or_else(|_| default.to_owned());
    check_url(var, &value)
}

/// Trim `value` and require an `http://` or `https://` scheme.
///
/// `var` names the setting in the error.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidUrl`] for any other scheme.
pub fn check_url(var: &'static str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_owned())
    } else {
        Err(ConfigError::InvalidUrl { var, value: value.to_owned() })
    }
}

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
