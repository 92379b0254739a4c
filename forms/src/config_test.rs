use super::*;
use std::sync::Mutex;

// Env vars are process-global; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

const VARS: &[&str] = &[
    "FORMS_SIGNUP_URL",
    "FORMS_REGISTER_URL",
    "FORMS_CALLBACK_URL",
    "FORMS_AUTH_BASE_URL",
    "FORMS_API_BASE_URL",
    "FORMS_SIGNUP_REDIRECT_PATH",
    "FORMS_REQUEST_TIMEOUT_SECS",
    "FORMS_CONNECT_TIMEOUT_SECS",
];

/// # Safety
/// Callers hold `ENV_LOCK` so no other test mutates the environment concurrently.
unsafe fn clear_forms_env() {
    for var in VARS {
        unsafe { std::env::remove_var(var) };
    }
}

#[test]
fn from_env_uses_defaults() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe { clear_forms_env() };

    let cfg = FormsConfig::from_env().unwrap();
    assert_eq!(cfg, FormsConfig::default());
    assert_eq!(cfg.signup_url, "http://localhost:8080/user/signup");
    assert_eq!(cfg.register_url, "https://jsonplaceholder.typicode.com/posts");
    assert_eq!(cfg.callback_url, "http://localhost:3000");
    assert_eq!(cfg.signup_redirect_path, "/");
    assert_eq!(
        cfg.timeouts,
        HttpTimeouts { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    );
}

#[test]
fn from_env_parses_overrides() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forms_env();
        std::env::set_var("FORMS_SIGNUP_URL", "https://auth.example.test/signup");
        std::env::set_var("FORMS_CALLBACK_URL", "https://app.example.test/home");
        std::env::set_var("FORMS_AUTH_BASE_URL", "https://app.example.test/");
        std::env::set_var("FORMS_API_BASE_URL", "https://api.example.test//");
        std::env::set_var("FORMS_SIGNUP_REDIRECT_PATH", "/dashboard");
        std::env::set_var("FORMS_REQUEST_TIMEOUT_SECS", "5");
        std::env::set_var("FORMS_CONNECT_TIMEOUT_SECS", "2");
    }

    let cfg = FormsConfig::from_env().unwrap();
    assert_eq!(cfg.signup_url, "https://auth.example.test/signup");
    assert_eq!(cfg.callback_url, "https://app.example.test/home");
    assert_eq!(cfg.auth_base_url, "https://app.example.test");
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.signup_redirect_path, "/dashboard");
    assert_eq!(cfg.timeouts, HttpTimeouts { request_secs: 5, connect_secs: 2 });

    unsafe { clear_forms_env() };
}

#[test]
fn from_env_bad_timeout_falls_back_to_default() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forms_env();
        std::env::set_var("FORMS_REQUEST_TIMEOUT_SECS", "soon");
    }

    let cfg = FormsConfig::from_env().unwrap();
    assert_eq!(cfg.timeouts.request_secs, DEFAULT_REQUEST_TIMEOUT_SECS);

    unsafe { clear_forms_env() };
}

#[test]
fn from_env_rejects_non_http_url() {
    let _lock = ENV_LOCK.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
    unsafe {
        clear_forms_env();
        std::env::set_var("FORMS_REGISTER_URL", "ftp://files.example.test/posts");
    }

    let err = FormsConfig::from_env().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidUrl { var: "FORMS_REGISTER_URL", value: "ftp://files.example.test/posts".to_owned() }
    );
    assert!(err.to_string().contains("FORMS_REGISTER_URL"));

    unsafe { clear_forms_env() };
}

#[test]
fn check_url_trims_and_accepts_http_schemes() {
    assert_eq!(check_url("--callback-url", " https://app.example.test ").unwrap(), "https://app.example.test");
    assert_eq!(check_url("--api-base-url", "http://localhost:4000").unwrap(), "http://localhost:4000");
}

#[test]
fn check_url_rejects_other_schemes() {
    assert_eq!(
        check_url("--auth-base-url", "localhost:3000"),
        Err(ConfigError::InvalidUrl { var: "--auth-base-url", value: "localhost:3000".into() })
    );
}
