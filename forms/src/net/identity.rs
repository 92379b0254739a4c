//! HTTP identity provider speaking the NextAuth-style `/api/auth/*` routes.
//!
//! Credentials sign-in is a CSRF-token fetch followed by a form POST to
//! `/api/auth/callback/{provider}`; the provider answers with the URL the
//! browser should land on, carrying `?error=...` when the attempt failed.
//! Social sign-in needs no request here: the browser is sent straight to
//! `/api/auth/signin/{provider}`.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use super::IdentityProvider;
use super::types::{Credentials, RequestError, SignInOptions, SignInResponse};
use crate::config::HttpTimeouts;

pub struct HttpIdentityProvider {
    http: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CsrfResponse {
    csrf_token: String,
}

#[derive(Debug, Deserialize)]
struct CallbackResponse {
    url: Option<String>,
}

impl HttpIdentityProvider {
    /// # Errors
    ///
    /// Returns [`RequestError::ClientBuild`] if the HTTP client fails to build.
    pub fn new(base_url: &str, timeouts: HttpTimeouts) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| RequestError::ClientBuild(e.to_string()))?;
        Ok(Self { http, base_url: base_url.trim_end_matches('/').to_owned() })
    }

    async fn csrf_token(&self) -> Result<String, RequestError> {
        let url = format!("{}/api/auth/csrf", self.base_url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        if !response.status().is_success() {
            return Err(RequestError::Status { status, body: None });
        }
        let body: CsrfResponse = response
            .json()
            .await
            .map_err(|e| RequestError::Decode(e.to_string()))?;
        Ok(body.csrf_token)
    }

    async fn credentials_sign_in(
        &self,
        provider: &str,
        credentials: &Credentials,
        options: &SignInOptions,
    ) -> Result<SignInResponse, RequestError> {
        let csrf_token = self.csrf_token().await?;
        let url = format!("{}/api/auth/callback/{provider}", self.base_url);
        let form = credentials_form(credentials, options, &csrf_token);

        let response = self
            .http
            .post(url)
            .form(&form)
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        callback_result(status, &text)
    }
}

#[async_trait::async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn sign_in(
        &self,
        provider: &str,
        credentials: Option<&Credentials>,
        options: &SignInOptions,
    ) -> Result<SignInResponse, RequestError> {
        match credentials {
            Some(credentials) => self.credentials_sign_in(provider, credentials, options).await,
            None => {
                let url = signin_url(&self.base_url, provider, &options.callback_url)?;
                Ok(SignInResponse { error: None, status: None, ok: true, url: Some(url) })
            }
        }
    }
}

fn credentials_form(credentials: &Credentials, options: &SignInOptions, csrf_token: &str) -> Vec<(&'static str, String)> {
    vec![
        ("email", credentials.email.clone()),
        ("password", credentials.password.clone()),
        ("redirect", credentials.redirect.to_string()),
        ("callbackUrl", options.callback_url.clone()),
        ("csrfToken", csrf_token.to_owned()),
        ("json", "true".to_owned()),
    ]
}

/// Interpret the callback route's answer.
///
/// The provider reports rejected credentials through the `error` query
/// parameter of the returned URL, not through the status code.
fn callback_result(status: u16, text: &str) -> Result<SignInResponse, RequestError> {
    let parsed = serde_json::from_str::<CallbackResponse>(text).ok();
    let ok = (200..300).contains(&status);
    match parsed {
        Some(CallbackResponse { url }) => {
            let error = url.as_deref().and_then(error_from_url);
            Ok(SignInResponse { ok: ok && error.is_none(), error, status: Some(status), url })
        }
        None if ok => Err(RequestError::Decode(format!("unexpected callback body: {text}"))),
        None => Err(RequestError::Status { status, body: serde_json::from_str(text).ok() }),
    }
}

fn error_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key == "error")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

fn signin_url(base_url: &str, provider: &str, callback_url: &str) -> Result<String, RequestError> {
    let mut url = Url::parse(&format!("{base_url}/api/auth/signin/{provider}"))
        .map_err(|e| RequestError::Transport(format!("invalid auth URL: {e}")))?;
    url.query_pairs_mut().append_pair("callbackUrl", callback_url);
    Ok(url.into())
}

#[cfg(test)]
#[path = "identity_test.rs"]
mod tests;
