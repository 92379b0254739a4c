//! reqwest-backed [`HttpClient`].
//!
//! Non-2xx responses are turned into [`RequestError::Status`] with the body
//! decoded as JSON when possible, so the nested `message` a server sends on
//! failure is still available to error normalization.

use std::time::Duration;

use serde_json::Value;

use super::HttpClient;
use super::types::{HttpResponse, RequestError};
use crate::config::HttpTimeouts;

pub struct ReqwestHttpClient {
    http: reqwest::Client,
}

impl ReqwestHttpClient {
    /// # Errors
    ///
    /// Returns [`RequestError::ClientBuild`] if the TLS backend fails to initialize.
    pub fn new(timeouts: HttpTimeouts) -> Result<Self, RequestError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeouts.request_secs))
            .connect_timeout(Duration::from_secs(timeouts.connect_secs))
            .build()
            .map_err(|e| RequestError::ClientBuild(e.to_string()))?;
        Ok(Self { http })
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<HttpResponse, RequestError> {
        let response = request
            .send()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| RequestError::Transport(e.to_string()))?;
        classify_response(status, &text)
    }
}

#[async_trait::async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, RequestError> {
        tracing::debug!(%url, "GET");
        self.send(self.http.get(url)).await
    }

    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, RequestError> {
        tracing::debug!(%url, "POST");
        self.send(self.http.post(url).json(body)).await
    }
}

/// Map a raw status + body into the client's result shape.
///
/// Any 2xx is a success. A body that is not JSON is kept as a string.
pub(crate) fn classify_response(status: u16, text: &str) -> Result<HttpResponse, RequestError> {
    if !(200..300).contains(&status) {
        let body = serde_json::from_str::<Value>(text).ok();
        return Err(RequestError::Status { status, body });
    }
    if text.trim().is_empty() {
        return Ok(HttpResponse { status, data: Value::Null });
    }
    let data = serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_owned()));
    Ok(HttpResponse { status, data })
}

#[cfg(test)]
#[path = "http_test.rs"]
mod tests;
