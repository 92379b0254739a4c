//! In-memory collaborators for workflow and fetch-helper tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use serde_json::Value;
use tokio::sync::Notify;

use crate::config::FormsConfig;
use crate::form::{Collaborators, FormWorkflow, Mode};
use crate::net::{
    Credentials, HttpClient, HttpResponse, IdentityProvider, RecordingNavigator, RequestError, SignInOptions,
    SignInResponse,
};

/// How a mock answers once it has recorded a call.
#[derive(Clone, Default)]
pub enum Pace {
    /// Answer right away.
    #[default]
    Immediate,
    /// Wait for the `Notify` before answering.
    Gated(Arc<Notify>),
    /// Never answer.
    Hang,
}

impl Pace {
    async fn wait(&self) {
        match self {
            Self::Immediate => {}
            Self::Gated(gate) => gate.notified().await,
            Self::Hang => std::future::pending::<()>().await,
        }
    }
}

// =========================================================================
// MockHttp
// =========================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct HttpCall {
    pub method: &'static str,
    pub url: String,
    pub body: Option<Value>,
}

#[derive(Default)]
pub struct MockHttp {
    responses: Mutex<VecDeque<Result<HttpResponse, RequestError>>>,
    calls: Mutex<Vec<HttpCall>>,
    pace: Pace,
}

impl MockHttp {
    pub fn new(responses: Vec<Result<HttpResponse, RequestError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), ..Self::default() }
    }

    pub fn with_pace(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }

    pub fn calls(&self) -> Vec<HttpCall> {
        self.calls.lock().unwrap().clone()
    }

    async fn answer(&self, call: HttpCall) -> Result<HttpResponse, RequestError> {
        self.calls.lock().unwrap().push(call);
        self.pace.wait().await;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Ok(HttpResponse { status: 200, data: Value::Null }))
    }
}

#[async_trait::async_trait]
impl HttpClient for MockHttp {
    async fn get(&self, url: &str) -> Result<HttpResponse, RequestError> {
        self.answer(HttpCall { method: "GET", url: url.to_owned(), body: None }).await
    }

    async fn post(&self, url: &str, body: &Value) -> Result<HttpResponse, RequestError> {
        self.answer(HttpCall { method: "POST", url: url.to_owned(), body: Some(body.clone()) }).await
    }
}

// =========================================================================
// MockIdentity
// =========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInCall {
    pub provider: String,
    pub credentials: Option<Credentials>,
    pub options: SignInOptions,
}

#[derive(Default)]
pub struct MockIdentity {
    responses: Mutex<VecDeque<Result<SignInResponse, RequestError>>>,
    calls: Mutex<Vec<SignInCall>>,
    pace: Pace,
}

impl MockIdentity {
    pub fn new(responses: Vec<Result<SignInResponse, RequestError>>) -> Self {
        Self { responses: Mutex::new(responses.into()), ..Self::default() }
    }

    pub fn with_pace(mut self, pace: Pace) -> Self {
        self.pace = pace;
        self
    }

    pub fn calls(&self) -> Vec<SignInCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl IdentityProvider for MockIdentity {
    async fn sign_in(
        &self,
        provider: &str,
        credentials: Option<&Credentials>,
        options: &SignInOptions,
    ) -> Result<SignInResponse, RequestError> {
        self.calls.lock().unwrap().push(SignInCall {
            provider: provider.to_owned(),
            credentials: credentials.cloned(),
            options: options.clone(),
        });
        self.pace.wait().await;
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SignInResponse::default()))
    }
}

// =========================================================================
// Harness
// =========================================================================

/// A workflow wired to mocks, with handles kept for assertions.
pub struct Harness {
    pub workflow: FormWorkflow,
    pub http: Arc<MockHttp>,
    pub identity: Arc<MockIdentity>,
    pub navigator: Arc<RecordingNavigator>,
}

pub fn harness(mode: Mode, http: MockHttp, identity: MockIdentity) -> Harness {
    let http = Arc::new(http);
    let identity = Arc::new(identity);
    let navigator = Arc::new(RecordingNavigator::new());
    let collaborators = Collaborators {
        identity: identity.clone(),
        http: http.clone(),
        navigator: navigator.clone(),
    };
    let workflow = FormWorkflow::new(mode, &FormsConfig::default(), collaborators);
    Harness { workflow, http, identity, navigator }
}

pub fn error_body(message: &str) -> RequestError {
    RequestError::Status { status: 400, body: Some(serde_json::json!({ "message": message })) }
}
