//! # Test Doubles
//!
//! [`MockTransport`] replaces the HTTP client with a queue of expectations:
//! each call pops the next one, checks the method and path, and replies as
//! scripted. [`ScriptedDialogs`] answers confirmations with a fixed value and
//! records every message shown.
//!
//! ```ignore
//! let mock = MockTransport::new();
//! mock.expect(Method::Get, "/people/1").respond_ok(json!({ ... }));
//! mock.expect(Method::Delete, "/people/1").respond_status(401);
//!
//! let people = PeopleService::new(mock.clone());
//! // Drive the code under test...
//! mock.verify(); // Every expectation was consumed
//! ```

use crate::api::{ApiRequest, ApiResponse, Method, Transport, TransportError};
use crate::screens::Dialogs;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

enum Reply {
    Respond(ApiResponse),
    Fail(TransportError),
    /// Never answers.
    Hang,
}

struct Expectation {
    method: Method,
    path: String,
    reply: Reply,
}

/// A [`Transport`] that replays scripted replies in order.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
    hanging: Arc<AtomicUsize>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects the next call to be `method path`.
    pub fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Hanging requests whose future has not been dropped yet.
    pub fn hanging(&self) -> usize {
        self.hanging.load(Ordering::SeqCst)
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        if !exps.is_empty() {
            panic!("Not all expectations were met. {} remaining", exps.len());
        }
    }
}

struct HangGuard(Arc<AtomicUsize>);

impl HangGuard {
    fn new(counter: Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for HangGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let expectation = self.expectations.lock().unwrap().pop_front();

        let expectation = match expectation {
            Some(exp) if exp.method == request.method && exp.path == request.path => exp,
            Some(exp) => panic!(
                "Expected {} {}, got {} {}",
                exp.method, exp.path, request.method, request.path
            ),
            None => panic!("Unexpected request {} {}", request.method, request.path),
        };

        match expectation.reply {
            Reply::Respond(response) => response.into_result(),
            Reply::Fail(error) => Err(error),
            Reply::Hang => {
                let _guard = HangGuard::new(self.hanging.clone());
                std::future::pending().await
            }
        }
    }
}

/// Builder for one expected call.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    fn push(self, reply: Reply) {
        self.expectations.lock().unwrap().push_back(Expectation {
            method: self.method,
            path: self.path,
            reply,
        });
    }

    pub fn respond(self, response: ApiResponse) {
        self.push(Reply::Respond(response));
    }

    /// `200` with `body`.
    pub fn respond_ok(self, body: Value) {
        self.respond(ApiResponse::ok(body));
    }

    /// Non-2xx statuses are delivered as failures.
    pub fn respond_json(self, status: u16, body: Value) {
        self.respond(ApiResponse {
            status,
            headers: HashMap::new(),
            body,
        });
    }

    /// Empty body with `status`.
    pub fn respond_status(self, status: u16) {
        self.respond_json(status, Value::Null);
    }

    pub fn fail(self, error: TransportError) {
        self.push(Reply::Fail(error));
    }

    /// No response received.
    pub fn fail_network(self) {
        self.fail(TransportError::network());
    }

    pub fn hang(self) {
        self.push(Reply::Hang);
    }
}

/// [`Dialogs`] that answer every confirmation with the same value.
#[derive(Clone, Default)]
pub struct ScriptedDialogs {
    confirm: bool,
    alerts: Arc<Mutex<Vec<String>>>,
    prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedDialogs {
    pub fn new(confirm: bool) -> Self {
        Self {
            confirm,
            ..Self::default()
        }
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.lock().unwrap().clone()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Dialogs for ScriptedDialogs {
    async fn alert(&self, message: &str) {
        self.alerts.lock().unwrap().push(message.to_string());
    }

    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.confirm
    }
}
