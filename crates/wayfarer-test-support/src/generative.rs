//! Test clients — scripted `GenerativeClient` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Semaphore;
use wayfarer_core::error::TransportError;
use wayfarer_core::generative::{GenerationRequest, GenerativeClient};

/// A client that replays a script of canned results and records every
/// request it receives, in order.
#[derive(Debug)]
pub struct ScriptedGenerativeClient {
    script: Mutex<VecDeque<Result<String, TransportError>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerativeClient {
    /// Create a client that answers calls with `script`, first to last.
    #[must_use]
    pub fn new(script: Vec<Result<String, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Returns a snapshot of every request received so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GenerativeClient for ScriptedGenerativeClient {
    async fn generate(&self, request: GenerationRequest) -> Result<String, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted: unexpected generate call")
    }
}

/// A client whose every call fails with a network-level transport error.
/// Useful for testing error-handling paths.
#[derive(Debug)]
pub struct FailingGenerativeClient;

#[async_trait]
impl GenerativeClient for FailingGenerativeClient {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, TransportError> {
        Err(TransportError::Network("connection refused".into()))
    }
}

/// A client that holds each call open until the test releases it.
///
/// Calls block on an internal gate, so the caller must run them on a
/// spawned task. Tests observe the blocked call with
/// [`GatedGenerativeClient::wait_until_in_flight`], exercise the
/// orchestration under test, then let the call complete with
/// [`GatedGenerativeClient::release`].
#[derive(Debug)]
pub struct GatedGenerativeClient {
    script: Mutex<VecDeque<Result<String, TransportError>>>,
    gate: Semaphore,
    in_flight: AtomicUsize,
}

impl GatedGenerativeClient {
    /// Create a gated client that answers released calls with `script`,
    /// first to last.
    #[must_use]
    pub fn new(script: Vec<Result<String, TransportError>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            gate: Semaphore::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Lets one blocked call proceed.
    pub fn release(&self) {
        self.gate.add_permits(1);
    }

    /// Number of calls currently blocked on the gate.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Yields until at least one call is blocked on the gate.
    pub async fn wait_until_in_flight(&self) {
        while self.in_flight() == 0 {
            tokio::task::yield_now().await;
        }
    }
}

#[async_trait]
impl GenerativeClient for GatedGenerativeClient {
    async fn generate(&self, _request: GenerationRequest) -> Result<String, TransportError> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let permit = self.gate.acquire().await.expect("gate closed");
        permit.forget();
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .expect("script exhausted: unexpected generate call")
    }
}
