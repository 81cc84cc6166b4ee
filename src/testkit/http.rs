//! Mock [`HttpTransport`].

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::TransportError;
use crate::port::transport::{HttpResponse, HttpTransport};

type Outcome = Result<HttpResponse, TransportError>;

/// A transport with pre-loaded outcomes.
///
/// Routed outcomes (see [`route`](Self::route)) are matched by URL substring
/// first and repeat forever; otherwise each call pops the next scripted
/// outcome. An exhausted script answers with a transport error.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Outcome>>>,
    routes: Arc<Mutex<Vec<(String, Outcome)>>>,
    requests: Arc<Mutex<Vec<String>>>,
    call_count: Arc<AtomicU32>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcomes(outcomes: Vec<Outcome>) -> Self {
        let transport = Self::new();
        *transport.script.lock() = outcomes.into();
        transport
    }

    /// Queue a response with the given status and JSON body.
    pub fn push_json(&self, status: u16, body: &serde_json::Value) -> &Self {
        self.push(Ok(HttpResponse::new(status, body.to_string().into_bytes())))
    }

    /// Queue a bare status with an empty body.
    pub fn push_status(&self, status: u16) -> &Self {
        self.push(Ok(HttpResponse::new(status, Vec::new())))
    }

    pub fn push_error(&self, err: TransportError) -> &Self {
        self.push(Err(err))
    }

    pub fn push(&self, outcome: Outcome) -> &Self {
        self.script.lock().push_back(outcome);
        self
    }

    /// Answer every URL containing `fragment` with `status` and `body`.
    pub fn route(&self, fragment: &str, status: u16, body: &serde_json::Value) -> &Self {
        self.routes.lock().push((
            fragment.to_string(),
            Ok(HttpResponse::new(status, body.to_string().into_bytes())),
        ));
        self
    }

    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().clone()
    }

    /// Requests per URL, for asserting that a resource was fetched once.
    pub fn request_counts(&self) -> HashMap<String, usize> {
        let mut counts = HashMap::new();
        for url in self.requests.lock().iter() {
            *counts.entry(url.clone()).or_insert(0) += 1;
        }
        counts
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(url.to_string());

        let routed = self
            .routes
            .lock()
            .iter()
            .find(|(fragment, _)| url.contains(fragment.as_str()))
            .map(|(_, outcome)| outcome.clone());
        if let Some(outcome) = routed {
            return outcome;
        }

        self.script
            .lock()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Request(format!("script exhausted for {url}"))))
    }
}
