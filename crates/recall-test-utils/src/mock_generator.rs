// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock generation collaborator for deterministic session tests.
//!
//! `MockGenerator` implements `GenerationAdapter` with a scripted queue of
//! replies and failures. A gated generator parks every call until the test
//! releases it, which makes "state changed while a reply was in flight"
//! reproducible.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::{Mutex, Notify};

use recall_core::{
    AdapterType, GenerationAdapter, GenerationRequest, HealthStatus, PluginAdapter, RecallError,
};

/// Text returned when the scripted queue is empty.
pub const DEFAULT_REPLY: &str = "mock reply";

#[derive(Debug, Default)]
struct Gate {
    started: Notify,
    release: Notify,
}

/// A generation adapter that replays pre-configured outcomes.
///
/// Outcomes are popped from a FIFO queue; when it is empty,
/// [`DEFAULT_REPLY`] is returned. Every request is recorded.
#[derive(Debug, Default)]
pub struct MockGenerator {
    outcomes: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
    gate: Option<Gate>,
}

impl MockGenerator {
    /// Create a mock generator with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock generator pre-loaded with successful replies.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            outcomes: Mutex::new(replies.into_iter().map(|r| Ok(r.into())).collect()),
            ..Self::default()
        }
    }

    /// Park every `generate` call until [`release`](Self::release) is called.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Gate::default());
        self
    }

    /// Queue a successful reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.outcomes.lock().await.push_back(Ok(text.into()));
    }

    /// Queue a failure carrying `message`.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.outcomes.lock().await.push_back(Err(message.into()));
    }

    /// Resolves once a gated `generate` call has started waiting.
    ///
    /// Returns immediately on an ungated generator.
    pub async fn wait_started(&self) {
        if let Some(gate) = &self.gate {
            gate.started.notified().await;
        }
    }

    /// Lets one parked `generate` call finish.
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.release.notify_one();
        }
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().await.clone()
    }

    /// The most recent request, if any.
    pub async fn last_request(&self) -> Option<GenerationRequest> {
        self.requests.lock().await.last().cloned()
    }
}

#[async_trait]
impl PluginAdapter for MockGenerator {
    fn name(&self) -> &str {
        "mock-generator"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl GenerationAdapter for MockGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RecallError> {
        self.requests.lock().await.push(request);

        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }

        let next = self.outcomes.lock().await.pop_front();
        match next {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => {
                tracing::debug!(%message, "mock generator failing on request");
                Err(RecallError::Generation {
                    message,
                    source: None,
                })
            }
            None => Ok(DEFAULT_REPLY.to_string()),
        }
    }
}
