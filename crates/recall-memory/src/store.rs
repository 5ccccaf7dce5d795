// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Append-only conversation history with write-through persistence.
//!
//! Every mutation saves the whole history under one blob-store key.
//! Persistence failures never fail the mutation: they are reported to the
//! diagnostics sink and returned as a [`PersistOutcome`] so callers can
//! inspect them, while the in-memory history stays authoritative.

use std::sync::Arc;

use recall_core::{BlobStore, DiagnosticEvent, DiagnosticsSink, RecallError, Role, TracingDiagnostics};
use tracing::{debug, info};

use crate::codec::{decode_history, encode_history};
use crate::types::Message;

/// Message count at which a conversation is long enough for a topic summary.
pub const DEFAULT_SUMMARY_THRESHOLD: usize = 20;

/// Result of the write-through save that follows a mutation.
#[derive(Debug)]
pub enum PersistOutcome {
    Saved,
    /// The save failed; the in-memory history is still valid.
    Failed(RecallError),
}

impl PersistOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistOutcome::Saved)
    }
}

/// Result of [`MessageStore::load`].
#[derive(Debug)]
pub enum LoadOutcome {
    /// This many messages were restored.
    Restored(usize),
    /// Nothing was persisted yet, or the persisted history is empty.
    Empty,
    /// Reading or decoding failed; the store was reset to empty.
    Reset(RecallError),
}

/// Ordered, append-only log of chat turns.
///
/// Insertion order is chronological order. The only removal is
/// [`clear`](Self::clear), which empties the whole log.
pub struct MessageStore {
    messages: Vec<Message>,
    /// Bumped on every clear and load. A pending reply captured under an
    /// older epoch belongs to a history that no longer exists.
    epoch: u64,
    backend: Arc<dyn BlobStore>,
    key: String,
    diagnostics: Arc<dyn DiagnosticsSink>,
    summary_threshold: usize,
}

impl MessageStore {
    /// Creates an empty store persisting under `key`.
    ///
    /// Nothing is read from the backend until [`load`](Self::load) is called.
    pub fn new(backend: Arc<dyn BlobStore>, key: impl Into<String>) -> Self {
        Self {
            messages: Vec::new(),
            epoch: 0,
            backend,
            key: key.into(),
            diagnostics: Arc::new(TracingDiagnostics),
            summary_threshold: DEFAULT_SUMMARY_THRESHOLD,
        }
    }

    /// Routes persistence failures to `sink` instead of the tracing default.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    /// Overrides the long-conversation threshold.
    pub fn with_summary_threshold(mut self, threshold: usize) -> Self {
        self.summary_threshold = threshold;
        self
    }

    /// Appends a turn stamped with the current wall-clock time.
    pub fn append(&mut self, role: Role, content: &str) -> PersistOutcome {
        self.append_at(role, content, chrono::Utc::now().timestamp_millis())
    }

    /// Appends a turn with an explicit millisecond timestamp.
    pub fn append_at(&mut self, role: Role, content: &str, timestamp: i64) -> PersistOutcome {
        self.messages.push(Message::new(role, content, timestamp));
        metrics::counter!("recall_messages_appended_total", "role" => role.as_str()).increment(1);
        debug!(
            role = %role,
            timestamp,
            len = self.messages.len(),
            "message appended"
        );
        self.persist()
    }

    /// Read-only view of the history, oldest first.
    pub fn all(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Current liveness epoch.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Empties the history and saves the empty state.
    pub fn clear(&mut self) -> PersistOutcome {
        let dropped = self.messages.len();
        self.messages.clear();
        self.epoch += 1;
        info!(dropped, epoch = self.epoch, "history cleared");
        self.persist()
    }

    /// Replaces the in-memory history with the persisted one.
    ///
    /// A missing blob is not an error. Read and decode failures are
    /// reported and leave the store empty.
    pub fn load(&mut self) -> LoadOutcome {
        self.epoch += 1;
        self.messages.clear();

        let blob = match self.backend.read(&self.key) {
            Ok(Some(blob)) => blob,
            Ok(None) => {
                debug!(key = %self.key, "no persisted history");
                return LoadOutcome::Empty;
            }
            Err(e) => {
                self.diagnostics
                    .report(DiagnosticEvent::PersistenceReadFailure, &e.to_string());
                return LoadOutcome::Reset(e);
            }
        };

        match decode_history(&blob) {
            Ok(messages) if messages.is_empty() => LoadOutcome::Empty,
            Ok(messages) => {
                let restored = messages.len();
                self.messages = messages;
                info!(key = %self.key, restored, "history loaded");
                LoadOutcome::Restored(restored)
            }
            Err(e) => {
                self.diagnostics
                    .report(DiagnosticEvent::PersistenceCorrupt, &e.to_string());
                LoadOutcome::Reset(e)
            }
        }
    }

    /// True once the conversation is long enough for a topic summary.
    pub fn summary_eligible(&self) -> bool {
        self.messages.len() >= self.summary_threshold
    }

    fn persist(&self) -> PersistOutcome {
        let saved = encode_history(&self.messages)
            .and_then(|blob| self.backend.write(&self.key, &blob));
        match saved {
            Ok(()) => PersistOutcome::Saved,
            Err(e) => {
                self.diagnostics
                    .report(DiagnosticEvent::PersistenceWriteFailure, &e.to_string());
                PersistOutcome::Failed(e)
            }
        }
    }
}

impl std::fmt::Debug for MessageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageStore")
            .field("len", &self.messages.len())
            .field("epoch", &self.epoch)
            .field("backend", &self.backend.name())
            .field("key", &self.key)
            .finish()
    }
}
