// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! One chat conversation: history, context assembly, and generation.
//!
//! A turn goes: append the user message -> assemble context -> release the
//! store -> await the generator -> re-lock and append the reply. The store
//! lock is never held across the generation await, so `clear` and `attach`
//! from another task can interleave with an in-flight turn. The store epoch
//! captured before the await decides whether the reply is still wanted.
//!
//! Anything that reaches the blob store (append, clear, load) runs on the
//! blocking pool with the store lock held, so file and SQLite I/O never
//! stalls a runtime worker.

use std::sync::{Arc, LazyLock};

use recall_config::RecallConfig;
use recall_context::{AssembledContext, ContextEngine};
use recall_core::{
    Attachment, BlobStore, DiagnosticEvent, DiagnosticsSink, GenerationAdapter,
    GenerationRequest, RecallError, Role, TracingDiagnostics,
};
use recall_memory::{LoadOutcome, Message, MessageStore, PersistOutcome};
use regex::Regex;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

/// Shown when the generator answers with no usable text.
pub const FALLBACK_REPLY: &str = "Sorry, I couldn't process your request.";

/// Shown when the generator fails.
pub const FAILURE_REPLY: &str = "Sorry, I encountered an error. Please try again.";

static BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").unwrap());

/// What happened to one call to [`ChatSession::send`].
#[derive(Debug)]
pub enum TurnOutcome {
    /// The input was blank; nothing was recorded or sent.
    Ignored,
    /// The reply was appended to the history.
    Replied { text: String },
    /// The history was cleared or reloaded while the reply was in flight,
    /// so the reply was dropped.
    Discarded { text: String },
    /// The generator failed. `text` is the user-facing apology; nothing was
    /// appended for the bot.
    Failed { text: String, error: RecallError },
}

impl TurnOutcome {
    /// Text to show the user, if any.
    pub fn display_text(&self) -> Option<&str> {
        match self {
            TurnOutcome::Replied { text } | TurnOutcome::Failed { text, .. } => Some(text),
            TurnOutcome::Ignored | TurnOutcome::Discarded { .. } => None,
        }
    }

    pub fn is_replied(&self) -> bool {
        matches!(self, TurnOutcome::Replied { .. })
    }
}

/// Strips `**bold**` markers and trims; empty text becomes [`FALLBACK_REPLY`].
pub fn clean_reply(raw: &str) -> String {
    let stripped = BOLD.replace_all(raw, "$1");
    let trimmed = stripped.trim();
    if trimmed.is_empty() {
        FALLBACK_REPLY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// A single conversation with its own history, context engine, and
/// generator.
pub struct ChatSession {
    store: Arc<Mutex<MessageStore>>,
    engine: ContextEngine,
    generator: Arc<dyn GenerationAdapter>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    system_prompt: String,
    /// Consumed by the next turn, whatever its outcome.
    attachment: Mutex<Option<Attachment>>,
}

impl ChatSession {
    pub fn new(
        store: MessageStore,
        engine: ContextEngine,
        generator: Arc<dyn GenerationAdapter>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            engine,
            generator,
            diagnostics: Arc::new(TracingDiagnostics),
            system_prompt: system_prompt.into(),
            attachment: Mutex::new(None),
        }
    }

    /// Wires a session from configuration.
    ///
    /// The store and the session share `diagnostics`. History is not read
    /// until [`load`](Self::load) is called.
    pub fn from_config(
        config: &RecallConfig,
        backend: Arc<dyn BlobStore>,
        generator: Arc<dyn GenerationAdapter>,
        diagnostics: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let store = MessageStore::new(backend, config.storage.key.clone())
            .with_diagnostics(Arc::clone(&diagnostics))
            .with_summary_threshold(config.summary.min_messages);
        let engine = ContextEngine::new(&config.context, &config.summary);
        Self::new(store, engine, generator, config.agent.resolved_system_prompt())
            .with_diagnostics(diagnostics)
    }

    /// Routes session-level diagnostics (stale replies, generation
    /// failures) to `sink`.
    pub fn with_diagnostics(mut self, sink: Arc<dyn DiagnosticsSink>) -> Self {
        self.diagnostics = sink;
        self
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Replaces the history with the persisted one.
    pub async fn load(&self) -> LoadOutcome {
        let store = self.lock_store().await;
        on_blocking_pool(store, MessageStore::load).await.1
    }

    async fn lock_store(&self) -> OwnedMutexGuard<MessageStore> {
        Arc::clone(&self.store).lock_owned().await
    }

    /// Runs one turn for `text`.
    pub async fn send(&self, text: &str) -> TurnOutcome {
        let text = text.trim();
        if text.is_empty() {
            return TurnOutcome::Ignored;
        }

        let (context, epoch) = {
            let user_text = text.to_string();
            let (store, _) = on_blocking_pool(self.lock_store().await, move |store| {
                store.append(Role::User, &user_text)
            })
            .await;
            (self.engine.assemble(&store, text), store.epoch())
        };
        let attachment = self.attachment.lock().await.take();

        let request = GenerationRequest {
            system_prompt: self.system_prompt.clone(),
            context_prompt: context.prompt(),
            message: text.to_string(),
            attachment,
        };
        debug!(
            generator = self.generator.name(),
            epoch,
            has_attachment = request.attachment.is_some(),
            "requesting reply"
        );

        match self.generator.generate(request).await {
            Ok(raw) => {
                let reply = clean_reply(&raw);
                let store = self.lock_store().await;
                if store.epoch() != epoch {
                    self.diagnostics.report(
                        DiagnosticEvent::StaleReplyDiscarded,
                        &format!("history epoch moved from {epoch} to {}", store.epoch()),
                    );
                    return TurnOutcome::Discarded { text: reply };
                }
                let bot_text = reply.clone();
                let _ = on_blocking_pool(store, move |store| store.append(Role::Bot, &bot_text)).await;
                TurnOutcome::Replied { text: reply }
            }
            Err(error) => {
                warn!(error = %error, "generation failed");
                self.diagnostics
                    .report(DiagnosticEvent::GenerationFailure, &error.to_string());
                TurnOutcome::Failed {
                    text: FAILURE_REPLY.to_string(),
                    error,
                }
            }
        }
    }

    /// Empties the history. Any reply still in flight will be discarded.
    pub async fn clear(&self) -> PersistOutcome {
        let (_, outcome) = on_blocking_pool(self.lock_store().await, MessageStore::clear).await;
        info!(saved = outcome.is_saved(), "session cleared");
        outcome
    }

    /// Sets the attachment for the next turn, replacing any pending one.
    pub async fn attach(&self, attachment: Attachment) {
        debug!(mime_type = %attachment.mime_type, "attachment pending");
        *self.attachment.lock().await = Some(attachment);
    }

    /// Drops the pending attachment, returning it if there was one.
    pub async fn detach(&self) -> Option<Attachment> {
        self.attachment.lock().await.take()
    }

    pub async fn pending_attachment(&self) -> Option<Attachment> {
        self.attachment.lock().await.clone()
    }

    /// Snapshot of the history, oldest first.
    pub async fn history(&self) -> Vec<Message> {
        self.store.lock().await.all().to_vec()
    }

    /// Topic summary of the current history, if it is long enough.
    pub async fn topics(&self) -> Option<String> {
        let store = self.store.lock().await;
        self.engine.summarizer().summarize(&store)
    }

    /// The context a message of `query` would be sent with, without
    /// recording anything.
    pub async fn preview_context(&self, query: &str) -> AssembledContext {
        let store = self.store.lock().await;
        self.engine.assemble(&store, query)
    }
}

/// Runs `op` on the blocking pool and hands the guard back with its result.
async fn on_blocking_pool<T, F>(
    mut store: OwnedMutexGuard<MessageStore>,
    op: F,
) -> (OwnedMutexGuard<MessageStore>, T)
where
    F: FnOnce(&mut MessageStore) -> T + Send + 'static,
    T: Send + 'static,
{
    let task = tokio::task::spawn_blocking(move || {
        let out = op(&mut store);
        (store, out)
    });
    match task.await {
        Ok(done) => done,
        Err(e) => std::panic::resume_unwind(e.into_panic()),
    }
}

impl std::fmt::Debug for ChatSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatSession")
            .field("generator", &self.generator.name())
            .field("engine", &self.engine)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_markers_are_stripped() {
        assert_eq!(clean_reply("**Rust** is **fast**."), "Rust is fast.");
    }

    #[test]
    fn unmatched_markers_are_kept() {
        assert_eq!(clean_reply("2 ** 3 is 8"), "2 ** 3 is 8");
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(clean_reply("**a\nb**"), "**a\nb**");
    }

    #[test]
    fn empty_reply_falls_back() {
        assert_eq!(clean_reply(""), FALLBACK_REPLY);
        assert_eq!(clean_reply("  \n"), FALLBACK_REPLY);
        assert_eq!(clean_reply("****"), FALLBACK_REPLY);
    }

    #[test]
    fn display_text_per_outcome() {
        assert_eq!(TurnOutcome::Ignored.display_text(), None);
        assert_eq!(
            TurnOutcome::Discarded { text: "late".into() }.display_text(),
            None
        );
        let failed = TurnOutcome::Failed {
            text: FAILURE_REPLY.into(),
            error: RecallError::Internal("x".into()),
        };
        assert_eq!(failed.display_text(), Some(FAILURE_REPLY));
    }
}
