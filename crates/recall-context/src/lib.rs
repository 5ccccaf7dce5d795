// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context engine for Recall prompt assembly.
//!
//! Builds the history block sent alongside each new message:
//! - **selector**: recent and query-relevant lines under a character budget
//! - **summary**: a "Key topics discussed" line for long conversations
//!
//! [`ContextEngine`] combines both into an [`AssembledContext`].

pub mod selector;
pub mod summary;

use recall_config::model::{ContextConfig, SummaryConfig};
use recall_memory::MessageStore;
use tracing::debug;

pub use selector::{select_context, ContextDiagnostics, ContextSelector};
pub use summary::{TopicSummarizer, SUMMARY_PREFIX};

/// The history block for one turn.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssembledContext {
    /// Selected history, newline-joined `role: content` lines.
    pub context: String,
    /// Topic summary, present only for long conversations.
    pub summary: Option<String>,
    pub diagnostics: ContextDiagnostics,
}

impl AssembledContext {
    /// Summary line (if any) followed by the selected history.
    pub fn prompt(&self) -> String {
        match &self.summary {
            Some(summary) => format!("{summary}\n{}", self.context),
            None => self.context.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.context.is_empty() && self.summary.is_none()
    }
}

/// Assembles history context from a [`MessageStore`].
#[derive(Debug, Clone, Default)]
pub struct ContextEngine {
    selector: ContextSelector,
    summarizer: TopicSummarizer,
}

impl ContextEngine {
    pub fn new(context: &ContextConfig, summary: &SummaryConfig) -> Self {
        Self {
            selector: ContextSelector::new(context),
            summarizer: TopicSummarizer::new(summary),
        }
    }

    pub fn selector(&self) -> &ContextSelector {
        &self.selector
    }

    pub fn summarizer(&self) -> &TopicSummarizer {
        &self.summarizer
    }

    /// Assembles context for `query` against the wall clock.
    pub fn assemble(&self, store: &MessageStore, query: &str) -> AssembledContext {
        self.assemble_at(store, query, chrono::Utc::now().timestamp_millis())
    }

    /// Assembles context for `query` with an explicit "now" in milliseconds.
    pub fn assemble_at(&self, store: &MessageStore, query: &str, now: i64) -> AssembledContext {
        let (context, diagnostics) = self.selector.select_with_diagnostics(store.all(), query, now);
        let summary = self.summarizer.summarize(store);

        metrics::histogram!("recall_context_chars").record(diagnostics.chars_used as f64);
        debug!(
            considered = diagnostics.considered,
            recent = diagnostics.recent_included,
            relevant = diagnostics.relevant_included,
            chars_used = diagnostics.chars_used,
            max_chars = self.selector.max_chars(),
            top_similarity = diagnostics.top_similarity,
            summarized = summary.is_some(),
            "context assembled"
        );

        AssembledContext {
            context,
            summary,
            diagnostics,
        }
    }
}
