// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Context selection: pick the history lines worth sending with a query.
//!
//! The most recent messages are packed first, then older messages ranked
//! by a blend of query similarity and recency. Both passes are greedy
//! against a character budget and neither stops at the first message that
//! does not fit. The result is rendered oldest first.

use std::cmp::Ordering;

use recall_config::model::ContextConfig;
use recall_memory::{cosine_similarity, embed, Message, MessageStore, ScoredMessage, SparseVector};
use tracing::trace;

/// Per-call statistics describing how a context string was assembled.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContextDiagnostics {
    /// Messages in the history when selection ran.
    pub considered: usize,
    /// Messages included by the recent-window pass.
    pub recent_included: usize,
    /// Messages included by the relevance pass.
    pub relevant_included: usize,
    /// Budget consumed, delimiters included.
    pub chars_used: usize,
    /// Highest similarity seen across the whole history.
    pub top_similarity: f64,
}

/// Selects relevant and recent history lines under a character budget.
#[derive(Debug, Clone)]
pub struct ContextSelector {
    max_chars: usize,
    max_recent: usize,
    similarity_threshold: f64,
    similarity_weight: f64,
    recency_weight: f64,
}

impl Default for ContextSelector {
    fn default() -> Self {
        Self::new(&ContextConfig::default())
    }
}

impl ContextSelector {
    pub fn new(config: &ContextConfig) -> Self {
        Self {
            max_chars: config.max_chars,
            max_recent: config.max_recent_messages,
            similarity_threshold: config.similarity_threshold,
            similarity_weight: config.similarity_weight,
            recency_weight: config.recency_weight,
        }
    }

    /// Same selector with a different character budget.
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub fn max_chars(&self) -> usize {
        self.max_chars
    }

    /// Selects context for `query`, measuring recency against the wall clock.
    pub fn select_context(&self, messages: &[Message], query: &str) -> String {
        self.select_context_at(messages, query, chrono::Utc::now().timestamp_millis())
    }

    /// Selects context for `query` with an explicit "now" in milliseconds.
    pub fn select_context_at(&self, messages: &[Message], query: &str, now: i64) -> String {
        self.select_with_diagnostics(messages, query, now).0
    }

    /// Selects context and reports how the budget was spent.
    pub fn select_with_diagnostics(
        &self,
        messages: &[Message],
        query: &str,
        now: i64,
    ) -> (String, ContextDiagnostics) {
        let mut diagnostics = ContextDiagnostics {
            considered: messages.len(),
            ..ContextDiagnostics::default()
        };
        if messages.is_empty() {
            return (String::new(), diagnostics);
        }

        let query_vec = embed(query);
        let ranked = self.rank(messages, &query_vec, now);
        diagnostics.top_similarity = ranked
            .iter()
            .map(|s| s.similarity)
            .fold(0.0, f64::max);

        let mut included = vec![false; messages.len()];
        let mut used = 0usize;

        let recent_start = messages.len().saturating_sub(self.max_recent);
        for (index, message) in messages.iter().enumerate().skip(recent_start) {
            let cost = line_cost(message);
            if used + cost <= self.max_chars {
                included[index] = true;
                used += cost;
                diagnostics.recent_included += 1;
            }
        }

        for scored in &ranked {
            if included[scored.index] || scored.similarity <= self.similarity_threshold {
                continue;
            }
            let cost = line_cost(scored.message);
            if used + cost <= self.max_chars {
                included[scored.index] = true;
                used += cost;
                diagnostics.relevant_included += 1;
                trace!(
                    index = scored.index,
                    similarity = scored.similarity,
                    "relevant message included"
                );
            }
        }
        diagnostics.chars_used = used;

        let mut chosen: Vec<&Message> = messages
            .iter()
            .zip(&included)
            .filter_map(|(message, &keep)| keep.then_some(message))
            .collect();
        // Stable: equal timestamps keep store order.
        chosen.sort_by_key(|m| m.timestamp());

        let rendered = chosen
            .iter()
            .map(|m| m.render())
            .collect::<Vec<_>>()
            .join("\n");
        (rendered, diagnostics)
    }

    /// Scores every message against `query_vec` and orders them best first.
    ///
    /// Ties keep store order.
    pub fn rank<'a>(
        &self,
        messages: &'a [Message],
        query_vec: &SparseVector,
        now: i64,
    ) -> Vec<ScoredMessage<'a>> {
        let oldest = messages.iter().map(Message::timestamp).min().unwrap_or(now);
        // Differences are taken in f64 so extreme stored timestamps cannot overflow.
        let span = now as f64 - oldest as f64;

        let mut scored: Vec<ScoredMessage<'a>> = messages
            .iter()
            .enumerate()
            .map(|(index, message)| ScoredMessage {
                index,
                message,
                similarity: cosine_similarity(message.embedding(), query_vec),
            })
            .collect();
        scored.sort_by(|a, b| self.compare(a, b, span));
        scored
    }

    /// Pairwise ranking: `Less` when `a` belongs before `b`.
    ///
    /// The weighted similarity gap plus the weighted recency gap, the
    /// latter normalised by `span` (the age of the oldest message). A
    /// non-positive span drops the recency term.
    pub fn compare(&self, a: &ScoredMessage<'_>, b: &ScoredMessage<'_>, span: f64) -> Ordering {
        let similarity_gap = b.similarity - a.similarity;
        let recency_gap = if span > 0.0 {
            (b.message.timestamp() as f64 - a.message.timestamp() as f64) / span
        } else {
            0.0
        };
        let score = self.similarity_weight * similarity_gap + self.recency_weight * recency_gap;
        score.partial_cmp(&0.0).unwrap_or(Ordering::Equal)
    }
}

/// Budget cost of one rendered line plus its delimiter.
fn line_cost(message: &Message) -> usize {
    message.render().chars().count() + 1
}

/// Context for `query` from `store` using the default weights and window.
pub fn select_context(store: &MessageStore, query: &str, max_chars: usize) -> String {
    ContextSelector::default()
        .with_max_chars(max_chars)
        .select_context(store.all(), query)
}
