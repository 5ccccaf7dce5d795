// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Frequency-based topic summary for long conversations.

use std::collections::HashMap;

use recall_config::model::SummaryConfig;
use recall_memory::{Message, MessageStore};

/// Prefix of every rendered summary line.
pub const SUMMARY_PREFIX: &str = "Key topics discussed: ";

/// Summarizes a long conversation as its most frequent longer words.
///
/// Tokens are the lowercased, whitespace-separated words of every message,
/// punctuation included. Only tokens of at least `min_token_len` characters
/// count.
#[derive(Debug, Clone)]
pub struct TopicSummarizer {
    enabled: bool,
    max_topics: usize,
    min_token_len: usize,
}

impl Default for TopicSummarizer {
    fn default() -> Self {
        Self::new(&SummaryConfig::default())
    }
}

impl TopicSummarizer {
    pub fn new(config: &SummaryConfig) -> Self {
        Self {
            enabled: config.enabled,
            max_topics: config.max_topics,
            min_token_len: config.min_token_len,
        }
    }

    /// `Key topics discussed: ...` once the store is long enough.
    ///
    /// `None` when summaries are disabled, the store is below its summary
    /// threshold, or no token is long enough to count.
    pub fn summarize(&self, store: &MessageStore) -> Option<String> {
        if !self.enabled || !store.summary_eligible() {
            return None;
        }
        let topics = self.topics(store.all());
        if topics.is_empty() {
            return None;
        }
        Some(format!("{SUMMARY_PREFIX}{}", topics.join(", ")))
    }

    /// The most frequent qualifying tokens, most frequent first.
    ///
    /// Equal counts keep first-appearance order.
    pub fn topics(&self, messages: &[Message]) -> Vec<String> {
        // token -> (count, first appearance)
        let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
        let mut seen = 0usize;
        for message in messages {
            let lowered = message.content().to_lowercase();
            for token in lowered.split_whitespace() {
                if token.chars().count() < self.min_token_len {
                    continue;
                }
                let entry = counts.entry(token.to_string()).or_insert_with(|| {
                    seen += 1;
                    (0, seen)
                });
                entry.0 += 1;
            }
        }

        let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
        ranked.sort_by(|(_, (count_a, first_a)), (_, (count_b, first_b))| {
            count_b.cmp(count_a).then(first_a.cmp(first_b))
        });
        ranked
            .into_iter()
            .take(self.max_topics)
            .map(|(token, _)| token)
            .collect()
    }
}
