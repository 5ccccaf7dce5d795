// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message and sparse-vector types for the conversation history.

use std::collections::BTreeMap;

use recall_core::Role;
use serde::{Deserialize, Serialize};

use crate::embedder::embed;

/// Term-frequency vector: lowercased token -> occurrence count.
///
/// Counts are always at least 1; absent terms are implicitly 0. The map is
/// ordered so serialized history is byte-for-byte deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct SparseVector {
    counts: BTreeMap<String, u32>,
}

impl SparseVector {
    /// Creates an empty vector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one occurrence of `term`.
    pub fn increment(&mut self, term: &str) {
        *self.counts.entry(term.to_string()).or_insert(0) += 1;
    }

    /// Count for `term`, 0 when absent.
    pub fn get(&self, term: &str) -> u32 {
        self.counts.get(term).copied().unwrap_or(0)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, i.e. the number of tokens embedded.
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&c| u64::from(c)).sum()
    }

    /// Iterates `(term, count)` pairs in term order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.counts.iter().map(|(t, &c)| (t.as_str(), c))
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.counts
            .values()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }

    /// Dot product with `other`.
    ///
    /// Terms missing from either side contribute 0, so iterating the smaller
    /// map covers the whole key union.
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (small, large) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        small
            .counts
            .iter()
            .map(|(term, &c)| f64::from(c) * f64::from(large.get(term)))
            .sum()
    }
}

impl TryFrom<BTreeMap<String, u32>> for SparseVector {
    type Error = String;

    fn try_from(counts: BTreeMap<String, u32>) -> Result<Self, Self::Error> {
        if let Some((term, _)) = counts.iter().find(|(_, c)| **c == 0) {
            return Err(format!("embedding term `{term}` has a zero count"));
        }
        Ok(Self { counts })
    }
}

impl From<SparseVector> for BTreeMap<String, u32> {
    fn from(v: SparseVector) -> Self {
        v.counts
    }
}

/// One chat turn.
///
/// Immutable after construction; the embedding is computed once from the
/// content and cached alongside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    role: Role,
    content: String,
    timestamp: i64,
    embedding: SparseVector,
}

impl Message {
    /// Builds a message and derives its embedding from `content`.
    pub fn new(role: Role, content: impl Into<String>, timestamp: i64) -> Self {
        let content = content.into();
        let embedding = embed(&content);
        Self {
            role,
            content,
            timestamp,
            embedding,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Milliseconds since the Unix epoch.
    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn embedding(&self) -> &SparseVector {
        &self.embedding
    }

    /// `role: content`, the form used in rendered context.
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.as_str(), self.content)
    }
}

/// A message paired with its similarity to the current query.
///
/// Computed per query and dropped once context is assembled.
#[derive(Debug, Clone, Copy)]
pub struct ScoredMessage<'a> {
    /// Position in the store; doubles as the message identity.
    pub index: usize,
    pub message: &'a Message,
    /// Cosine similarity in `[0, 1]`.
    pub similarity: f64,
}
