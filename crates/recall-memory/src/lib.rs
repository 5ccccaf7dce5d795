// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation memory for the Recall context engine.
//!
//! - **embedder**: text -> bag-of-words [`SparseVector`]
//! - **similarity**: cosine similarity between sparse vectors
//! - **store**: [`MessageStore`], the append-only persisted history
//! - **codec**: JSON encoding of the persisted history blob
//! - **types**: [`Message`], [`SparseVector`], [`ScoredMessage`]

pub mod codec;
pub mod embedder;
pub mod similarity;
pub mod store;
pub mod types;

pub use embedder::{embed, tokenize};
pub use similarity::cosine_similarity;
pub use store::{LoadOutcome, MessageStore, PersistOutcome};
pub use types::{Message, ScoredMessage, SparseVector};
