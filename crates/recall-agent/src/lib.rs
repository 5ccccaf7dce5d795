// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat session orchestration for Recall.
//!
//! [`ChatSession`] is the explicit context object that owns a conversation:
//! its persisted history, its context engine, its generator and its
//! one-shot attachment slot.

pub mod session;

pub use session::{clean_reply, ChatSession, TurnOutcome, FAILURE_REPLY, FALLBACK_REPLY};
