// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall history` and `recall clear` command implementations.

use colored::Colorize;
use recall_config::RecallConfig;
use recall_core::RecallError;
use recall_memory::{Message, PersistOutcome};

/// Runs `recall history`: prints every stored message, oldest first.
pub fn run_history(config: &RecallConfig) -> Result<(), RecallError> {
    let store = crate::open_history(config)?;
    if store.is_empty() {
        println!("{}", "no stored conversation".dimmed());
        return Ok(());
    }
    println!("{}", render_history(store.all()));
    Ok(())
}

/// Runs `recall clear`: empties the stored conversation.
pub fn run_clear(config: &RecallConfig) -> Result<(), RecallError> {
    let mut store = crate::open_history(config)?;
    let dropped = store.len();
    match store.clear() {
        PersistOutcome::Saved => {
            println!("cleared {dropped} message(s)");
            Ok(())
        }
        PersistOutcome::Failed(e) => Err(e),
    }
}

/// One `[YYYY-MM-DD HH:MM:SS] role: content` line per message.
pub fn render_history(messages: &[Message]) -> String {
    messages
        .iter()
        .map(|m| format!("[{}] {}", format_timestamp(m.timestamp()), m.render()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_timestamp(millis: i64) -> String {
    chrono::DateTime::from_timestamp_millis(millis)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| millis.to_string())
}
