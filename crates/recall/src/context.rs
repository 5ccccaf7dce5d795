// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall context` and `recall topics` command implementations.
//!
//! Both read the stored conversation without contacting the generator.

use colored::Colorize;
use recall_config::RecallConfig;
use recall_context::ContextEngine;
use recall_core::RecallError;

/// Runs `recall context QUERY`: prints what would accompany `query`.
pub fn run_context(
    config: &RecallConfig,
    query: &str,
    max_chars: Option<usize>,
) -> Result<(), RecallError> {
    let store = crate::open_history(config)?;
    let mut context_config = config.context.clone();
    if let Some(max_chars) = max_chars {
        context_config.max_chars = max_chars;
    }
    let assembled = ContextEngine::new(&context_config, &config.summary).assemble(&store, query);

    if assembled.is_empty() {
        println!("{}", "(no context)".dimmed());
    } else {
        println!("{}", assembled.prompt());
    }
    let d = assembled.diagnostics;
    eprintln!(
        "{}",
        format!(
            "{} of {} message(s): {} recent, {} relevant; {}/{} chars; top similarity {:.3}",
            d.recent_included + d.relevant_included,
            d.considered,
            d.recent_included,
            d.relevant_included,
            d.chars_used,
            context_config.max_chars,
            d.top_similarity
        )
        .dimmed()
    );
    Ok(())
}

/// Runs `recall topics`: prints the summary line or why there is none.
pub fn run_topics(config: &RecallConfig) -> Result<(), RecallError> {
    let store = crate::open_history(config)?;
    let engine = ContextEngine::new(&config.context, &config.summary);
    match engine.summarizer().summarize(&store) {
        Some(summary) => println!("{summary}"),
        None if !config.summary.enabled => {
            println!("{}", "summaries are disabled (summary.enabled = false)".dimmed())
        }
        None => println!(
            "{}",
            format!(
                "no summary: {} message(s) stored, {} needed",
                store.len(),
                config.summary.min_messages
            )
            .dimmed()
        ),
    }
    Ok(())
}
