// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end selection and summary behavior over a real message store.

use std::collections::HashMap;
use std::sync::Arc;

use proptest::prelude::*;
use recall_config::model::{ContextConfig, SummaryConfig};
use recall_context::{select_context, ContextEngine, ContextSelector, TopicSummarizer};
use recall_core::Role;
use recall_memory::MessageStore;
use recall_storage::MemoryBlobStore;

fn store() -> MessageStore {
    MessageStore::new(Arc::new(MemoryBlobStore::new()), "chat_history")
}

fn alternate(i: usize) -> Role {
    if i % 2 == 0 { Role::User } else { Role::Bot }
}

#[test]
fn empty_store_yields_empty_context() {
    assert_eq!(select_context(&store(), "anything at all", 3000), "");
}

#[test]
fn older_relevant_message_is_pulled_in() {
    let mut store = store();
    store.append_at(Role::User, "rust programming", 1_000);
    for i in 0..12 {
        let text = if i % 2 == 0 {
            "what pizza toppings do you like"
        } else {
            "pepperoni and mushroom pizza"
        };
        store.append_at(alternate(i), text, 2_000 + i as i64 * 1_000);
    }

    let selector = ContextSelector::default();
    let (context, diag) =
        selector.select_with_diagnostics(store.all(), "tell me about rust", 20_000);

    assert!(context.contains("user: rust programming"));
    assert!(context.starts_with("user: rust programming\n"));
    assert_eq!(diag.recent_included, 10);
    assert_eq!(diag.relevant_included, 1);
    assert_eq!(context.lines().count(), 11);
}

#[test]
fn recent_window_is_always_included_when_it_fits() {
    let mut store = store();
    for i in 0..25 {
        store.append_at(alternate(i), &format!("message number {i}"), i as i64);
    }
    let context = ContextSelector::default().select_context_at(store.all(), "", 100);
    let lines: Vec<_> = context.lines().collect();
    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0], "bot: message number 15");
    assert_eq!(lines[9], "user: message number 24");
}

#[test]
fn summary_needs_twenty_messages() {
    let summarizer = TopicSummarizer::default();
    let mut store = store();
    for i in 0..19 {
        store.append_at(alternate(i), "pizza pizza with extra cheese", i as i64);
    }
    assert_eq!(summarizer.summarize(&store), None);

    store.append_at(Role::Bot, "pizza pizza with extra cheese", 19);
    let summary = summarizer.summarize(&store).unwrap();
    assert_eq!(summary, "Key topics discussed: pizza, with, extra, cheese");
}

#[test]
fn disabled_summary_is_never_produced() {
    let config = SummaryConfig {
        enabled: false,
        ..SummaryConfig::default()
    };
    let mut store = store();
    for i in 0..30 {
        store.append_at(alternate(i), "lengthy discussion", i as i64);
    }
    assert_eq!(TopicSummarizer::new(&config).summarize(&store), None);
}

#[test]
fn engine_combines_summary_and_context() {
    let mut store = store();
    for i in 0..20 {
        store.append_at(alternate(i), "deploy kubernetes cluster", i as i64);
    }
    let engine = ContextEngine::new(&ContextConfig::default(), &SummaryConfig::default());
    let assembled = engine.assemble_at(&store, "kubernetes", 100);

    let summary = assembled.summary.as_deref().unwrap();
    assert!(summary.starts_with("Key topics discussed: deploy"));
    assert_eq!(assembled.diagnostics.considered, 20);
    assert_eq!(assembled.diagnostics.recent_included, 10);
    assert_eq!(assembled.diagnostics.relevant_included, 10);
    assert!(assembled.prompt().starts_with(&format!("{summary}\nuser: deploy")));
}

#[test]
fn tight_budget_is_respected() {
    let mut store = store();
    for i in 0..15 {
        store.append_at(alternate(i), "the quick brown fox", i as i64);
    }
    let selector = ContextSelector::default().with_max_chars(60);
    let (context, diag) = selector.select_with_diagnostics(store.all(), "quick fox", 20);
    assert!(diag.chars_used <= 60);
    let rendered_cost: usize = context.lines().map(|l| l.chars().count() + 1).sum();
    assert_eq!(rendered_cost, diag.chars_used);
}

proptest! {
    #[test]
    fn output_lines_are_chronological(
        gaps in prop::collection::vec(0i64..1_000, 1..40),
        query in "[a-z ]{0,20}",
        max_chars in 0usize..2_000,
    ) {
        let mut store = store();
        let mut ts = 0i64;
        let mut by_content = HashMap::new();
        for (i, gap) in gaps.iter().enumerate() {
            ts += gap;
            let content = format!("entry {i} about {}", ["rust", "pizza", "tea"][i % 3]);
            by_content.insert(content.clone(), ts);
            store.append_at(alternate(i), &content, ts);
        }

        let context = ContextSelector::default()
            .with_max_chars(max_chars)
            .select_context_at(store.all(), &query, ts + 1);

        let stamps: Vec<i64> = context
            .lines()
            .map(|line| {
                let (_, content) = line.split_once(": ").unwrap();
                by_content[content]
            })
            .collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        let used: usize = context.lines().map(|l| l.chars().count() + 1).sum();
        prop_assert!(used <= max_chars);
    }
}
