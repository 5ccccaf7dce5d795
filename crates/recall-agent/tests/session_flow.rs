// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session turns against scripted generators and in-memory storage.

use std::sync::Arc;

use recall_agent::{ChatSession, TurnOutcome, FAILURE_REPLY, FALLBACK_REPLY};
use recall_context::ContextEngine;
use recall_core::{Attachment, DiagnosticEvent, RecallError, Role};
use recall_memory::{LoadOutcome, MessageStore};
use recall_storage::MemoryBlobStore;
use recall_test_utils::{MockGenerator, RecordingDiagnostics, TrackingBlobStore};

const KEY: &str = "chat_history";

fn session_on(
    backend: Arc<MemoryBlobStore>,
    generator: Arc<MockGenerator>,
    sink: Arc<RecordingDiagnostics>,
) -> ChatSession {
    let store = MessageStore::new(backend, KEY).with_diagnostics(sink.clone());
    ChatSession::new(store, ContextEngine::default(), generator, "You are Gwen.")
        .with_diagnostics(sink)
}

fn session(generator: Arc<MockGenerator>, sink: Arc<RecordingDiagnostics>) -> ChatSession {
    session_on(Arc::new(MemoryBlobStore::new()), generator, sink)
}

fn image() -> Attachment {
    Attachment {
        mime_type: "image/png".into(),
        data: "iVBORw0KGgo=".into(),
    }
}

#[tokio::test]
async fn reply_is_cleaned_and_recorded() {
    let generator = Arc::new(MockGenerator::with_replies(["  **Mushrooms**, obviously.  "]));
    let sink = Arc::new(RecordingDiagnostics::new());
    let session = session(generator.clone(), sink.clone());

    let outcome = session.send("  best pizza topping?  ").await;
    assert!(matches!(&outcome, TurnOutcome::Replied { text } if text == "Mushrooms, obviously."));

    let history = session.history().await;
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role(), Role::User);
    assert_eq!(history[0].content(), "best pizza topping?");
    assert_eq!(history[1].role(), Role::Bot);
    assert_eq!(history[1].content(), "Mushrooms, obviously.");

    let request = generator.last_request().await.unwrap();
    assert_eq!(request.system_prompt, "You are Gwen.");
    assert_eq!(request.message, "best pizza topping?");
    assert_eq!(request.context_prompt, "user: best pizza topping?");
    assert!(sink.is_empty());
}

#[tokio::test]
async fn blank_input_is_ignored() {
    let generator = Arc::new(MockGenerator::new());
    let session = session(generator.clone(), Arc::new(RecordingDiagnostics::new()));

    assert!(matches!(session.send("   \n\t").await, TurnOutcome::Ignored));
    assert!(session.history().await.is_empty());
    assert!(generator.requests().await.is_empty());
}

#[tokio::test]
async fn empty_reply_uses_fallback_text() {
    let generator = Arc::new(MockGenerator::with_replies([""]));
    let session = session(generator, Arc::new(RecordingDiagnostics::new()));

    let outcome = session.send("hello").await;
    assert_eq!(outcome.display_text(), Some(FALLBACK_REPLY));
    assert_eq!(session.history().await[1].content(), FALLBACK_REPLY);
}

#[tokio::test]
async fn generation_failure_is_reported_not_recorded() {
    let generator = Arc::new(MockGenerator::new());
    generator.push_failure("quota exceeded").await;
    let sink = Arc::new(RecordingDiagnostics::new());
    let session = session(generator, sink.clone());

    let outcome = session.send("hello").await;
    match outcome {
        TurnOutcome::Failed { text, error } => {
            assert_eq!(text, FAILURE_REPLY);
            assert!(matches!(error, RecallError::Generation { .. }));
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert_eq!(session.history().await.len(), 1);
    assert_eq!(sink.count(DiagnosticEvent::GenerationFailure), 1);
    assert!(sink.events()[0].1.contains("quota exceeded"));
}

#[tokio::test]
async fn attachment_is_consumed_by_one_turn() {
    let generator = Arc::new(MockGenerator::new());
    generator.push_failure("boom").await;
    let session = session(generator.clone(), Arc::new(RecordingDiagnostics::new()));

    session.attach(image()).await;
    assert_eq!(session.pending_attachment().await, Some(image()));
    session.send("what is in this picture?").await;
    session.send("and now?").await;

    let requests = generator.requests().await;
    assert_eq!(requests[0].attachment, Some(image()));
    assert_eq!(requests[1].attachment, None);
    assert_eq!(session.pending_attachment().await, None);
}

#[tokio::test]
async fn detach_cancels_pending_attachment() {
    let generator = Arc::new(MockGenerator::new());
    let session = session(generator.clone(), Arc::new(RecordingDiagnostics::new()));

    session.attach(image()).await;
    assert_eq!(session.detach().await, Some(image()));
    assert_eq!(session.detach().await, None);
    session.send("hi").await;
    assert_eq!(generator.last_request().await.unwrap().attachment, None);
}

#[tokio::test]
async fn clear_during_generation_discards_reply() {
    let generator = Arc::new(MockGenerator::with_replies(["too late"]).gated());
    let sink = Arc::new(RecordingDiagnostics::new());
    let session = session(generator.clone(), sink.clone());

    let (outcome, cleared) = tokio::join!(session.send("hello"), async {
        generator.wait_started().await;
        let cleared = session.clear().await;
        generator.release();
        cleared
    });

    assert!(cleared.is_saved());
    assert!(matches!(&outcome, TurnOutcome::Discarded { text } if text == "too late"));
    assert_eq!(outcome.display_text(), None);
    assert!(session.history().await.is_empty());
    assert_eq!(sink.count(DiagnosticEvent::StaleReplyDiscarded), 1);
}

#[tokio::test]
async fn reply_without_interference_is_kept() {
    let generator = Arc::new(MockGenerator::with_replies(["on time"]).gated());
    let session = session(generator.clone(), Arc::new(RecordingDiagnostics::new()));

    let (outcome, ()) = tokio::join!(session.send("hello"), async {
        generator.wait_started().await;
        generator.release();
    });
    assert!(outcome.is_replied());
    assert_eq!(session.history().await.len(), 2);
}

#[tokio::test]
async fn history_survives_a_new_session() {
    let backend = Arc::new(MemoryBlobStore::new());
    let first = session_on(
        backend.clone(),
        Arc::new(MockGenerator::with_replies(["hi there"])),
        Arc::new(RecordingDiagnostics::new()),
    );
    first.send("hello").await;

    let second = session_on(
        backend,
        Arc::new(MockGenerator::new()),
        Arc::new(RecordingDiagnostics::new()),
    );
    assert!(matches!(second.load().await, LoadOutcome::Restored(2)));
    assert_eq!(second.history().await, first.history().await);
}

#[tokio::test]
async fn preview_does_not_record() {
    let generator = Arc::new(MockGenerator::with_replies(["rust is great"]));
    let session = session(generator, Arc::new(RecordingDiagnostics::new()));
    session.send("tell me about rust").await;

    let preview = session.preview_context("rust").await;
    assert_eq!(preview.context, "user: tell me about rust\nbot: rust is great");
    assert_eq!(preview.summary, None);
    assert_eq!(session.history().await.len(), 2);
}

#[tokio::test]
async fn from_config_wires_prompt_and_summary_threshold() {
    let config = recall_config::load_and_validate_str(
        "[agent]\nname = \"Ada\"\n\n[summary]\nmin_messages = 4\n\n[storage]\nbackend = \"memory\"\n",
    )
    .unwrap();
    let generator = Arc::new(MockGenerator::with_replies([
        "pizza with mushrooms",
        "pizza with mushrooms",
    ]));
    let sink = Arc::new(RecordingDiagnostics::new());
    let session = ChatSession::from_config(
        &config,
        Arc::new(MemoryBlobStore::new()),
        generator.clone(),
        sink,
    );

    assert!(session.system_prompt().starts_with("You are Ada,"));
    session.send("pizza toppings please").await;
    assert_eq!(session.topics().await, None);
    session.send("pizza toppings please").await;
    assert_eq!(
        session.topics().await.as_deref(),
        Some("Key topics discussed: pizza, toppings, please, with, mushrooms")
    );

    // The summary rides along with the next request's context.
    session.send("anything else?").await;
    let request = generator.last_request().await.unwrap();
    assert!(request.context_prompt.starts_with("Key topics discussed: pizza"));
}

#[tokio::test]
async fn store_io_stays_off_the_runtime_thread() {
    let backend = Arc::new(TrackingBlobStore::new());
    let store = MessageStore::new(backend.clone(), KEY);
    let session = ChatSession::new(
        store,
        ContextEngine::default(),
        Arc::new(MockGenerator::new()),
        "You are Gwen.",
    );

    assert!(matches!(session.load().await, LoadOutcome::Empty));
    assert!(session.send("hello there").await.is_replied());
    assert!(session.clear().await.is_saved());

    // load reads once; two appends and a clear each write once.
    let threads = backend.io_threads();
    assert_eq!(threads.len(), 4);
    let runtime_thread = std::thread::current().id();
    assert!(threads.iter().all(|id| *id != runtime_thread));
}
