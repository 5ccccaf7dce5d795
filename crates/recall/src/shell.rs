// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `recall shell` command implementation.
//!
//! Launches an interactive REPL with a colored prompt and readline history.
//! Plain lines are chat turns; lines starting with `/` are shell commands.
//! The stored conversation is restored on start and saved after every turn.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;
use recall_agent::{ChatSession, TurnOutcome};
use recall_config::RecallConfig;
use recall_core::{GenerationAdapter, RecallError, TracingDiagnostics};
use recall_gemini::GeminiProvider;
use recall_memory::LoadOutcome;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::info;

use crate::attachment::load_attachment;
use crate::history::render_history;

/// A line typed at the shell prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Message(String),
    Clear,
    Attach(PathBuf),
    Detach,
    Context(String),
    Topics,
    History,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    /// Classifies one input line. Blank lines yield `None`.
    fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }
        let Some(rest) = line.strip_prefix('/') else {
            return Some(ShellCommand::Message(line.to_string()));
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        Some(match (name, arg) {
            ("quit" | "exit", _) => ShellCommand::Quit,
            ("clear", _) => ShellCommand::Clear,
            ("attach", "") => ShellCommand::Unknown("/attach needs a file path".into()),
            ("attach", path) => ShellCommand::Attach(PathBuf::from(path)),
            ("detach", _) => ShellCommand::Detach,
            ("context", query) => ShellCommand::Context(query.to_string()),
            ("topics", _) => ShellCommand::Topics,
            ("history", _) => ShellCommand::History,
            ("help", _) => ShellCommand::Help,
            (other, _) => ShellCommand::Unknown(format!("unknown command /{other}")),
        })
    }
}

const HELP: &str = "\
/attach PATH   attach a file to the next message
/detach        drop the pending attachment
/context TEXT  show the context TEXT would be sent with
/topics        show the topic summary
/history       list the conversation
/clear         forget the conversation
/quit          leave";

/// Runs the `recall shell` interactive REPL.
pub async fn run_shell(config: RecallConfig) -> Result<(), RecallError> {
    let generator: Arc<dyn GenerationAdapter> =
        Arc::new(GeminiProvider::new(&config.gemini).inspect_err(|_| {
            eprintln!(
                "error: Gemini API key required. Set gemini.api_key in config or the GEMINI_API_KEY env var"
            );
        })?);
    let backend = recall_storage::open_blob_store(&config.storage)?;
    let storage = crate::status::check_adapter(backend.as_ref()).await;
    if !storage.healthy {
        eprintln!("{}: history backend {}; turns may not be saved", "warning".yellow(), storage.status);
    }
    let session = ChatSession::from_config(
        &config,
        backend,
        generator,
        Arc::new(TracingDiagnostics),
    );

    match session.load().await {
        LoadOutcome::Restored(n) => info!(messages = n, "conversation restored"),
        LoadOutcome::Empty => {}
        LoadOutcome::Reset(e) => eprintln!(
            "{}: stored history could not be restored ({e}); starting fresh",
            "warning".yellow()
        ),
    }

    let mut rl = DefaultEditor::new()
        .map_err(|e| RecallError::Internal(format!("failed to initialize readline: {e}")))?;

    println!("{}", format!("recall shell - chatting with {}", config.agent.name).bold().green());
    println!("Type {} for commands, {} to exit.\n", "/help".yellow(), "/quit".yellow());

    let prompt = format!("{}> ", "you".cyan());
    let bot = config.agent.name.green().bold().to_string();
    loop {
        let line = match rl.readline(&prompt) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        };
        let Some(command) = ShellCommand::parse(&line) else {
            continue;
        };
        let _ = rl.add_history_entry(line.trim());

        match command {
            ShellCommand::Quit => break,
            ShellCommand::Message(text) => match session.send(&text).await {
                TurnOutcome::Replied { text } => println!("{bot}: {text}\n"),
                TurnOutcome::Failed { text, .. } => println!("{bot}: {}\n", text.red()),
                TurnOutcome::Discarded { .. } => {
                    println!("{}", "(reply discarded: conversation was cleared)".dimmed());
                }
                TurnOutcome::Ignored => {}
            },
            ShellCommand::Clear => {
                if session.clear().await.is_saved() {
                    println!("{}", "conversation cleared".dimmed());
                } else {
                    println!(
                        "{}",
                        "conversation cleared (could not be saved, see log)".yellow()
                    );
                }
            }
            ShellCommand::Attach(path) => match load_attachment(&path) {
                Ok(attachment) => {
                    let mime = attachment.mime_type.clone();
                    session.attach(attachment).await;
                    println!(
                        "{}",
                        format!("attached {} ({mime}) to your next message", path.display())
                            .dimmed()
                    );
                }
                Err(e) => eprintln!("{}: {e}", "error".red()),
            },
            ShellCommand::Detach => match session.detach().await {
                Some(_) => println!("{}", "attachment dropped".dimmed()),
                None => println!("{}", "nothing attached".dimmed()),
            },
            ShellCommand::Context(query) => {
                let assembled = session.preview_context(&query).await;
                if assembled.is_empty() {
                    println!("{}", "(no context)".dimmed());
                } else {
                    println!("{}", assembled.prompt().dimmed());
                }
            }
            ShellCommand::Topics => match session.topics().await {
                Some(summary) => println!("{summary}"),
                None => println!("{}", "conversation too short for a summary".dimmed()),
            },
            ShellCommand::History => {
                let history = session.history().await;
                if history.is_empty() {
                    println!("{}", "no messages yet".dimmed());
                } else {
                    println!("{}", render_history(&history));
                }
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Unknown(message) => eprintln!("{}: {message}", "error".red()),
        }
    }

    Ok(())
}
