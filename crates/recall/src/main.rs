// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Recall - a terminal chat client that remembers what matters.
//!
//! This is the binary entry point.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod attachment;
mod context;
mod history;
mod shell;
mod status;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use recall_config::model::StorageBackend;
use recall_config::RecallConfig;
use recall_core::{RecallError, TracingDiagnostics};
use recall_memory::{LoadOutcome, MessageStore};

/// Recall - a terminal chat client with relevance-ranked conversation memory.
#[derive(Parser, Debug)]
#[command(name = "recall", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the default locations.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Keep history in memory only; nothing is read from or written to disk.
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Launch an interactive chat session (the default).
    Shell,
    /// Print the context a message would be sent with.
    Context {
        /// The message to select context for.
        query: String,
        /// Character budget; defaults to `context.max_chars`.
        #[arg(long)]
        max_chars: Option<usize>,
    },
    /// Print the topic summary of the stored conversation.
    Topics,
    /// List the stored conversation.
    History,
    /// Delete the stored conversation.
    Clear,
    /// Check the history backend and the model adapter.
    Status {
        /// Output as JSON.
        #[arg(long)]
        json: bool,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => recall_config::load_and_validate_path(path),
        None => recall_config::load_and_validate(),
    };
    let mut config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            recall_config::render_errors(&errors);
            std::process::exit(1);
        }
    };
    if cli.ephemeral {
        config.storage.backend = StorageBackend::Memory;
    }

    init_tracing(&config.agent.log_level);

    let result = match cli.command {
        None | Some(Commands::Shell) => shell::run_shell(config).await,
        Some(Commands::Context { query, max_chars }) => {
            context::run_context(&config, &query, max_chars)
        }
        Some(Commands::Topics) => context::run_topics(&config),
        Some(Commands::History) => history::run_history(&config),
        Some(Commands::Clear) => history::run_clear(&config),
        Some(Commands::Status { json, plain }) => status::run_status(&config, json, plain).await,
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

/// Opens the configured history and loads it.
///
/// A missing, unreadable or corrupt history is reported through the
/// diagnostics channel and yields an empty store.
pub(crate) fn open_history(config: &RecallConfig) -> Result<MessageStore, RecallError> {
    let backend = recall_storage::open_blob_store(&config.storage)?;
    let mut store = MessageStore::new(backend, config.storage.key.clone())
        .with_diagnostics(Arc::new(TracingDiagnostics))
        .with_summary_threshold(config.summary.min_messages);
    if let LoadOutcome::Reset(e) = store.load() {
        eprintln!("{}: stored history could not be restored ({e})", "warning".yellow());
    }
    Ok(store)
}

/// Initialize the tracing subscriber with the configured log level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("recall={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
