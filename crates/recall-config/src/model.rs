// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Recall context engine.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! rejected at startup instead of silently falling back to a default.

use serde::{Deserialize, Serialize};

/// Top-level Recall configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with `RECALL_*`
/// environment overrides. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RecallConfig {
    /// Chatbot identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Context selection budget and ranking weights.
    #[serde(default)]
    pub context: ContextConfig,

    /// Topic summary settings for long conversations.
    #[serde(default)]
    pub summary: SummaryConfig,

    /// Where the history blob is persisted.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gemini generation endpoint settings.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Chatbot identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name the bot answers as.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Persona prompt. `{name}` is replaced with [`AgentConfig::name`].
    /// When unset, a built-in assistant persona is used.
    #[serde(default)]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
        }
    }
}

impl AgentConfig {
    /// Returns the system prompt with the agent name substituted.
    pub fn resolved_system_prompt(&self) -> String {
        let template = self
            .system_prompt
            .as_deref()
            .unwrap_or(DEFAULT_SYSTEM_PROMPT);
        template.replace("{name}", &self.name)
    }
}

const DEFAULT_SYSTEM_PROMPT: &str = "You are {name}, a highly sophisticated AI assistant. \
Your primary function is to provide accurate and detailed information. \
Address the user with respect. Respond as {name}:";

fn default_agent_name() -> String {
    "Gwen".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Context selection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ContextConfig {
    /// Soft character budget for the rendered context.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Number of most recent messages considered before relevance ranking.
    #[serde(default = "default_max_recent_messages")]
    pub max_recent_messages: usize,

    /// Older messages are only pulled in when their similarity exceeds this.
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,

    /// Weight of the similarity gap in the pairwise ranking.
    #[serde(default = "default_similarity_weight")]
    pub similarity_weight: f64,

    /// Weight of the normalized recency gap in the pairwise ranking.
    #[serde(default = "default_recency_weight")]
    pub recency_weight: f64,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            max_recent_messages: default_max_recent_messages(),
            similarity_threshold: default_similarity_threshold(),
            similarity_weight: default_similarity_weight(),
            recency_weight: default_recency_weight(),
        }
    }
}

fn default_max_chars() -> usize {
    3000
}

fn default_max_recent_messages() -> usize {
    10
}

fn default_similarity_threshold() -> f64 {
    0.3
}

fn default_similarity_weight() -> f64 {
    0.7
}

fn default_recency_weight() -> f64 {
    0.3
}

/// Topic summary configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SummaryConfig {
    /// Prepend a "Key topics discussed" line to long conversations.
    #[serde(default = "default_summary_enabled")]
    pub enabled: bool,

    /// Message count at which a conversation counts as long.
    #[serde(default = "default_min_messages")]
    pub min_messages: usize,

    /// Maximum number of topics listed.
    #[serde(default = "default_max_topics")]
    pub max_topics: usize,

    /// Minimum token length (in chars) for a word to count as a topic.
    #[serde(default = "default_min_token_len")]
    pub min_token_len: usize,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            enabled: default_summary_enabled(),
            min_messages: default_min_messages(),
            max_topics: default_max_topics(),
            min_token_len: default_min_token_len(),
        }
    }
}

fn default_summary_enabled() -> bool {
    true
}

fn default_min_messages() -> usize {
    20
}

fn default_max_topics() -> usize {
    5
}

fn default_min_token_len() -> usize {
    4
}

/// Which blob-store backend holds the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key in a directory.
    File,
    /// A key-value table in a SQLite database file.
    Sqlite,
    /// Process-local only; nothing survives a restart.
    Memory,
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Backend kind.
    #[serde(default = "default_backend")]
    pub backend: StorageBackend,

    /// Directory (file backend) or database file (sqlite backend).
    #[serde(default = "default_storage_path")]
    pub path: String,

    /// Key the history blob is stored under.
    #[serde(default = "default_storage_key")]
    pub key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            path: default_storage_path(),
            key: default_storage_key(),
        }
    }
}

fn default_backend() -> StorageBackend {
    StorageBackend::File
}

fn default_storage_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("recall"))
        .unwrap_or_else(|| std::path::PathBuf::from(".recall"))
        .display()
        .to_string()
}

fn default_storage_key() -> String {
    "chat_history".to_string()
}

/// Gemini API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// API key. `None` falls back to the `GEMINI_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model identifier.
    #[serde(default = "default_gemini_model")]
    pub model: String,

    /// API base URL, without the `/models/...` suffix.
    #[serde(default = "default_gemini_base_url")]
    pub base_url: String,

    /// Request timeout in seconds.
    #[serde(default = "default_gemini_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_gemini_model(),
            base_url: default_gemini_base_url(),
            timeout_secs: default_gemini_timeout_secs(),
        }
    }
}

fn default_gemini_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_gemini_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_gemini_timeout_secs() -> u64 {
    60
}
