// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Recall configuration system.

use recall_config::diagnostic::ConfigError;
use recall_config::model::StorageBackend;
use recall_config::{load_and_validate_str, load_config_from_str};

#[test]
fn full_toml_deserializes() {
    let toml = r#"
[agent]
name = "Ada"
log_level = "debug"
system_prompt = "You are {name}."

[context]
max_chars = 1500
max_recent_messages = 6
similarity_threshold = 0.25
similarity_weight = 0.6
recency_weight = 0.4

[summary]
enabled = false
min_messages = 30
max_topics = 3
min_token_len = 5

[storage]
backend = "sqlite"
path = "/tmp/recall.db"
key = "history"

[gemini]
api_key = "g-123"
model = "gemini-2.0-pro"
base_url = "http://localhost:9999"
timeout_secs = 5
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "Ada");
    assert_eq!(config.agent.resolved_system_prompt(), "You are Ada.");
    assert_eq!(config.context.max_chars, 1500);
    assert_eq!(config.context.max_recent_messages, 6);
    assert_eq!(config.context.similarity_threshold, 0.25);
    assert!(!config.summary.enabled);
    assert_eq!(config.summary.min_messages, 30);
    assert_eq!(config.storage.backend, StorageBackend::Sqlite);
    assert_eq!(config.storage.path, "/tmp/recall.db");
    assert_eq!(config.storage.key, "history");
    assert_eq!(config.gemini.api_key.as_deref(), Some("g-123"));
    assert_eq!(config.gemini.timeout_secs, 5);
}

#[test]
fn partial_section_keeps_other_defaults() {
    let config = load_config_from_str("[context]\nmax_chars = 800\n").unwrap();
    assert_eq!(config.context.max_chars, 800);
    assert_eq!(config.context.max_recent_messages, 10);
    assert_eq!(config.summary.min_messages, 20);
}

#[test]
fn unknown_key_is_reported_with_suggestion() {
    let errors = load_and_validate_str("[context]\nmax_char = 800\n").unwrap_err();
    let found = errors.iter().any(|e| match e {
        ConfigError::UnknownKey {
            key, suggestion, ..
        } => key == "max_char" && suggestion.as_deref() == Some("max_chars"),
        _ => false,
    });
    assert!(found, "expected UnknownKey with suggestion, got {errors:?}");
}

#[test]
fn unknown_section_is_rejected() {
    let errors = load_and_validate_str("[theme]\ndark = true\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::UnknownKey { key, .. } if key == "theme")));
}

#[test]
fn wrong_type_is_reported() {
    let errors = load_and_validate_str("[context]\nmax_chars = \"lots\"\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::InvalidType { .. })));
}

#[test]
fn unknown_backend_is_rejected() {
    assert!(load_and_validate_str("[storage]\nbackend = \"redis\"\n").is_err());
}

#[test]
fn semantic_errors_surface_as_validation() {
    let errors = load_and_validate_str("[context]\nsimilarity_threshold = 2.0\n").unwrap_err();
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("similarity_threshold"))));
}
