// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.

use crate::diagnostic::ConfigError;
use crate::model::{RecallConfig, StorageBackend};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validates semantic constraints serde cannot express.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &RecallConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut invalid = |message: String| errors.push(ConfigError::Validation { message });

    if config.agent.name.trim().is_empty() {
        invalid("agent.name must not be empty".to_string());
    }

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        invalid(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    let ctx = &config.context;
    if ctx.max_chars == 0 {
        invalid("context.max_chars must be greater than 0".to_string());
    }

    if !(0.0..=1.0).contains(&ctx.similarity_threshold) {
        invalid(format!(
            "context.similarity_threshold must be within [0, 1], got {}",
            ctx.similarity_threshold
        ));
    }

    for (name, weight) in [
        ("similarity_weight", ctx.similarity_weight),
        ("recency_weight", ctx.recency_weight),
    ] {
        if !weight.is_finite() || weight < 0.0 {
            invalid(format!(
                "context.{name} must be a non-negative number, got {weight}"
            ));
        }
    }

    if ctx.similarity_weight + ctx.recency_weight <= 0.0 {
        invalid("context.similarity_weight and context.recency_weight must not both be 0".to_string());
    }

    if config.summary.enabled && config.summary.max_topics == 0 {
        invalid("summary.max_topics must be at least 1 when summary.enabled is true".to_string());
    }

    if config.storage.key.trim().is_empty() {
        invalid("storage.key must not be empty".to_string());
    }

    if config.storage.backend != StorageBackend::Memory && config.storage.path.trim().is_empty() {
        invalid("storage.path must not be empty for file and sqlite backends".to_string());
    }

    if config.gemini.timeout_secs == 0 {
        invalid("gemini.timeout_secs must be greater than 0".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
