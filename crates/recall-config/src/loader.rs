// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order (later wins): compiled defaults, `/etc/recall/recall.toml`,
//! `~/.config/recall/recall.toml`, `./recall.toml`, then `RECALL_*` env vars.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::RecallConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/recall/recall.toml";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "recall.toml";

/// Sections that env var names are mapped into.
const SECTIONS: &[&str] = &["agent", "context", "summary", "storage", "gemini"];

/// Returns `~/.config/recall/recall.toml` when a config dir exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("recall").join("recall.toml"))
}

/// Builds the full layered Figment without extracting it.
pub fn build_figment() -> Figment {
    let mut figment = Figment::new()
        .merge(Serialized::defaults(RecallConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH));
    if let Some(user) = user_config_path() {
        figment = figment.merge(Toml::file(user));
    }
    figment.merge(Toml::file(LOCAL_CONFIG_FILE)).merge(env_provider())
}

/// Loads configuration from the standard hierarchy.
pub fn load_config() -> Result<RecallConfig, figment::Error> {
    build_figment().extract()
}

/// Loads configuration from an inline TOML string (defaults underneath, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<RecallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RecallConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Loads configuration from one explicit file, with env overrides on top.
pub fn load_config_from_path(path: &Path) -> Result<RecallConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(RecallConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Maps `RECALL_<SECTION>_<KEY>` to `<section>.<key>`.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `RECALL_CONTEXT_MAX_CHARS` maps to `context.max_chars`.
fn env_provider() -> Env {
    Env::prefixed("RECALL_").map(|key| {
        let key_str = key.as_str();
        for section in SECTIONS {
            if let Some(rest) = key_str
                .strip_prefix(section)
                .and_then(|r| r.strip_prefix('_'))
            {
                return format!("{section}.{rest}").into();
            }
        }
        key_str.to_string().into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::StorageBackend;

    #[test]
    fn empty_string_yields_defaults() {
        let config = load_config_from_str("").unwrap();
        assert_eq!(config.context.max_chars, 3000);
        assert_eq!(config.storage.backend, StorageBackend::File);
    }

    #[test]
    fn env_overrides_map_into_sections() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("RECALL_CONTEXT_MAX_CHARS", "1200");
            jail.set_env("RECALL_STORAGE_BACKEND", "memory");
            jail.set_env("RECALL_GEMINI_API_KEY", "k-123");
            jail.create_file("recall.toml", "[agent]\nname = \"Ada\"\n")?;

            let config = load_config_from_path(Path::new("recall.toml"))?;
            assert_eq!(config.agent.name, "Ada");
            assert_eq!(config.context.max_chars, 1200);
            assert_eq!(config.storage.backend, StorageBackend::Memory);
            assert_eq!(config.gemini.api_key.as_deref(), Some("k-123"));
            Ok(())
        });
    }
}
