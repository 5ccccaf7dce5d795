// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across adapter traits and the Recall crates.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Who authored a chat turn.
///
/// The string form (`user` / `bot`) is both the persisted representation
/// and the label used when rendering `role: content` context lines.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

impl Role {
    /// Label used in rendered context lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Bot => "bot",
        }
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Generation,
}

/// A one-shot file attachment forwarded to the generation collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// MIME type, e.g. `image/png`.
    pub mime_type: String,
    /// Base64-encoded payload (standard alphabet, no data-URL prefix).
    pub data: String,
}

/// Everything the generation collaborator receives for one turn.
///
/// The core fills this in; it never formats the collaborator's wire
/// protocol itself.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    /// Persona / instruction prompt.
    pub system_prompt: String,
    /// Selected history (and optional topic summary) rendered as text.
    pub context_prompt: String,
    /// The raw new user message.
    pub message: String,
    /// Optional attachment consumed by this turn.
    pub attachment: Option<Attachment>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_string_forms_agree() {
        for role in [Role::User, Role::Bot] {
            assert_eq!(role.to_string(), role.as_str());
            assert_eq!(Role::from_str(role.as_str()).unwrap(), role);
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role.as_str()));
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!(Role::from_str("assistant").is_err());
        assert!(serde_json::from_str::<Role>("\"assistant\"").is_err());
    }

    #[test]
    fn adapter_type_round_trips() {
        for variant in [AdapterType::Storage, AdapterType::Generation] {
            let parsed = AdapterType::from_str(&variant.to_string()).unwrap();
            assert_eq!(parsed, variant);
        }
    }
}
