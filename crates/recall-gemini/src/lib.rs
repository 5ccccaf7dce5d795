// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Google Gemini generation adapter for Recall.
//!
//! Implements [`GenerationAdapter`] over the `generateContent` REST endpoint.
//! The adapter flattens a [`GenerationRequest`] into one user turn and
//! returns the first candidate's text. Post-processing of that text (bold
//! stripping, fallback replies) belongs to the session, not to this crate.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use recall_config::model::GeminiConfig;
use recall_core::{
    AdapterType, GenerationAdapter, GenerationRequest, HealthStatus, PluginAdapter, RecallError,
};
use tracing::{debug, info};

use crate::client::GeminiClient;
use crate::types::{Content, GenerateContentRequest, InlineData, Part};

/// Environment variable consulted when `gemini.api_key` is unset.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini provider implementing [`GenerationAdapter`].
///
/// API key resolution order: config -> `GEMINI_API_KEY` env var -> error.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: GeminiClient,
}

impl GeminiProvider {
    /// Creates a provider from the `[gemini]` config section.
    pub fn new(config: &GeminiConfig) -> Result<Self, RecallError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GeminiClient::new(
            api_key,
            config.model.clone(),
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
        )?;
        info!(model = %config.model, "Gemini provider initialized");
        Ok(Self { client })
    }

    /// Creates a provider with an existing client (for testing).
    #[cfg(test)]
    fn with_client(client: GeminiClient) -> Self {
        Self { client }
    }
}

/// Flattens a [`GenerationRequest`] into the single user turn Gemini receives.
///
/// The text part is the system prompt, the context block (when non-empty)
/// and the new message, newline-joined. An attachment becomes a second
/// `inline_data` part.
pub fn to_generate_request(request: &GenerationRequest) -> GenerateContentRequest {
    let text = [
        request.system_prompt.as_str(),
        request.context_prompt.as_str(),
        request.message.as_str(),
    ]
    .into_iter()
    .filter(|s| !s.is_empty())
    .collect::<Vec<_>>()
    .join("\n");

    let mut parts = vec![Part::Text { text }];
    if let Some(attachment) = &request.attachment {
        parts.push(Part::InlineData {
            inline_data: InlineData {
                mime_type: attachment.mime_type.clone(),
                data: attachment.data.clone(),
            },
        });
    }

    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts,
        }],
    }
}

#[async_trait]
impl PluginAdapter for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Generation
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        // Constructing the client already validated the key and URL.
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl GenerationAdapter for GeminiProvider {
    async fn generate(&self, request: GenerationRequest) -> Result<String, RecallError> {
        let body = to_generate_request(&request);
        debug!(
            model = %self.client.model(),
            has_attachment = request.attachment.is_some(),
            context_chars = request.context_prompt.chars().count(),
            "sending generation request"
        );
        let response = self.client.generate_content(&body).await?;
        Ok(response.first_text().map(str::trim).unwrap_or_default().to_string())
    }
}

/// Resolves the API key from config or environment.
fn resolve_api_key(config_key: &Option<String>) -> Result<String, RecallError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(key.clone());
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .ok_or_else(|| {
            RecallError::Config(format!(
                "Gemini API key not found. Set gemini.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
