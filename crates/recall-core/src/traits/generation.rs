// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generation boundary: the language-model collaborator.

use async_trait::async_trait;

use crate::error::RecallError;
use crate::traits::adapter::PluginAdapter;
use crate::types::GenerationRequest;

/// Produces a reply for an assembled request.
///
/// Implementations own their wire protocol entirely. An empty string is a
/// valid answer meaning "the collaborator returned no text".
#[async_trait]
pub trait GenerationAdapter: PluginAdapter {
    /// Generates reply text for the request.
    async fn generate(&self, request: GenerationRequest) -> Result<String, RecallError>;
}
