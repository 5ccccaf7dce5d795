// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Process-local blob store. Nothing survives a restart.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use recall_core::{AdapterType, BlobStore, HealthStatus, PluginAdapter, RecallError};

/// Blob store backed by a `HashMap`, for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> RecallError {
        RecallError::Internal("memory blob store lock poisoned".to_string())
    }
}

#[async_trait]
impl PluginAdapter for MemoryBlobStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        Ok(HealthStatus::Healthy)
    }
}

impl BlobStore for MemoryBlobStore {
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError> {
        self.blobs
            .lock()
            .map_err(|_| Self::poisoned())?
            .insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError> {
        Ok(self
            .blobs
            .lock()
            .map_err(|_| Self::poisoned())?
            .get(key)
            .cloned())
    }
}
