// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob store that remembers which thread touched it.

use std::collections::HashMap;
use std::sync::Mutex;
use std::thread::ThreadId;

use async_trait::async_trait;
use recall_core::{AdapterType, BlobStore, HealthStatus, PluginAdapter, RecallError};

/// An in-memory blob store recording the thread of every read and write.
#[derive(Debug, Default)]
pub struct TrackingBlobStore {
    blobs: Mutex<HashMap<String, Vec<u8>>>,
    threads: Mutex<Vec<ThreadId>>,
}

impl TrackingBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Threads that performed I/O, in call order.
    pub fn io_threads(&self) -> Vec<ThreadId> {
        self.threads.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn track(&self) {
        self.threads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(std::thread::current().id());
    }
}

#[async_trait]
impl PluginAdapter for TrackingBlobStore {
    fn name(&self) -> &str {
        "tracking"
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

impl BlobStore for TrackingBlobStore {
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError> {
        self.track();
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError> {
        self.track();
        Ok(self
            .blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }
}
