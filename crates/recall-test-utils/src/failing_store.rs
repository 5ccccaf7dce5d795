// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob store that fails on demand.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use recall_core::{AdapterType, BlobStore, HealthStatus, PluginAdapter, RecallError};

/// A blob store whose writes, reads, or both always fail.
///
/// Operations that are not set to fail behave like an in-memory store.
#[derive(Debug, Default)]
pub struct FailingBlobStore {
    fail_writes: bool,
    fail_reads: bool,
    blobs: Mutex<HashMap<String, Vec<u8>>>,
}

impl FailingBlobStore {
    /// Every write fails; reads find nothing.
    pub fn writes() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    /// Every read fails; writes succeed.
    pub fn reads() -> Self {
        Self {
            fail_reads: true,
            ..Self::default()
        }
    }

    /// Both reads and writes fail.
    pub fn always() -> Self {
        Self {
            fail_writes: true,
            fail_reads: true,
            ..Self::default()
        }
    }
}

#[async_trait]
impl PluginAdapter for FailingBlobStore {
    fn name(&self) -> &str {
        "failing"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        Ok(HealthStatus::Unhealthy("configured to fail".to_string()))
    }
}

impl BlobStore for FailingBlobStore {
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError> {
        if self.fail_writes {
            return Err(RecallError::write(std::io::Error::other("disk full")));
        }
        self.blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key.to_string(), blob.to_vec());
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError> {
        if self.fail_reads {
            return Err(RecallError::read(std::io::Error::other(
                "permission denied",
            )));
        }
        Ok(self
            .blobs
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(key)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_failure_leaves_reads_working() {
        let store = FailingBlobStore::writes();
        assert!(matches!(
            store.write("k", b"x"),
            Err(RecallError::PersistenceWrite { .. })
        ));
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn read_failure_leaves_writes_working() {
        let store = FailingBlobStore::reads();
        store.write("k", b"x").unwrap();
        assert!(matches!(
            store.read("k"),
            Err(RecallError::PersistenceRead { .. })
        ));
    }
}
