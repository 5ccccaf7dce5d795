// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Directory-backed blob store: one `<key>.json` file per key.
//!
//! Writes land in a temp file in the same directory and are renamed over
//! the target, so a crash mid-write leaves the previous blob intact.

use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use recall_core::{AdapterType, BlobStore, HealthStatus, PluginAdapter, RecallError};
use tracing::debug;

/// Blob store writing each key to its own file under `dir`.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, RecallError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if !valid {
            return Err(RecallError::Config(format!(
                "blob key `{key}` must be a plain file name ([A-Za-z0-9_.-], not starting with '.')"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

#[async_trait]
impl PluginAdapter for FileBlobStore {
    fn name(&self) -> &str {
        "file"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        match std::fs::metadata(&self.dir) {
            Ok(meta) if meta.is_dir() => Ok(HealthStatus::Healthy),
            Ok(_) => Ok(HealthStatus::Unhealthy(format!(
                "{} is not a directory",
                self.dir.display()
            ))),
            Err(_) => Ok(HealthStatus::Degraded(format!(
                "{} does not exist yet",
                self.dir.display()
            ))),
        }
    }
}

impl BlobStore for FileBlobStore {
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError> {
        let target = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir).map_err(RecallError::write)?;

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir).map_err(RecallError::write)?;
        tmp.write_all(blob).map_err(RecallError::write)?;
        tmp.as_file().sync_all().map_err(RecallError::write)?;
        tmp.persist(&target).map_err(|e| RecallError::write(e.error))?;

        debug!(path = %target.display(), bytes = blob.len(), "blob written");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError> {
        let path = self.path_for(key)?;
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(RecallError::read(e)),
        }
    }
}
