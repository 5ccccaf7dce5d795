// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Blob-store backends for the persisted conversation history.
//!
//! The message store writes one opaque blob under one key. Where that blob
//! lives is chosen by `[storage].backend`:
//!
//! - `file`: `<path>/<key>.json`, replaced atomically on every write
//! - `sqlite`: a `kv` table in `<path>/recall.db`
//! - `memory`: process-local, lost on exit

pub mod file;
pub mod memory;
pub mod sqlite;

use std::path::Path;
use std::sync::Arc;

use recall_config::model::{StorageBackend, StorageConfig};
use recall_core::{BlobStore, RecallError};
use tracing::info;

pub use file::FileBlobStore;
pub use memory::MemoryBlobStore;
pub use sqlite::SqliteBlobStore;

/// Builds the backend selected by `config`.
pub fn open_blob_store(config: &StorageConfig) -> Result<Arc<dyn BlobStore>, RecallError> {
    let store: Arc<dyn BlobStore> = match config.backend {
        StorageBackend::File => Arc::new(FileBlobStore::new(&config.path)),
        StorageBackend::Sqlite => Arc::new(SqliteBlobStore::open(
            Path::new(&config.path).join(sqlite::DATABASE_FILE),
        )?),
        StorageBackend::Memory => Arc::new(MemoryBlobStore::new()),
    };
    info!(backend = store.name(), path = %config.path, "blob store ready");
    Ok(store)
}
