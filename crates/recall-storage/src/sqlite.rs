// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite blob store: a single `kv` table in WAL mode.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use recall_core::{AdapterType, BlobStore, HealthStatus, PluginAdapter, RecallError};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

/// File name used inside the configured storage directory.
pub const DATABASE_FILE: &str = "recall.db";

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS kv (
    key        TEXT PRIMARY KEY NOT NULL,
    value      BLOB NOT NULL,
    updated_at TEXT NOT NULL
);
";

/// Blob store keeping every key as one row of the `kv` table.
///
/// The connection is guarded by a mutex; blob stores are called from
/// synchronous code and writes are small.
pub struct SqliteBlobStore {
    conn: Mutex<Connection>,
}

impl SqliteBlobStore {
    /// Opens (or creates) the database at `path` and applies the schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, RecallError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(RecallError::write)?;
        }
        let conn = Connection::open(path).map_err(RecallError::write)?;
        conn.execute_batch("PRAGMA journal_mode = WAL; PRAGMA synchronous = NORMAL;")
            .map_err(RecallError::write)?;
        Self::init(conn, &path.display().to_string())
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self, RecallError> {
        let conn = Connection::open_in_memory().map_err(RecallError::write)?;
        Self::init(conn, ":memory:")
    }

    fn init(conn: Connection, label: &str) -> Result<Self, RecallError> {
        conn.execute_batch(SCHEMA).map_err(RecallError::write)?;
        debug!(database = %label, "sqlite blob store opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, RecallError> {
        self.conn
            .lock()
            .map_err(|_| RecallError::Internal("sqlite connection lock poisoned".to_string()))
    }
}

impl std::fmt::Debug for SqliteBlobStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteBlobStore").finish_non_exhaustive()
    }
}

#[async_trait]
impl PluginAdapter for SqliteBlobStore {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, RecallError> {
        let conn = self.conn()?;
        match conn.execute_batch("SELECT 1;") {
            Ok(()) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

impl BlobStore for SqliteBlobStore {
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError> {
        let updated_at = chrono::Utc::now().to_rfc3339();
        self.conn()?
            .execute(
                "INSERT INTO kv (key, value, updated_at) VALUES (?1, ?2, ?3)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at",
                params![key, blob, updated_at],
            )
            .map_err(RecallError::write)?;
        debug!(key, bytes = blob.len(), "blob written");
        Ok(())
    }

    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError> {
        self.conn()?
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()
            .map_err(RecallError::read)
    }
}
