// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Recall context engine.

use thiserror::Error;

/// The error type shared by every Recall crate boundary.
///
/// The embedder, scorer, selector and summarizer are total functions and
/// never produce one of these. Persistence variants are non-fatal: the
/// message store reports them and keeps its in-memory state.
#[derive(Debug, Error)]
pub enum RecallError {
    /// Configuration errors (invalid TOML, bad values, missing secrets).
    #[error("configuration error: {0}")]
    Config(String),

    /// Writing the persisted history blob failed.
    #[error("persistence write failed: {source}")]
    PersistenceWrite {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Reading the persisted history blob failed.
    #[error("persistence read failed: {source}")]
    PersistenceRead {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The persisted blob was read but could not be decoded.
    #[error("persisted history is corrupt: {message}")]
    Corrupt { message: String },

    /// The generation collaborator failed (HTTP error, bad payload, API error).
    #[error("generation error: {message}")]
    Generation {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl RecallError {
    /// Wraps any error as a persistence write failure.
    pub fn write(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        RecallError::PersistenceWrite {
            source: Box::new(e),
        }
    }

    /// Wraps any error as a persistence read failure.
    pub fn read(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        RecallError::PersistenceRead {
            source: Box::new(e),
        }
    }

    /// True for the variants that originate at the persistence boundary.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            RecallError::PersistenceWrite { .. }
                | RecallError::PersistenceRead { .. }
                | RecallError::Corrupt { .. }
        )
    }
}
