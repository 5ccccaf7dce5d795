// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Persistence boundary: a durable key-value blob store.

use crate::error::RecallError;
use crate::traits::adapter::PluginAdapter;

/// A durable key-value store holding opaque blobs.
///
/// The message store keeps its whole history under a single key, so
/// implementations only need whole-value replace semantics. Calls are
/// synchronous; the history is small and written once per turn.
pub trait BlobStore: PluginAdapter {
    /// Replaces the blob stored under `key`.
    fn write(&self, key: &str, blob: &[u8]) -> Result<(), RecallError>;

    /// Returns the blob stored under `key`, or `None` if nothing was ever written.
    fn read(&self, key: &str) -> Result<Option<Vec<u8>>, RecallError>;
}
