// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter traits at the three boundaries of the context engine:
//! persistence, generation, and diagnostics.

pub mod adapter;
pub mod blob_store;
pub mod diagnostics;
pub mod generation;

pub use adapter::PluginAdapter;
pub use blob_store::BlobStore;
pub use diagnostics::{DiagnosticEvent, DiagnosticsSink, TracingDiagnostics};
pub use generation::GenerationAdapter;
