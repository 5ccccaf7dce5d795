// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Recall conversation-context engine.
//!
//! Provides the error type, shared value types, and the adapter traits at
//! the engine's three boundaries: persistence ([`BlobStore`]), generation
//! ([`GenerationAdapter`]) and diagnostics ([`DiagnosticsSink`]).

pub mod error;
pub mod traits;
pub mod types;

pub use error::RecallError;
pub use types::{AdapterType, Attachment, GenerationRequest, HealthStatus, Role};

pub use traits::{
    BlobStore, DiagnosticEvent, DiagnosticsSink, GenerationAdapter, PluginAdapter,
    TracingDiagnostics,
};
