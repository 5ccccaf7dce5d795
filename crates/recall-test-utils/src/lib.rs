// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Recall integration tests.
//!
//! Provides test doubles for each engine boundary so session and store
//! behavior can be exercised without a network or a disk.
//!
//! # Components
//!
//! - [`MockGenerator`] - Scripted generation collaborator, optionally gated
//! - [`FailingBlobStore`] - Blob store whose reads or writes always fail
//! - [`RecordingDiagnostics`] - Diagnostics sink that records every report
//! - [`TrackingBlobStore`] - In-memory blob store that records which thread did I/O

pub mod failing_store;
pub mod mock_generator;
pub mod recording;
pub mod tracking_store;

pub use failing_store::FailingBlobStore;
pub use mock_generator::MockGenerator;
pub use recording::RecordingDiagnostics;
pub use tracking_store::TrackingBlobStore;
