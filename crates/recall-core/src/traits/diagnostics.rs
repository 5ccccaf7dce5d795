// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics boundary: where non-fatal failures are reported.
//!
//! Persistence and generation failures never reach the end user. They are
//! surfaced here instead, so operators (and tests) can observe them.

use strum::{Display, EnumString};
use tracing::warn;

/// Kinds of non-fatal events the engine reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticEvent {
    /// Saving the history blob failed; in-memory state is still valid.
    PersistenceWriteFailure,
    /// Reading the history blob failed; the store was reset to empty.
    PersistenceReadFailure,
    /// The history blob could not be decoded; the store was reset to empty.
    PersistenceCorrupt,
    /// A reply arrived after its session was cleared and was dropped.
    StaleReplyDiscarded,
    /// The generation collaborator returned an error.
    GenerationFailure,
}

/// A sink for `(event, detail)` diagnostic reports.
pub trait DiagnosticsSink: Send + Sync {
    /// Records one diagnostic event.
    fn report(&self, event: DiagnosticEvent, detail: &str);
}

/// Default sink: structured `warn!` log line plus a labelled counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl DiagnosticsSink for TracingDiagnostics {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        warn!(event = %event, detail = %detail, "recall diagnostic");
        metrics::counter!("recall_diagnostics_total", "event" => event.to_string()).increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use tracing_test::traced_test;

    #[test]
    fn event_names_are_snake_case() {
        assert_eq!(
            DiagnosticEvent::PersistenceWriteFailure.to_string(),
            "persistence_write_failure"
        );
        assert_eq!(
            DiagnosticEvent::from_str("stale_reply_discarded").unwrap(),
            DiagnosticEvent::StaleReplyDiscarded
        );
    }

    #[test]
    #[traced_test]
    fn tracing_sink_logs_event_and_detail() {
        TracingDiagnostics.report(DiagnosticEvent::PersistenceCorrupt, "expected value at line 1");
        assert!(logs_contain("persistence_corrupt"));
        assert!(logs_contain("expected value at line 1"));
    }
}
