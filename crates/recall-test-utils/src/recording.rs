// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics sink that keeps every report for later assertions.

use std::sync::Mutex;

use recall_core::{DiagnosticEvent, DiagnosticsSink};

/// Records `(event, detail)` pairs in arrival order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<(DiagnosticEvent, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all reports so far.
    pub fn events(&self) -> Vec<(DiagnosticEvent, String)> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Number of reports of `event`.
    pub fn count(&self, event: DiagnosticEvent) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .filter(|(e, _)| *e == event)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).is_empty()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn report(&self, event: DiagnosticEvent, detail: &str) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((event, detail.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_counts() {
        let sink = RecordingDiagnostics::new();
        assert!(sink.is_empty());
        sink.report(DiagnosticEvent::GenerationFailure, "503");
        sink.report(DiagnosticEvent::PersistenceWriteFailure, "disk full");
        sink.report(DiagnosticEvent::GenerationFailure, "timeout");

        assert_eq!(sink.count(DiagnosticEvent::GenerationFailure), 2);
        assert_eq!(sink.count(DiagnosticEvent::StaleReplyDiscarded), 0);
        assert_eq!(
            sink.events()[1],
            (DiagnosticEvent::PersistenceWriteFailure, "disk full".to_string())
        );
    }
}
