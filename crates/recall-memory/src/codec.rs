// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON encoding of the persisted history blob.
//!
//! The blob is an array of `{role, content, timestamp, embedding}` records
//! in chronological order.

use recall_core::RecallError;

use crate::types::Message;

/// Serializes the history for the blob store.
pub fn encode_history(messages: &[Message]) -> Result<Vec<u8>, RecallError> {
    serde_json::to_vec(messages).map_err(RecallError::write)
}

/// Parses a persisted blob. Any decode failure is reported as corruption.
pub fn decode_history(blob: &[u8]) -> Result<Vec<Message>, RecallError> {
    serde_json::from_slice(blob).map_err(|e| RecallError::Corrupt {
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use recall_core::Role;

    #[test]
    fn round_trip_is_exact() {
        let history = vec![
            Message::new(Role::User, "Tell me about Rust, please!", 1_700_000_000_000),
            Message::new(Role::Bot, "Rust is a systems language.", 1_700_000_000_450),
            Message::new(Role::User, "", 1_700_000_001_000),
        ];
        let blob = encode_history(&history).unwrap();
        assert_eq!(decode_history(&blob).unwrap(), history);
    }

    #[test]
    fn empty_history_round_trips() {
        let blob = encode_history(&[]).unwrap();
        assert_eq!(blob, b"[]");
        assert!(decode_history(&blob).unwrap().is_empty());
    }

    #[test]
    fn garbage_is_corrupt() {
        let err = decode_history(b"{not json").unwrap_err();
        assert!(matches!(err, RecallError::Corrupt { .. }));
    }

    #[test]
    fn unknown_role_is_corrupt() {
        let blob = br#"[{"role":"system","content":"x","timestamp":1,"embedding":{"x":1}}]"#;
        assert!(matches!(
            decode_history(blob).unwrap_err(),
            RecallError::Corrupt { .. }
        ));
    }
}
