// SPDX-FileCopyrightText: 2026 Recall Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reading files from disk into one-shot [`Attachment`]s.

use std::path::Path;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use recall_core::{Attachment, RecallError};

/// Attachments larger than this are refused before encoding.
pub const MAX_ATTACHMENT_BYTES: u64 = 20 * 1024 * 1024;

/// Reads `path` and encodes it as a base64 [`Attachment`].
pub fn load_attachment(path: &Path) -> Result<Attachment, RecallError> {
    let meta = std::fs::metadata(path)
        .map_err(|e| RecallError::Internal(format!("cannot read {}: {e}", path.display())))?;
    if meta.len() > MAX_ATTACHMENT_BYTES {
        return Err(RecallError::Internal(format!(
            "{} is {} bytes; attachments are limited to {MAX_ATTACHMENT_BYTES}",
            path.display(),
            meta.len()
        )));
    }
    let bytes = std::fs::read(path)
        .map_err(|e| RecallError::Internal(format!("cannot read {}: {e}", path.display())))?;
    Ok(Attachment {
        mime_type: mime_type_for(path).to_string(),
        data: STANDARD.encode(bytes),
    })
}

/// MIME type guessed from the file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "csv" => "text/csv",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}
