use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Path of the submission endpoint, relative to the server root.
pub const SUBMIT_PATH: &str = "submit";
/// Multipart field carrying the file contents.
pub const FILE_FIELD: &str = "file";
/// Multipart field carrying the short identifier flag.
pub const CREATE_SHORT_ID_FIELD: &str = "create_short_id";

pub const UPLOAD_FAILED_TEXT: &str = "Upload failed.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransferId(pub Uuid);

impl TransferId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransferId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TransferId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Lifecycle of the single upload session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UploadState {
    Ready,
    Uploading,
    Done,
}

impl UploadState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "ready",
            Self::Uploading => "uploading",
            Self::Done => "done",
        }
    }

    /// Whether the upload trigger is shown while in this state.
    pub fn shows_upload_button(self) -> bool {
        match self {
            Self::Ready => true,
            Self::Uploading | Self::Done => false,
        }
    }
}

impl fmt::Display for UploadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte counters reported by the transport on a progress event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSnapshot {
    pub loaded: u64,
    pub total: u64,
}

impl ProgressSnapshot {
    pub fn new(loaded: u64, total: u64) -> Self {
        Self { loaded, total }
    }

    /// Percentage rounded half away from zero and capped at 100.
    /// `None` when the total is unknown (zero).
    pub fn percent(&self) -> Option<u8> {
        if self.total == 0 {
            return None;
        }
        let loaded = u128::from(self.loaded);
        let total = u128::from(self.total);
        let rounded = (loaded * 200 + total) / (total * 2);
        Some(rounded.min(100) as u8)
    }

    pub fn progress_text(&self) -> String {
        match self.percent() {
            Some(percent) => format!("Uploading... {percent}%"),
            None => "Uploading...".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
