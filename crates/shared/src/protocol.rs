use serde::{Deserialize, Serialize};

use crate::{domain::ProgressSnapshot, error::TransferError};

/// What the server handed back once the body was fully sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferReceipt {
    pub status: u16,
    pub bytes_sent: u64,
}

pub type TransferOutcome = Result<TransferReceipt, TransferError>;

/// One event on a transfer's stream. Zero or more `Progress` events precede
/// exactly one `Finished`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum TransferEvent {
    Progress(ProgressSnapshot),
    Finished(TransferOutcome),
}

impl TransferEvent {
    pub fn progress(loaded: u64, total: u64) -> Self {
        Self::Progress(ProgressSnapshot::new(loaded, total))
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished(_))
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
