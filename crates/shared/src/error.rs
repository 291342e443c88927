use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a transfer ended without completing.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransferError {
    #[error("transfer aborted")]
    Aborted,
    #[error("transfer failed: {message}")]
    Failed { message: String },
}

impl TransferError {
    pub fn failed(message: impl Into<String>) -> Self {
        Self::Failed {
            message: message.into(),
        }
    }

    pub fn is_abort(&self) -> bool {
        matches!(self, Self::Aborted)
    }
}
