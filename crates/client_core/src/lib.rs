//! Client-side upload core: a single-flight state machine and the controller
//! that drives one multipart transfer through it.

pub mod controller;
pub mod http;
pub mod state_machine;
pub mod transport;
pub mod view;

pub use controller::{StartOutcome, TransferController};
pub use http::{HttpTransport, DEFAULT_CHUNK_SIZE};
pub use state_machine::UploadStateMachine;
pub use transport::{CancelSignal, EventSender, TransferHandle, TransferSink, UploadTransport};
pub use view::{SelectedFile, SelectionError, TransferRequest, UploadView};

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
