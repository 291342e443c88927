use shared::{
    domain::{TransferId, UploadState, UPLOAD_FAILED_TEXT},
    error::TransferError,
    protocol::{TransferEvent, TransferOutcome},
};
use tracing::{debug, info, warn};

use crate::{
    state_machine::UploadStateMachine,
    transport::{TransferHandle, UploadTransport},
    view::{TransferRequest, UploadView},
};

/// Result of asking for an upload to start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started(TransferId),
    /// Another upload owns the session; nothing was sent.
    Busy,
    NoFileSelected,
}

struct ActiveTransfer {
    id: TransferId,
    handle: TransferHandle,
}

/// Runs one upload at a time: starts the transfer and turns its events into
/// state transitions and progress text.
pub struct TransferController<T, V> {
    transport: T,
    view: V,
    machine: UploadStateMachine,
    active: Option<ActiveTransfer>,
}

impl<T: UploadTransport, V: UploadView> TransferController<T, V> {
    pub fn new(transport: T, view: V) -> Self {
        Self::with_state_machine(transport, view, UploadStateMachine::new())
    }

    pub fn with_state_machine(transport: T, view: V, machine: UploadStateMachine) -> Self {
        Self {
            transport,
            view,
            machine,
            active: None,
        }
    }

    pub fn state(&mut self) -> UploadState {
        self.machine.get()
    }

    pub fn is_uploading(&mut self) -> bool {
        self.state() == UploadState::Uploading
    }

    pub fn active_transfer(&self) -> Option<TransferId> {
        self.active.as_ref().map(|active| active.id)
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn start_upload(&mut self) -> StartOutcome {
        let state = self.machine.get();
        if state != UploadState::Ready {
            debug!(state = %state, "upload: start ignored, session busy");
            return StartOutcome::Busy;
        }

        let Some(file) = self.view.selected_file() else {
            debug!("upload: start ignored, no file selected");
            return StartOutcome::NoFileSelected;
        };
        let request = TransferRequest {
            file,
            create_short_id: self.view.create_short_id(),
        };

        let id = TransferId::new();
        info!(
            transfer_id = %id,
            file_name = %request.file.file_name,
            size_bytes = request.file.len(),
            create_short_id = request.create_short_id,
            "upload: transfer started"
        );
        let handle = self.transport.start(request);
        self.active = Some(ActiveTransfer { id, handle });
        self.machine.set(UploadState::Uploading, &mut self.view);

        StartOutcome::Started(id)
    }

    /// Applies one transfer event. Events arriving while no upload is in
    /// flight are dropped.
    pub fn handle_event(&mut self, event: TransferEvent) {
        let state = self.machine.get();
        if state != UploadState::Uploading {
            debug!(state = %state, ?event, "upload: event ignored outside an upload");
            return;
        }

        match event {
            TransferEvent::Progress(snapshot) => {
                self.view.set_progress_text(&snapshot.progress_text());
                self.machine.set(UploadState::Uploading, &mut self.view);
            }
            TransferEvent::Finished(outcome) => {
                let transfer_id = self.active.take().map(|active| active.id);
                match outcome {
                    Ok(receipt) => {
                        info!(
                            transfer_id = ?transfer_id,
                            status = receipt.status,
                            "upload: complete, reloading"
                        );
                        self.view.reload();
                    }
                    Err(TransferError::Failed { message }) => {
                        warn!(transfer_id = ?transfer_id, error = %message, "upload: failed");
                        self.view.set_progress_text(UPLOAD_FAILED_TEXT);
                    }
                    Err(TransferError::Aborted) => {
                        info!(transfer_id = ?transfer_id, "upload: aborted");
                    }
                }
                self.machine.set(UploadState::Done, &mut self.view);
            }
        }
    }

    /// Waits for the next event of the active transfer without applying it.
    pub async fn next_event(&mut self) -> Option<TransferEvent> {
        let active = self.active.as_mut()?;
        active.handle.next_event().await
    }

    /// Applies events until the active transfer ends and returns how it ended.
    /// `None` when no transfer was active.
    pub async fn run_to_completion(&mut self) -> Option<TransferOutcome> {
        while let Some(event) = self.next_event().await {
            let outcome = match &event {
                TransferEvent::Finished(outcome) => Some(outcome.clone()),
                TransferEvent::Progress(_) => None,
            };
            self.handle_event(event);
            if outcome.is_some() {
                return outcome;
            }
        }
        None
    }

    /// Requests cancellation of the active transfer. The resulting abort
    /// event still has to be applied.
    pub fn abort(&mut self) -> bool {
        match self.active.as_mut() {
            Some(active) => {
                info!(transfer_id = %active.id, "upload: abort requested");
                active.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Re-arms a finished session so a new upload may start.
    pub fn reset(&mut self) -> bool {
        self.machine.reset(&mut self.view)
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
