//! Transfer plumbing between a transport and the controller: a cancellable
//! handle on one side, an event sink on the other.

use futures::{stream, Stream};
use shared::{
    domain::ProgressSnapshot,
    error::TransferError,
    protocol::{TransferEvent, TransferOutcome},
};
use tokio::sync::{mpsc, oneshot};

use crate::view::TransferRequest;

/// Starts transfers. Implementations must return without waiting for the
/// transfer and report everything else through the returned handle.
pub trait UploadTransport {
    fn start(&self, request: TransferRequest) -> TransferHandle;
}

/// Controller-side end of one transfer.
///
/// The event channel exists before the transport sees the request, so no
/// early event can be missed. At most one terminal event is yielded; if the
/// transport goes away without reporting one, a failure is synthesized.
/// Dropping the handle cancels the transfer.
#[derive(Debug)]
pub struct TransferHandle {
    events: mpsc::UnboundedReceiver<TransferEvent>,
    cancel: Option<oneshot::Sender<()>>,
    finished: bool,
}

/// Transport-side end of one transfer.
#[derive(Debug)]
pub struct TransferSink {
    pub events: EventSender,
    pub cancel: CancelSignal,
}

#[derive(Debug, Clone)]
pub struct EventSender {
    tx: mpsc::UnboundedSender<TransferEvent>,
}

#[derive(Debug)]
pub struct CancelSignal {
    rx: oneshot::Receiver<()>,
}

impl TransferHandle {
    pub fn channel() -> (Self, TransferSink) {
        let (event_tx, event_rx) = mpsc::unbounded_channel();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        (
            Self {
                events: event_rx,
                cancel: Some(cancel_tx),
                finished: false,
            },
            TransferSink {
                events: EventSender { tx: event_tx },
                cancel: CancelSignal { rx: cancel_rx },
            },
        )
    }

    pub async fn next_event(&mut self) -> Option<TransferEvent> {
        if self.finished {
            return None;
        }

        let event = self.events.recv().await.unwrap_or_else(|| {
            TransferEvent::Finished(Err(TransferError::failed(
                "transport closed without a result",
            )))
        });
        if event.is_terminal() {
            self.finished = true;
            self.cancel = None;
        }
        Some(event)
    }

    /// Asks the transport to stop. The transfer still ends with a terminal
    /// event, normally `Finished(Err(Aborted))`.
    pub fn abort(&mut self) {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn into_stream(self) -> impl Stream<Item = TransferEvent> {
        stream::unfold(self, |mut handle| async move {
            let event = handle.next_event().await?;
            Some((event, handle))
        })
    }
}

impl EventSender {
    /// Returns `false` once the handle is gone.
    pub fn send(&self, event: TransferEvent) -> bool {
        self.tx.send(event).is_ok()
    }

    pub fn progress(&self, snapshot: ProgressSnapshot) -> bool {
        self.send(TransferEvent::Progress(snapshot))
    }

    pub fn finish(&self, outcome: TransferOutcome) -> bool {
        self.send(TransferEvent::Finished(outcome))
    }
}

impl CancelSignal {
    /// Resolves when an abort is requested or the handle is dropped.
    pub async fn requested(&mut self) {
        let _ = (&mut self.rx).await;
    }
}

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod tests;
