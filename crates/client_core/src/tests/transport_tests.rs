use super::*;
use futures::StreamExt;
use shared::protocol::TransferReceipt;

fn receipt() -> TransferReceipt {
    TransferReceipt {
        status: 200,
        bytes_sent: 10,
    }
}

#[tokio::test]
async fn events_arrive_in_order_and_stop_after_terminal() {
    let (mut handle, sink) = TransferHandle::channel();
    sink.events.progress(ProgressSnapshot::new(4, 10));
    sink.events.progress(ProgressSnapshot::new(10, 10));
    sink.events.finish(Ok(receipt()));
    sink.events.progress(ProgressSnapshot::new(10, 10));

    assert_eq!(handle.next_event().await, Some(TransferEvent::progress(4, 10)));
    assert_eq!(handle.next_event().await, Some(TransferEvent::progress(10, 10)));
    assert_eq!(
        handle.next_event().await,
        Some(TransferEvent::Finished(Ok(receipt())))
    );
    assert!(handle.is_finished());
    assert_eq!(handle.next_event().await, None);
}

#[tokio::test]
async fn vanished_transport_yields_a_failure() {
    let (mut handle, sink) = TransferHandle::channel();
    sink.events.progress(ProgressSnapshot::new(1, 2));
    drop(sink);

    assert_eq!(handle.next_event().await, Some(TransferEvent::progress(1, 2)));
    match handle.next_event().await {
        Some(TransferEvent::Finished(Err(TransferError::Failed { .. }))) => {}
        other => panic!("unexpected event: {other:?}"),
    }
    assert_eq!(handle.next_event().await, None);
}

#[tokio::test]
async fn abort_wakes_the_cancel_signal() {
    let (mut handle, sink) = TransferHandle::channel();
    let TransferSink { events, mut cancel } = sink;

    handle.abort();
    cancel.requested().await;
    events.finish(Err(TransferError::Aborted));

    assert_eq!(
        handle.next_event().await,
        Some(TransferEvent::Finished(Err(TransferError::Aborted)))
    );
}

#[tokio::test]
async fn dropping_the_handle_cancels() {
    let (handle, sink) = TransferHandle::channel();
    let TransferSink { events, mut cancel } = sink;

    drop(handle);
    cancel.requested().await;
    assert!(!events.progress(ProgressSnapshot::new(1, 1)));
}

#[tokio::test]
async fn stream_ends_with_the_terminal_event() {
    let (handle, sink) = TransferHandle::channel();
    sink.events.progress(ProgressSnapshot::new(5, 10));
    sink.events.finish(Err(TransferError::failed("boom")));

    let events: Vec<_> = handle.into_stream().collect().await;
    assert_eq!(
        events,
        vec![
            TransferEvent::progress(5, 10),
            TransferEvent::Finished(Err(TransferError::failed("boom"))),
        ]
    );
}
