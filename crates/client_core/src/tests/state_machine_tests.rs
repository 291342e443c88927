use super::*;
use crate::test_support::RecordingView;

#[test]
fn first_access_initializes_to_ready() {
    let mut machine = UploadStateMachine::new();
    assert_eq!(machine.get(), UploadState::Ready);
    assert_eq!(machine.get(), UploadState::Ready);
}

#[test]
fn set_mirrors_state_onto_upload_button() {
    let mut machine = UploadStateMachine::new();
    let mut view = RecordingView::default();

    machine.set(UploadState::Uploading, &mut view);
    assert_eq!(machine.get(), UploadState::Uploading);
    assert_eq!(view.upload_button_visible, Some(false));

    machine.set(UploadState::Done, &mut view);
    assert_eq!(machine.get(), UploadState::Done);
    assert_eq!(view.upload_button_visible, Some(false));

    machine.set(UploadState::Ready, &mut view);
    assert_eq!(machine.get(), UploadState::Ready);
    assert_eq!(view.upload_button_visible, Some(true));
}

#[test]
fn reset_rearms_a_finished_session() {
    let mut machine = UploadStateMachine::new();
    let mut view = RecordingView::default();
    machine.set(UploadState::Done, &mut view);

    assert!(machine.reset(&mut view));
    assert_eq!(machine.get(), UploadState::Ready);
    assert_eq!(view.upload_button_visible, Some(true));
}

#[test]
fn reset_leaves_inflight_and_ready_sessions_alone() {
    let mut machine = UploadStateMachine::new();
    let mut view = RecordingView::default();

    assert!(!machine.reset(&mut view));
    assert_eq!(machine.get(), UploadState::Ready);
    assert_eq!(view.upload_button_visible, None);

    machine.set(UploadState::Uploading, &mut view);
    assert!(!machine.reset(&mut view));
    assert_eq!(machine.get(), UploadState::Uploading);
    assert_eq!(view.upload_button_visible, Some(false));
}
