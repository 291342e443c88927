use shared::domain::UploadState;
use tracing::debug;

use crate::view::UploadView;

/// Holds the lifecycle of the single upload session and mirrors it onto the
/// upload button.
#[derive(Debug, Default)]
pub struct UploadStateMachine {
    state: Option<UploadState>,
}

impl UploadStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state, initialized to `Ready` on first access.
    pub fn get(&mut self) -> UploadState {
        *self.state.get_or_insert(UploadState::Ready)
    }

    pub fn set(&mut self, state: UploadState, view: &mut dyn UploadView) {
        debug!(state = %state, "upload: state transition");
        self.state = Some(state);

        let visible = self.get().shows_upload_button();
        view.set_upload_button_visible(visible);
    }

    /// Moves a finished session back to `Ready`. Returns whether a transition
    /// happened; an in-flight upload is left alone.
    pub fn reset(&mut self, view: &mut dyn UploadView) -> bool {
        match self.get() {
            UploadState::Done => {
                self.set(UploadState::Ready, view);
                true
            }
            UploadState::Ready | UploadState::Uploading => false,
        }
    }
}

#[cfg(test)]
#[path = "tests/state_machine_tests.rs"]
mod tests;
