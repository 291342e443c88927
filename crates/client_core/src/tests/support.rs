use std::cell::RefCell;

use crate::{
    transport::{EventSender, TransferHandle, TransferSink, UploadTransport},
    view::{SelectedFile, TransferRequest, UploadView},
};

#[derive(Debug, Default)]
pub struct RecordingView {
    pub selection: Option<SelectedFile>,
    pub create_short_id: bool,
    pub upload_button_visible: Option<bool>,
    pub progress_text: Option<String>,
    pub progress_history: Vec<String>,
    pub reloads: usize,
}

impl RecordingView {
    pub fn with_file(file_name: &str, contents: &[u8]) -> Self {
        Self {
            selection: Some(SelectedFile::new(file_name, contents)),
            ..Self::default()
        }
    }
}

impl UploadView for RecordingView {
    fn selected_file(&mut self) -> Option<SelectedFile> {
        self.selection.clone()
    }

    fn create_short_id(&self) -> bool {
        self.create_short_id
    }

    fn set_upload_button_visible(&mut self, visible: bool) {
        self.upload_button_visible = Some(visible);
    }

    fn set_progress_text(&mut self, text: &str) {
        self.progress_text = Some(text.to_string());
        self.progress_history.push(text.to_string());
    }

    fn reload(&mut self) {
        self.reloads += 1;
    }
}

/// Hands out handles whose events the test feeds by hand.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    requests: RefCell<Vec<TransferRequest>>,
    sinks: RefCell<Vec<Option<TransferSink>>>,
}

impl ScriptedTransport {
    pub fn start_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn request(&self, index: usize) -> TransferRequest {
        self.requests.borrow()[index].clone()
    }

    pub fn events(&self, index: usize) -> EventSender {
        self.sinks.borrow()[index]
            .as_ref()
            .expect("sink already taken")
            .events
            .clone()
    }

    pub fn take_sink(&self, index: usize) -> TransferSink {
        self.sinks.borrow_mut()[index]
            .take()
            .expect("sink already taken")
    }
}

impl UploadTransport for ScriptedTransport {
    fn start(&self, request: TransferRequest) -> TransferHandle {
        let (handle, sink) = TransferHandle::channel();
        self.requests.borrow_mut().push(request);
        self.sinks.borrow_mut().push(Some(sink));
        handle
    }
}
