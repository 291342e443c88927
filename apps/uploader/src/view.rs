//! Terminal rendering of the upload page.

use std::io::{self, Write};

use client_core::{SelectedFile, UploadView};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    /// Events are printed by the caller; the view stays quiet.
    Json,
}

pub struct TerminalView<W: Write> {
    selection: Option<SelectedFile>,
    create_short_id: bool,
    format: OutputFormat,
    out: W,
    upload_button_visible: bool,
    progress_text: Option<String>,
    reload_requested: bool,
}

impl TerminalView<io::Stdout> {
    pub fn stdout(
        selection: Option<SelectedFile>,
        create_short_id: bool,
        format: OutputFormat,
    ) -> Self {
        Self::new(selection, create_short_id, format, io::stdout())
    }
}

impl<W: Write> TerminalView<W> {
    pub fn new(
        selection: Option<SelectedFile>,
        create_short_id: bool,
        format: OutputFormat,
        out: W,
    ) -> Self {
        Self {
            selection,
            create_short_id,
            format,
            out,
            upload_button_visible: true,
            progress_text: None,
            reload_requested: false,
        }
    }

    pub fn upload_button_visible(&self) -> bool {
        self.upload_button_visible
    }

    pub fn reload_requested(&self) -> bool {
        self.reload_requested
    }
}

#[cfg(test)]
impl<W: Write> TerminalView<W> {
    pub(crate) fn progress_text(&self) -> Option<&str> {
        self.progress_text.as_deref()
    }

    pub(crate) fn output(&self) -> &W {
        &self.out
    }
}

impl<W: Write> UploadView for TerminalView<W> {
    /// The picked file is handed over once.
    fn selected_file(&mut self) -> Option<SelectedFile> {
        self.selection.take()
    }

    fn create_short_id(&self) -> bool {
        self.create_short_id
    }

    fn set_upload_button_visible(&mut self, visible: bool) {
        debug!(visible, "upload: button visibility");
        self.upload_button_visible = visible;
    }

    fn set_progress_text(&mut self, text: &str) {
        if self.progress_text.as_deref() == Some(text) {
            return;
        }
        self.progress_text = Some(text.to_string());
        if self.format == OutputFormat::Text {
            if let Err(err) = writeln!(self.out, "{text}") {
                debug!(error = %err, "upload: failed to write progress");
            }
        }
    }

    fn reload(&mut self) {
        self.reload_requested = true;
    }
}

#[cfg(test)]
#[path = "tests/view_tests.rs"]
mod tests;
