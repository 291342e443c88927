use std::{io, path::PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use client_core::{
    HttpTransport, SelectedFile, StartOutcome, TransferController, UploadTransport, UploadView,
};
use shared::{
    domain::TransferId,
    error::TransferError,
    protocol::{TransferEvent, TransferOutcome},
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod view;

use config::{load_settings, Settings};
use view::{OutputFormat, TerminalView};

type Controller = TransferController<HttpTransport, TerminalView<std::io::Stdout>>;

/// Upload a file to a file hosting server and follow its progress.
#[derive(Parser, Debug)]
struct Args {
    /// File to upload. Nothing is sent when omitted.
    file: Option<PathBuf>,
    /// Server root, e.g. http://localhost:8080/.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./uploader.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Ask the server to create a short identifier for the file.
    #[arg(long)]
    short_id: bool,
    #[arg(long)]
    chunk_size: Option<usize>,
    /// Print transfer events as JSON lines.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn apply(&self, settings: &mut Settings) {
        if let Some(v) = &self.server_url {
            settings.server_url = v.clone();
        }
        if let Some(v) = self.chunk_size {
            settings.chunk_size = v;
        }
        if self.short_id {
            settings.create_short_id = true;
        }
    }
}

enum Step {
    Event(Option<TransferEvent>),
    Signal(io::Result<()>),
}

/// Starts the upload. Without a selected file nothing happens and nothing is
/// reported beyond a debug trace.
fn begin_upload<T, V>(controller: &mut TransferController<T, V>) -> Result<Option<TransferId>>
where
    T: UploadTransport,
    V: UploadView,
{
    match controller.start_upload() {
        StartOutcome::Started(transfer_id) => Ok(Some(transfer_id)),
        StartOutcome::NoFileSelected => {
            debug!("upload: no file given, nothing to do");
            Ok(None)
        }
        StartOutcome::Busy => bail!("an upload is already in progress"),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SignalAction {
    Abort,
    StopListening,
}

fn signal_action(result: io::Result<()>) -> SignalAction {
    match result {
        Ok(()) => SignalAction::Abort,
        Err(err) => {
            warn!(error = %err, "upload: cannot listen for Ctrl-C");
            SignalAction::StopListening
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    args.apply(&mut settings);
    let base_url = settings.server_url()?;

    let selection = match &args.file {
        Some(path) => Some(SelectedFile::from_path(path, Some(settings.max_file_size)).await?),
        None => None,
    };
    let format = if args.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };

    let transport = HttpTransport::new(base_url).with_chunk_size(settings.chunk_size);
    let view = TerminalView::stdout(selection, settings.create_short_id, format);
    let mut controller = TransferController::new(transport, view);

    let Some(transfer_id) = begin_upload(&mut controller)? else {
        return Ok(());
    };
    info!(%transfer_id, server_url = %settings.server_url, "upload: sending");

    let outcome = drive(&mut controller, args.json).await?;
    debug!(
        state = %controller.state(),
        upload_button_visible = controller.view().upload_button_visible(),
        "upload: session finished"
    );
    match outcome {
        Some(Ok(_)) => {
            if controller.view().reload_requested() {
                let status = controller
                    .transport()
                    .refresh_page()
                    .await
                    .context("upload finished but reloading the server page failed")?;
                info!(%status, "upload: page reloaded");
            }
            if !args.json {
                println!("Upload complete.");
            }
            Ok(())
        }
        Some(Err(TransferError::Aborted)) => bail!("upload aborted"),
        Some(Err(TransferError::Failed { .. })) => bail!("upload failed"),
        None => bail!("transfer ended without a result"),
    }
}

/// Applies transfer events until the terminal one; Ctrl-C aborts the transfer.
async fn drive(controller: &mut Controller, json: bool) -> Result<Option<TransferOutcome>> {
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut listening = true;

    loop {
        let step = tokio::select! {
            event = controller.next_event() => Step::Event(event),
            result = &mut ctrl_c, if listening => Step::Signal(result),
        };

        let event = match step {
            Step::Signal(result) => {
                listening = false;
                if signal_action(result) == SignalAction::Abort {
                    warn!("upload: interrupted, aborting transfer");
                    controller.abort();
                }
                continue;
            }
            Step::Event(None) => return Ok(None),
            Step::Event(Some(event)) => event,
        };

        if json {
            println!("{}", serde_json::to_string(&event)?);
        }
        let outcome = match &event {
            TransferEvent::Finished(outcome) => Some(outcome.clone()),
            TransferEvent::Progress(_) => None,
        };
        controller.handle_event(event);
        if outcome.is_some() {
            return Ok(outcome);
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
