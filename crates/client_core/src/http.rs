use std::iter;

use anyhow::{Context, Result};
use bytes::Bytes;
use futures::{stream, Stream};
use reqwest::{
    multipart::{Form, Part},
    Body, Client, StatusCode,
};
use shared::{
    domain::{ProgressSnapshot, CREATE_SHORT_ID_FIELD, FILE_FIELD, SUBMIT_PATH},
    error::TransferError,
    protocol::{TransferOutcome, TransferReceipt},
};
use tracing::{info, warn};
use url::Url;

use crate::{
    transport::{EventSender, TransferHandle, TransferSink, UploadTransport},
    view::TransferRequest,
};

pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Posts the selected file as a multipart form to `<base>/submit`, reporting
/// progress as the file part is handed to the connection.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: Url,
    chunk_size: usize,
}

impl HttpTransport {
    pub fn new(base_url: Url) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: Url) -> Self {
        Self {
            http,
            base_url: with_trailing_slash(base_url),
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn submit_url(&self) -> Result<Url, url::ParseError> {
        self.base_url.join(SUBMIT_PATH)
    }

    /// Fetches the server index again so the caller sees the state the
    /// upload produced.
    pub async fn refresh_page(&self) -> Result<StatusCode> {
        let response = self
            .http
            .get(self.base_url.clone())
            .send()
            .await
            .with_context(|| format!("failed to reload {}", self.base_url))?;
        Ok(response.status())
    }

    async fn run(self, request: TransferRequest, sink: TransferSink) {
        let TransferSink { events, mut cancel } = sink;
        let outcome = tokio::select! {
            outcome = self.submit(request, events.clone()) => outcome,
            _ = cancel.requested() => Err(TransferError::Aborted),
        };

        match &outcome {
            Ok(receipt) => info!(
                status = receipt.status,
                bytes_sent = receipt.bytes_sent,
                "upload: server accepted transfer"
            ),
            Err(TransferError::Aborted) => info!("upload: transfer cancelled"),
            Err(TransferError::Failed { message }) => {
                warn!(error = %message, "upload: transfer failed")
            }
        }
        events.finish(outcome);
    }

    async fn submit(&self, request: TransferRequest, events: EventSender) -> TransferOutcome {
        let url = self
            .submit_url()
            .map_err(|e| TransferError::failed(format!("invalid submit url: {e}")))?;
        let bytes_sent = request.file.len();
        let form = self
            .build_form(request, events)
            .map_err(|e| TransferError::failed(format!("failed to build upload form: {e}")))?;

        let response = self
            .http
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TransferError::failed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::failed(format!(
                "server responded with {status}"
            )));
        }

        Ok(TransferReceipt {
            status: status.as_u16(),
            bytes_sent,
        })
    }

    fn build_form(&self, request: TransferRequest, events: EventSender) -> reqwest::Result<Form> {
        let TransferRequest {
            file,
            create_short_id,
        } = request;
        let total = file.len();
        let mime = mime_guess::from_path(&file.file_name).first_or_octet_stream();

        let body = progress_body(file.contents, self.chunk_size, events);
        let part = Part::stream_with_length(body, total)
            .file_name(file.file_name)
            .mime_str(mime.essence_str())?;

        Ok(Form::new()
            .part(FILE_FIELD, part)
            .text(CREATE_SHORT_ID_FIELD, create_short_id.to_string()))
    }
}

impl UploadTransport for HttpTransport {
    /// Spawns the transfer onto the current tokio runtime.
    fn start(&self, request: TransferRequest) -> TransferHandle {
        let (handle, sink) = TransferHandle::channel();
        let transport = self.clone();
        tokio::spawn(transport.run(request, sink));
        handle
    }
}

fn progress_body(contents: Vec<u8>, chunk_size: usize, events: EventSender) -> Body {
    Body::wrap_stream(progress_chunks(Bytes::from(contents), chunk_size, events))
}

/// Slices `contents` without copying, reporting each slice as it is pulled.
fn progress_chunks(
    contents: Bytes,
    chunk_size: usize,
    events: EventSender,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let total = contents.len() as u64;
    let chunk_size = chunk_size.max(1);
    let mut loaded = 0usize;
    stream::iter(iter::from_fn(move || {
        if loaded >= contents.len() {
            return None;
        }
        let end = (loaded + chunk_size).min(contents.len());
        let chunk = contents.slice(loaded..end);
        loaded = end;
        events.progress(ProgressSnapshot::new(loaded as u64, total));
        Some(Ok(chunk))
    }))
}

fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
