//! Page-side collaborators the upload core reads from and writes to.

use std::{
    io,
    path::{Path, PathBuf},
};

use thiserror::Error;

/// A file picked for upload: its name as reported to the server plus its bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub file_name: String,
    pub contents: Vec<u8>,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("'{path}' has no file name")]
    NoFileName { path: PathBuf },
    #[error("'{path}' is not a regular file")]
    NotAFile { path: PathBuf },
    #[error("'{path}' is {size} bytes, above the {limit} byte limit")]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

impl SelectedFile {
    pub fn new(file_name: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            contents: contents.into(),
        }
    }

    /// Reads `path` from disk, refusing files larger than `max_size` before
    /// loading them.
    pub async fn from_path(path: &Path, max_size: Option<u64>) -> Result<Self, SelectionError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| SelectionError::NoFileName {
                path: path.to_path_buf(),
            })?;

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| SelectionError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        if !metadata.is_file() {
            return Err(SelectionError::NotAFile {
                path: path.to_path_buf(),
            });
        }
        if let Some(limit) = max_size {
            if metadata.len() > limit {
                return Err(SelectionError::TooLarge {
                    path: path.to_path_buf(),
                    size: metadata.len(),
                    limit,
                });
            }
        }

        let contents = tokio::fs::read(path)
            .await
            .map_err(|source| SelectionError::Read {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Self {
            file_name,
            contents,
        })
    }

    pub fn len(&self) -> u64 {
        self.contents.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

/// Everything sent for one upload attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferRequest {
    pub file: SelectedFile,
    pub create_short_id: bool,
}

/// The page elements the upload core talks to: the file picker, the short
/// identifier checkbox, the upload button and the progress display.
pub trait UploadView {
    fn selected_file(&mut self) -> Option<SelectedFile>;

    fn create_short_id(&self) -> bool;

    fn set_upload_button_visible(&mut self, visible: bool);

    fn set_progress_text(&mut self, text: &str);

    /// Throws away the current view and fetches fresh server state.
    fn reload(&mut self);
}
