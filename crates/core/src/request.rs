use std::path::{Path, PathBuf};

use crate::FileCategory;

/// A request to upload one local file.
///
/// Created when the caller wants to send a file and discarded once the
/// gateway has produced its single [`UploadOutcome`](crate::UploadOutcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Path of the local file to upload.
    pub local_path: PathBuf,
    /// Name used for remote naming and MIME inference.
    pub file_name: String,
}

impl UploadRequest {
    /// Create a request for `local_path`, sent as `file_name`.
    pub fn new(local_path: impl Into<PathBuf>, file_name: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            file_name: file_name.into(),
        }
    }

    /// Create a request whose remote name is the file name of `local_path`.
    pub fn from_path(local_path: impl Into<PathBuf>) -> Self {
        let local_path = local_path.into();
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            local_path,
            file_name,
        }
    }

    /// Category derived from [`file_name`](Self::file_name).
    pub fn category(&self) -> FileCategory {
        FileCategory::from_file_name(&self.file_name)
    }

    /// Path of the local file.
    pub fn path(&self) -> &Path {
        &self.local_path
    }
}
