use thiserror::Error;

/// Errors that can occur while setting up an [`Uploader`](crate::Uploader).
///
/// Upload and delete failures are never errors: they are reported as
/// [`UploadOutcome::Failure`](cascade_core::UploadOutcome::Failure) and
/// [`DeleteOutcome::Failure`](cascade_core::DeleteOutcome::Failure).
#[derive(Debug, Error)]
pub enum UploadError {
    /// The configuration is structurally valid but unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration file could not be read.
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid TOML for [`UploaderConfig`](crate::UploaderConfig).
    #[error("invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),
}
