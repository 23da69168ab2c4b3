use cascade_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the Cloudinary provider.
///
/// These are internal errors that get converted into [`ProviderError`] at the
/// public API boundary.
#[derive(Debug, Error)]
pub enum CloudinaryError {
    /// The response body is not the expected JSON.
    #[error("invalid Cloudinary response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// A required field is missing or empty in an upload response.
    #[error("Cloudinary response has no {0}")]
    MissingField(&'static str),

    /// The destroy API answered with a result other than `ok`/`not found`.
    #[error("Cloudinary delete failed: {0}")]
    DeleteRejected(String),
}

impl From<CloudinaryError> for ProviderError {
    fn from(err: CloudinaryError) -> Self {
        ProviderError::ResponseParse(err.to_string())
    }
}
