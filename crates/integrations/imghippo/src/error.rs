use cascade_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the ImgHippo provider.
#[derive(Debug, Error)]
pub enum ImgHippoError {
    /// The response body is not JSON.
    #[error("invalid ImgHippo response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The response has neither `data.url` nor `url`.
    #[error("ImgHippo success but no URL in response: {0}")]
    MissingUrl(String),
}

impl From<ImgHippoError> for ProviderError {
    fn from(err: ImgHippoError) -> Self {
        ProviderError::ResponseParse(err.to_string())
    }
}
