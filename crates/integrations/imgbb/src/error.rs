use cascade_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the ImgBB provider.
///
/// Transport and status failures are already [`ProviderError`]s; these cover
/// successful responses that cannot be used.
#[derive(Debug, Error)]
pub enum ImgBbError {
    /// The response body is not the expected JSON.
    #[error("invalid ImgBB response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// The response parsed but carries no `data.url`.
    #[error("ImgBB response has no data.url")]
    MissingUrl,
}

impl From<ImgBbError> for ProviderError {
    fn from(err: ImgBbError) -> Self {
        ProviderError::ResponseParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_maps_to_response_parse() {
        let err: ProviderError = ImgBbError::MissingUrl.into();
        assert!(matches!(err, ProviderError::ResponseParse(_)));
        assert!(err.triggers_fallback());
        assert_eq!(
            err.to_string(),
            "unexpected response: ImgBB response has no data.url"
        );
    }
}
