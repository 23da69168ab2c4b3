use cascade_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the Postimages provider.
#[derive(Debug, Error)]
pub enum PostImagesError {
    /// A 2xx response with no recognisable image URL anywhere in the body.
    #[error("Postimages success but no URL in response: {0}")]
    MissingUrl(String),
}

impl From<PostImagesError> for ProviderError {
    fn from(err: PostImagesError) -> Self {
        ProviderError::ResponseParse(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_url_keeps_body() {
        let err: ProviderError = PostImagesError::MissingUrl("<html>".into()).into();
        assert!(matches!(err, ProviderError::ResponseParse(_)));
        assert!(err.to_string().contains("<html>"));
    }
}
