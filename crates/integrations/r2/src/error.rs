use cascade_provider::ProviderError;
use thiserror::Error;

/// Errors specific to the signed-storage provider.
#[derive(Debug, Error)]
pub enum R2Error {
    /// The endpoint is not an absolute URL with a host.
    #[error("invalid signed storage endpoint: {0}")]
    InvalidEndpoint(String),

    /// Access or secret key is empty.
    #[error("signed storage is not configured")]
    NotConfigured,
}

impl From<R2Error> for ProviderError {
    fn from(err: R2Error) -> Self {
        ProviderError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_to_configuration() {
        let err: ProviderError = R2Error::NotConfigured.into();
        assert!(matches!(err, ProviderError::Configuration(_)));
        assert_eq!(
            err.to_string(),
            "invalid configuration: signed storage is not configured"
        );
    }
}
