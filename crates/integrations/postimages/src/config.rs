use secrecy::SecretString;
use serde::Deserialize;

/// Default Postimages API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.postimage.org";

/// Configuration for the Postimages provider.
#[derive(Clone, Deserialize)]
pub struct PostImagesConfig {
    /// API key, sent as the `key` form field.
    pub api_key: SecretString,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl std::fmt::Debug for PostImagesConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostImagesConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PostImagesConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
        }
    }

    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn upload_url(&self) -> String {
        format!("{}/1/upload", self.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_url() {
        assert_eq!(
            PostImagesConfig::new("k").upload_url(),
            "https://api.postimage.org/1/upload"
        );
    }

    #[test]
    fn debug_redacts_api_key() {
        let debug = format!("{:?}", PostImagesConfig::new("test-placeholder"));
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("test-placeholder"));
    }
}
