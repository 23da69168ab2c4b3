use secrecy::SecretString;
use serde::Deserialize;

/// Default ImgBB API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.imgbb.com";

/// Configuration for the ImgBB provider.
#[derive(Clone, Deserialize)]
pub struct ImgBbConfig {
    /// ImgBB API key, sent as the `key` query parameter.
    pub api_key: SecretString,

    /// API base URL. Override for testing or a proxy.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl std::fmt::Debug for ImgBbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImgBbConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ImgBbConfig {
    /// Create a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            base_url: default_base_url(),
        }
    }

    /// Set a custom API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The upload endpoint.
    pub fn upload_url(&self) -> String {
        format!("{}/1/upload", self.base_url.trim_end_matches('/'))
    }
}
