use secrecy::SecretString;
use serde::Deserialize;

/// Default ImgHippo base URL.
pub const DEFAULT_BASE_URL: &str = "https://www.imghippo.com";

/// Configuration for the ImgHippo provider.
#[derive(Clone, Deserialize)]
pub struct ImgHippoConfig {
    /// API key, sent as the `api_key` form field.
    pub api_key: SecretString,

    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl std::fmt::Debug for ImgHippoConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImgHippoConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl ImgHippoConfig {
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
        format!("{}/api/1/upload", self.base_url.trim_end_matches('/'))
    }
}
