use secrecy::SecretString;
use serde::Deserialize;

/// Default Cloudinary API base URL.
pub const DEFAULT_BASE_URL: &str = "https://api.cloudinary.com";

/// Configuration for the Cloudinary provider.
#[derive(Clone, Deserialize)]
pub struct CloudinaryConfig {
    /// Cloud name, part of every endpoint path.
    pub cloud_name: String,

    /// Public API key.
    pub api_key: String,

    /// API secret used to sign requests. Never sent over the wire.
    pub api_secret: SecretString,

    /// API base URL.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_owned()
}

impl std::fmt::Debug for CloudinaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudinaryConfig")
            .field("cloud_name", &self.cloud_name)
            .field("api_key", &self.api_key)
            .field("api_secret", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl CloudinaryConfig {
    /// Create a new configuration for `cloud_name`.
    pub fn new(
        cloud_name: impl Into<String>,
        api_key: impl Into<String>,
        api_secret: impl Into<String>,
    ) -> Self {
        Self {
            cloud_name: cloud_name.into(),
            api_key: api_key.into(),
            api_secret: SecretString::new(api_secret.into()),
            base_url: default_base_url(),
        }
    }

    /// Set a custom API base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn cloud_url(&self) -> String {
        format!(
            "{}/v1_1/{}",
            self.base_url.trim_end_matches('/'),
            self.cloud_name
        )
    }

    /// Upload endpoint; `auto` lets Cloudinary pick the resource type.
    pub fn upload_url(&self) -> String {
        format!("{}/auto/upload", self.cloud_url())
    }

    /// Destroy endpoint for `resource_type` (`image`, `video` or `raw`).
    pub fn destroy_url(&self, resource_type: &str) -> String {
        format!("{}/{resource_type}/destroy", self.cloud_url())
    }
}
