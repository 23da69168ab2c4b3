use reqwest::Url;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::error::R2Error;

/// Default prefix for object keys.
pub const DEFAULT_KEY_PREFIX: &str = "uploads/";

/// Default signing region. R2 accepts `auto` for every bucket.
pub const DEFAULT_REGION: &str = "auto";

/// Configuration for S3-compatible signed storage.
#[derive(Clone, Deserialize)]
pub struct R2Config {
    /// Account endpoint, e.g. `https://<account>.r2.cloudflarestorage.com`.
    pub endpoint: String,

    /// Bucket name; the first path segment of every object URL.
    pub bucket: String,

    /// Access key id.
    #[serde(default)]
    pub access_key: String,

    /// Secret access key.
    #[serde(default = "empty_secret")]
    pub secret_key: SecretString,

    /// Prefix prepended to every object key.
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,

    /// SigV4 region.
    #[serde(default = "default_region")]
    pub region: String,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

fn default_key_prefix() -> String {
    DEFAULT_KEY_PREFIX.to_owned()
}

fn default_region() -> String {
    DEFAULT_REGION.to_owned()
}

impl std::fmt::Debug for R2Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("R2Config")
            .field("endpoint", &self.endpoint)
            .field("bucket", &self.bucket)
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .field("key_prefix", &self.key_prefix)
            .field("region", &self.region)
            .finish()
    }
}

impl R2Config {
    /// Create a configuration in the default region.
    pub fn new(
        endpoint: impl Into<String>,
        bucket: impl Into<String>,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            bucket: bucket.into(),
            access_key: access_key.into(),
            secret_key: SecretString::new(secret_key.into()),
            key_prefix: key_prefix.into(),
            region: default_region(),
        }
    }

    /// Set the signing region.
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = region.into();
        self
    }

    /// Replace the access key pair, e.g. with values from the environment.
    #[must_use]
    pub fn with_credentials(
        mut self,
        access_key: impl Into<String>,
        secret_key: impl Into<String>,
    ) -> Self {
        self.access_key = access_key.into();
        self.secret_key = SecretString::new(secret_key.into());
        self
    }

    /// Signed storage takes part in uploads only with both keys set.
    pub fn is_enabled(&self) -> bool {
        !self.access_key.is_empty() && !self.secret_key.expose_secret().is_empty()
    }

    /// Value of the `Host` header: the endpoint host plus any non-default
    /// port.
    pub fn host(&self) -> Result<String, R2Error> {
        let url = Url::parse(&self.endpoint)
            .map_err(|e| R2Error::InvalidEndpoint(format!("{}: {e}", self.endpoint)))?;
        let host = url
            .host_str()
            .ok_or_else(|| R2Error::InvalidEndpoint(self.endpoint.clone()))?;
        Ok(match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        })
    }

    /// Unencoded `/<bucket>/<key>` path of an object.
    pub fn object_path(&self, key: &str) -> String {
        format!("/{}/{key}", self.bucket)
    }
}
