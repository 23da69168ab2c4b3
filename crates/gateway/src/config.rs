use std::path::Path;

use cascade_cloudinary::CloudinaryConfig;
use cascade_imgbb::ImgBbConfig;
use cascade_imghippo::ImgHippoConfig;
use cascade_postimages::PostImagesConfig;
use cascade_provider::HttpSettings;
use cascade_r2::R2Config;
use serde::Deserialize;

use crate::error::UploadError;

/// Signed-storage settings, as the gateway calls them.
pub type SignedStorageConfig = R2Config;

/// Everything an [`Uploader`](crate::Uploader) needs to reach its providers.
///
/// Every provider section is optional. A provider without a section is not
/// registered and is left out of its fallback chain.
///
/// ```toml
/// [http]
/// connect_timeout_secs = 15
/// read_timeout_secs = 30
///
/// [imgbb]
/// api_key = "..."
///
/// [cloudinary]
/// cloud_name = "demo"
/// api_key = "..."
/// api_secret = "..."
///
/// [signed_storage]
/// endpoint = "https://<account>.r2.cloudflarestorage.com"
/// bucket = "media"
/// access_key = "..."
/// secret_key = "..."
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UploaderConfig {
    /// Transport timeouts shared by all providers.
    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub imgbb: Option<ImgBbConfig>,

    #[serde(default)]
    pub postimages: Option<PostImagesConfig>,

    #[serde(default)]
    pub imghippo: Option<ImgHippoConfig>,

    #[serde(default)]
    pub cloudinary: Option<CloudinaryConfig>,

    /// S3-compatible storage, the last resort for non-image files. Only
    /// used when both keys are set.
    #[serde(default)]
    pub signed_storage: Option<SignedStorageConfig>,
}

impl UploaderConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, UploadError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, UploadError> {
        let input = std::fs::read_to_string(path)?;
        Self::from_toml_str(&input)
    }

    #[must_use]
    pub fn with_http(mut self, http: HttpSettings) -> Self {
        self.http = http;
        self
    }

    #[must_use]
    pub fn with_imgbb(mut self, config: ImgBbConfig) -> Self {
        self.imgbb = Some(config);
        self
    }

    #[must_use]
    pub fn with_postimages(mut self, config: PostImagesConfig) -> Self {
        self.postimages = Some(config);
        self
    }

    #[must_use]
    pub fn with_imghippo(mut self, config: ImgHippoConfig) -> Self {
        self.imghippo = Some(config);
        self
    }

    #[must_use]
    pub fn with_cloudinary(mut self, config: CloudinaryConfig) -> Self {
        self.cloudinary = Some(config);
        self
    }

    /// Configure signed storage. It joins the non-image chain only when
    /// [`SignedStorageConfig::is_enabled`] holds.
    #[must_use]
    pub fn with_signed_storage(mut self, config: SignedStorageConfig) -> Self {
        self.signed_storage = Some(config);
        self
    }

    /// Whether signed storage will take part in uploads.
    pub fn signed_storage_enabled(&self) -> bool {
        self.signed_storage
            .as_ref()
            .is_some_and(SignedStorageConfig::is_enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL: &str = r#"
[http]
connect_timeout_secs = 5

[imgbb]
api_key = "bb"

[postimages]
api_key = "pi"

[imghippo]
api_key = "hp"

[cloudinary]
cloud_name = "demo"
api_key = "123"
api_secret = "shh"

[signed_storage]
endpoint = "https://acct.r2.cloudflarestorage.com"
bucket = "media"
access_key = "AK"
secret_key = "SK"
"#;

    #[test]
    fn parse_full_config() {
        let config = UploaderConfig::from_toml_str(FULL).unwrap();
        assert_eq!(config.http.connect_timeout_secs, 5);
        assert_eq!(config.http.read_timeout_secs, 30);
        assert!(config.imgbb.is_some());
        assert!(config.postimages.is_some());
        assert!(config.imghippo.is_some());
        assert_eq!(config.cloudinary.as_ref().unwrap().cloud_name, "demo");
        let storage = config.signed_storage.as_ref().unwrap();
        assert_eq!(storage.key_prefix, "uploads/");
        assert!(config.signed_storage_enabled());
    }

    #[test]
    fn empty_config_has_no_providers() {
        let config = UploaderConfig::from_toml_str("").unwrap();
        assert!(config.imgbb.is_none());
        assert!(config.cloudinary.is_none());
        assert!(!config.signed_storage_enabled());
        assert_eq!(config.http, HttpSettings::default());
    }

    #[test]
    fn signed_storage_without_keys_is_disabled() {
        let config = UploaderConfig::default().with_signed_storage(SignedStorageConfig::new(
            "https://acct.r2.cloudflarestorage.com",
            "media",
            "",
            "",
            "uploads/",
        ));
        assert!(config.signed_storage.is_some());
        assert!(!config.signed_storage_enabled());
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = UploaderConfig::from_toml_str("[imgbb]\napi_key = 5").unwrap_err();
        assert!(matches!(err, UploadError::Toml(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cascade.toml");
        std::fs::write(&path, FULL).unwrap();
        let config = UploaderConfig::load(&path).unwrap();
        assert!(config.imgbb.is_some());

        let missing = UploaderConfig::load(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, UploadError::Io(_)));
    }

    #[test]
    fn debug_never_shows_secrets() {
        let config = UploaderConfig::from_toml_str(FULL).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("shh"));
        assert!(!debug.contains("\"SK\""));
    }
}
