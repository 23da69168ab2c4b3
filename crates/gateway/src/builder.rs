use std::sync::Arc;

use cascade_cloudinary::CloudinaryProvider;
use cascade_imgbb::ImgBbProvider;
use cascade_imghippo::ImgHippoProvider;
use cascade_postimages::PostImagesProvider;
use cascade_provider::DynUploadProvider;
use cascade_r2::R2Provider;
use tracing::{debug, info};

use crate::cancellation::CancellationRegistry;
use crate::config::UploaderConfig;
use crate::error::UploadError;
use crate::registry::ProviderRegistry;
use crate::uploader::Uploader;

/// Fluent builder for constructing an [`Uploader`].
///
/// Providers come either from an [`UploaderConfig`] or are registered
/// directly, which is how tests plug in mock providers. At least one
/// provider is required.
pub struct UploaderBuilder {
    providers: ProviderRegistry,
    cancellations: Option<Arc<CancellationRegistry>>,
}

impl UploaderBuilder {
    /// Create a builder with no providers.
    pub fn new() -> Self {
        Self {
            providers: ProviderRegistry::new(),
            cancellations: None,
        }
    }

    /// Register a provider. It takes part in the chains that list its id.
    #[must_use]
    pub fn provider(mut self, provider: Arc<dyn DynUploadProvider>) -> Self {
        self.providers.register(provider);
        self
    }

    /// Share a cancellation registry with other uploaders.
    #[must_use]
    pub fn cancellations(mut self, registry: Arc<CancellationRegistry>) -> Self {
        self.cancellations = Some(registry);
        self
    }

    /// Register every provider `config` has a section for.
    ///
    /// All providers share one HTTP client built from `config.http`. Signed
    /// storage is registered only when both of its keys are set.
    pub fn config(mut self, config: UploaderConfig) -> Result<Self, UploadError> {
        let client = config.http.build_client();

        if let Some(imgbb) = config.imgbb {
            self.providers
                .register(Arc::new(ImgBbProvider::with_client(imgbb, client.clone())));
        }
        if let Some(postimages) = config.postimages {
            self.providers.register(Arc::new(PostImagesProvider::with_client(
                postimages,
                client.clone(),
            )));
        }
        if let Some(imghippo) = config.imghippo {
            self.providers.register(Arc::new(ImgHippoProvider::with_client(
                imghippo,
                client.clone(),
            )));
        }
        if let Some(cloudinary) = config.cloudinary {
            self.providers.register(Arc::new(CloudinaryProvider::with_client(
                cloudinary,
                client.clone(),
            )));
        }
        match config.signed_storage {
            Some(storage) if storage.is_enabled() => {
                storage
                    .host()
                    .map_err(|e| UploadError::Config(e.to_string()))?;
                self.providers
                    .register(Arc::new(R2Provider::with_client(storage, client)));
            }
            Some(_) => debug!("signed storage has no credentials, leaving it out"),
            None => {}
        }

        Ok(self)
    }

    /// Consume the builder and produce an [`Uploader`].
    pub fn build(self) -> Result<Uploader, UploadError> {
        if self.providers.is_empty() {
            return Err(UploadError::Config("no providers configured".into()));
        }
        info!(providers = ?self.providers.list(), "uploader ready");
        Ok(Uploader::from_parts(
            Arc::new(self.providers),
            self.cancellations.unwrap_or_default(),
        ))
    }
}

impl Default for UploaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}
