use cascade_core::{ProviderId, ProviderTag};
use cascade_multipart::{FilePart, MultipartEncoder};
use cascade_provider::{
    AttemptContext, HttpSettings, ProviderError, RequestBody, SourceFile, UploadProvider,
    UploadedFile, read_success_body, send_streaming,
};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use secrecy::ExposeSecret;
use tracing::{debug, info, instrument};

use crate::config::PostImagesConfig;
use crate::error::PostImagesError;
use crate::types::extract_url;

/// Postimages provider: multipart `key` and `image` fields.
pub struct PostImagesProvider {
    config: PostImagesConfig,
    client: Client,
}

impl PostImagesProvider {
    pub fn new(config: PostImagesConfig) -> Self {
        Self::with_client(config, HttpSettings::default().build_client())
    }

    pub fn with_client(config: PostImagesConfig, client: Client) -> Self {
        Self { config, client }
    }
}

impl UploadProvider for PostImagesProvider {
    fn id(&self) -> ProviderId {
        ProviderId::PostImages
    }

    #[instrument(skip_all, fields(provider = "postimages", file = %file.file_name))]
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        let encoder = MultipartEncoder::with_random_boundary()
            .text("key", self.config.api_key.expose_secret().as_str())
            .file(FilePart::new("image", &file.path, &file.file_name));

        let request = self
            .client
            .post(self.config.upload_url())
            .header(CONTENT_TYPE, encoder.content_type());

        debug!(size = file.size, "uploading to Postimages");
        let response = send_streaming(request, RequestBody::Multipart(encoder), file.size, ctx).await?;
        let body = read_success_body(response).await?;
        let url = extract_url(&body).ok_or(PostImagesError::MissingUrl(body))?;

        info!(%url, "Postimages upload succeeded");
        Ok(UploadedFile {
            tag: ProviderTag::PostImages { url: url.clone() },
            url,
        })
    }
}
