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

use crate::config::ImgBbConfig;
use crate::error::ImgBbError;
use crate::types::ImgBbResponse;

/// ImgBB provider that uploads images as a multipart `image` field.
pub struct ImgBbProvider {
    config: ImgBbConfig,
    client: Client,
}

impl ImgBbProvider {
    /// Create a new ImgBB provider with the default transport timeouts.
    pub fn new(config: ImgBbConfig) -> Self {
        Self::with_client(config, HttpSettings::default().build_client())
    }

    /// Create a new ImgBB provider with a custom HTTP client.
    pub fn with_client(config: ImgBbConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn parse_response(body: &str) -> Result<String, ImgBbError> {
        let response: ImgBbResponse = serde_json::from_str(body)?;
        response.url().map(str::to_owned).ok_or(ImgBbError::MissingUrl)
    }
}

impl UploadProvider for ImgBbProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ImgBb
    }

    #[instrument(skip_all, fields(provider = "imgbb", file = %file.file_name))]
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        let encoder = MultipartEncoder::with_random_boundary().file(FilePart::new(
            "image",
            &file.path,
            &file.file_name,
        ));

        let request = self
            .client
            .post(self.config.upload_url())
            .query(&[
                ("expiration", "0"),
                ("key", self.config.api_key.expose_secret().as_str()),
            ])
            .header(CONTENT_TYPE, encoder.content_type());

        debug!(size = file.size, "uploading to ImgBB");
        let response = send_streaming(request, RequestBody::Multipart(encoder), file.size, ctx).await?;
        let body = read_success_body(response).await?;
        let url = Self::parse_response(&body)?;

        info!(%url, "ImgBB upload succeeded");
        Ok(UploadedFile {
            tag: ProviderTag::ImgBb { url: url.clone() },
            url,
        })
    }
}
