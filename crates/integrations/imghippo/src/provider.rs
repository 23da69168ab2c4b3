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

use crate::config::ImgHippoConfig;
use crate::error::ImgHippoError;
use crate::types::ImgHippoResponse;

/// ImgHippo provider: multipart `api_key` and `image` fields.
pub struct ImgHippoProvider {
    config: ImgHippoConfig,
    client: Client,
}

impl ImgHippoProvider {
    pub fn new(config: ImgHippoConfig) -> Self {
        Self::with_client(config, HttpSettings::default().build_client())
    }

    pub fn with_client(config: ImgHippoConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn parse_response(body: String) -> Result<String, ImgHippoError> {
        let response: ImgHippoResponse = serde_json::from_str(&body)?;
        match response.url() {
            Some(url) => Ok(url.to_owned()),
            None => Err(ImgHippoError::MissingUrl(body)),
        }
    }
}

impl UploadProvider for ImgHippoProvider {
    fn id(&self) -> ProviderId {
        ProviderId::ImgHippo
    }

    #[instrument(skip_all, fields(provider = "imghippo", file = %file.file_name))]
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        let encoder = MultipartEncoder::with_random_boundary()
            .text("api_key", self.config.api_key.expose_secret().as_str())
            .file(FilePart::new("image", &file.path, &file.file_name));

        let request = self
            .client
            .post(self.config.upload_url())
            .header(CONTENT_TYPE, encoder.content_type());

        debug!(size = file.size, "uploading to ImgHippo");
        let response = send_streaming(request, RequestBody::Multipart(encoder), file.size, ctx).await?;
        let body = read_success_body(response).await?;
        let url = Self::parse_response(body)?;

        info!(%url, "ImgHippo upload succeeded");
        Ok(UploadedFile {
            tag: ProviderTag::ImgHippo { url: url.clone() },
            url,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cascade_provider::testing::MockHttpServer;

    use super::*;

    fn temp_image() -> (tempfile::NamedTempFile, SourceFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"GIF89a").unwrap();
        let source = SourceFile::new(file.path(), "anim.gif", 6);
        (file, source)
    }

    #[tokio::test]
    async fn upload_success() {
        let (_guard, source) = temp_image();
        let server = MockHttpServer::start().await;
        let provider =
            ImgHippoProvider::new(ImgHippoConfig::new("hk").with_base_url(server.base_url()));

        let server_handle = tokio::spawn(async move {
            server
                .respond_json(
                    200,
                    &serde_json::json!({
                        "success": true,
                        "data": { "url": "https://i.imghippo.com/files/a.gif" }
                    }),
                )
                .await
        });

        let uploaded = provider
            .upload(&source, &AttemptContext::detached())
            .await
            .unwrap();
        let recorded = server_handle.await.unwrap();

        assert_eq!(
            uploaded.tag.to_string(),
            "imghippo|https://i.imghippo.com/files/a.gif"
        );
        assert_eq!(recorded.path, "/api/1/upload");
        let body = recorded.body_text();
        assert!(body.contains(r#"name="api_key""#));
        assert!(body.contains("Content-Type: image/gif"));
    }

    #[tokio::test]
    async fn upload_non_json_body_is_parse_error() {
        let (_guard, source) = temp_image();
        let server = MockHttpServer::start().await;
        let provider =
            ImgHippoProvider::new(ImgHippoConfig::new("hk").with_base_url(server.base_url()));

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, "<html>busy</html>").await });

        let err = provider
            .upload(&source, &AttemptContext::detached())
            .await
            .unwrap_err();
        server_handle.await.unwrap();
        assert!(matches!(err, ProviderError::ResponseParse(_)));
    }

    #[tokio::test]
    async fn upload_server_error() {
        let (_guard, source) = temp_image();
        let server = MockHttpServer::start().await;
        let provider =
            ImgHippoProvider::new(ImgHippoConfig::new("hk").with_base_url(server.base_url()));

        let server_handle =
            tokio::spawn(async move { server.respond_once(500, "boom").await });

        let err = provider
            .upload(&source, &AttemptContext::detached())
            .await
            .unwrap_err();
        server_handle.await.unwrap();
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
