use cascade_core::{ProviderId, ProviderTag};
use cascade_crypto::sign_params;
use cascade_multipart::{FilePart, MultipartEncoder, OCTET_STREAM};
use cascade_provider::{
    AttemptContext, HttpSettings, ProviderError, RequestBody, SourceFile, UploadProvider,
    UploadedFile, read_success_body, send_streaming,
};
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, instrument, warn};

use crate::config::CloudinaryConfig;
use crate::error::CloudinaryError;
use crate::types::{DestroyResponse, UploadResponse};

/// Cloudinary provider for non-image files.
///
/// Uploads are multipart with `api_key`, `timestamp`, `signature` and the
/// `file` part, always announced as `application/octet-stream` so Cloudinary
/// detects the type itself.
pub struct CloudinaryProvider {
    config: CloudinaryConfig,
    client: Client,
}

impl CloudinaryProvider {
    /// Create a new Cloudinary provider with the default transport timeouts.
    pub fn new(config: CloudinaryConfig) -> Self {
        Self::with_client(config, HttpSettings::default().build_client())
    }

    /// Create a new Cloudinary provider with a custom HTTP client.
    pub fn with_client(config: CloudinaryConfig, client: Client) -> Self {
        Self { config, client }
    }

    fn timestamp() -> String {
        chrono::Utc::now().timestamp().to_string()
    }

    fn parse_upload(body: &str) -> Result<UploadedFile, CloudinaryError> {
        let response: UploadResponse = serde_json::from_str(body)?;
        let non_empty = |value: Option<String>, field| {
            value
                .filter(|v| !v.is_empty())
                .ok_or(CloudinaryError::MissingField(field))
        };
        let url = non_empty(response.secure_url, "secure_url")?;
        let public_id = non_empty(response.public_id, "public_id")?;
        let resource_type = non_empty(response.resource_type, "resource_type")?;
        Ok(UploadedFile {
            url,
            tag: ProviderTag::Cloudinary {
                public_id,
                resource_type,
            },
        })
    }
}

impl UploadProvider for CloudinaryProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Cloudinary
    }

    #[instrument(skip_all, fields(provider = "cloudinary", file = %file.file_name))]
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        let timestamp = Self::timestamp();
        let signature = sign_params(&[("timestamp", timestamp.as_str())], &self.config.api_secret);

        let encoder = MultipartEncoder::with_random_boundary()
            .text("api_key", self.config.api_key.as_str())
            .text("timestamp", timestamp)
            .text("signature", signature)
            .file(
                FilePart::new("file", &file.path, &file.file_name).with_content_type(OCTET_STREAM),
            );

        let request = self
            .client
            .post(self.config.upload_url())
            .header(CONTENT_TYPE, encoder.content_type());

        debug!(size = file.size, "uploading to Cloudinary");
        let response = send_streaming(request, RequestBody::Multipart(encoder), file.size, ctx).await?;
        let body = read_success_body(response).await?;
        let uploaded = Self::parse_upload(&body)?;

        info!(url = %uploaded.url, tag = %uploaded.tag, "Cloudinary upload succeeded");
        Ok(uploaded)
    }

    fn supports_delete(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(provider = "cloudinary"))]
    async fn delete(&self, tag: &ProviderTag) -> Result<(), ProviderError> {
        let ProviderTag::Cloudinary {
            public_id,
            resource_type,
        } = tag
        else {
            return Err(ProviderError::Configuration(format!(
                "not a Cloudinary tag: {tag}"
            )));
        };

        let timestamp = Self::timestamp();
        let signature = sign_params(
            &[("public_id", public_id.as_str()), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );
        let form = [
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("api_key", self.config.api_key.as_str()),
            ("signature", signature.as_str()),
        ];

        debug!(%public_id, %resource_type, "deleting from Cloudinary");
        let response = self
            .client
            .post(self.config.destroy_url(resource_type))
            .form(&form)
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&e))?;
        let body = read_success_body(response).await?;

        let destroyed: DestroyResponse =
            serde_json::from_str(&body).map_err(CloudinaryError::from)?;
        if !destroyed.is_deleted() {
            warn!(result = %destroyed.result, "Cloudinary refused delete");
            return Err(CloudinaryError::DeleteRejected(body).into());
        }

        info!(%public_id, result = %destroyed.result, "Cloudinary delete succeeded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use cascade_crypto::SecretString;
    use cascade_provider::testing::MockHttpServer;

    use super::*;

    fn provider(base_url: &str) -> CloudinaryProvider {
        CloudinaryProvider::new(CloudinaryConfig::new("demo", "key-1", "secret").with_base_url(base_url))
    }

    fn temp_clip() -> (tempfile::NamedTempFile, SourceFile) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\x00\x00\x00\x18ftypmp42").unwrap();
        let source = SourceFile::new(file.path(), "clip.mp4", 12);
        (file, source)
    }

    fn form_field<'a>(body: &'a str, name: &str) -> &'a str {
        let marker = format!("name=\"{name}\"\r\n\r\n");
        let start = body.find(&marker).unwrap() + marker.len();
        let end = start + body[start..].find("\r\n").unwrap();
        &body[start..end]
    }

    #[test]
    fn provider_supports_delete() {
        let provider = provider("http://localhost:1");
        assert_eq!(UploadProvider::id(&provider), ProviderId::Cloudinary);
        assert!(UploadProvider::supports_delete(&provider));
    }

    #[tokio::test]
    async fn upload_signs_timestamp() {
        let (_guard, source) = temp_clip();
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle = tokio::spawn(async move {
            server
                .respond_json(
                    200,
                    &serde_json::json!({
                        "secure_url": "https://res.cloudinary.com/demo/video/upload/v1/abc.mp4",
                        "public_id": "abc",
                        "resource_type": "video"
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
            uploaded.url,
            "https://res.cloudinary.com/demo/video/upload/v1/abc.mp4"
        );
        assert_eq!(uploaded.tag.to_string(), "cloudinary|abc|video");
        assert_eq!(recorded.path, "/v1_1/demo/auto/upload");

        let body = recorded.body_text();
        assert_eq!(form_field(&body, "api_key"), "key-1");
        let timestamp = form_field(&body, "timestamp");
        let expected = sign_params(
            &[("timestamp", timestamp)],
            &SecretString::new("secret".to_owned()),
        );
        assert_eq!(form_field(&body, "signature"), expected);
        assert!(body.contains(r#"name="file"; filename="clip.mp4""#));
        assert!(body.contains("Content-Type: application/octet-stream"));
    }

    #[tokio::test]
    async fn upload_server_error_keeps_status() {
        let (_guard, source) = temp_clip();
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle = tokio::spawn(async move {
            server
                .respond_once(500, r#"{"error":{"message":"General Error"}}"#)
                .await
        });

        let err = provider
            .upload(&source, &AttemptContext::detached())
            .await
            .unwrap_err();
        server_handle.await.unwrap();

        assert!(err.to_string().contains("500"));
        assert!(err.triggers_fallback());
    }

    #[tokio::test]
    async fn upload_missing_public_id() {
        let (_guard, source) = temp_clip();
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle = tokio::spawn(async move {
            server
                .respond_once(200, r#"{"secure_url":"https://x","resource_type":"raw"}"#)
                .await
        });

        let err = provider
            .upload(&source, &AttemptContext::detached())
            .await
            .unwrap_err();
        server_handle.await.unwrap();
        assert!(matches!(err, ProviderError::ResponseParse(msg) if msg.contains("public_id")));
    }

    #[tokio::test]
    async fn delete_posts_signed_form() {
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, r#"{"result":"ok"}"#).await });

        let tag = ProviderTag::Cloudinary {
            public_id: "docs/report".into(),
            resource_type: "raw".into(),
        };
        UploadProvider::delete(&provider, &tag).await.unwrap();
        let recorded = server_handle.await.unwrap();

        assert_eq!(recorded.method, "POST");
        assert_eq!(recorded.path, "/v1_1/demo/raw/destroy");
        assert_eq!(
            recorded.header("content-type"),
            Some("application/x-www-form-urlencoded")
        );
        let body = recorded.body_text();
        assert!(body.starts_with("public_id=docs%2Freport&timestamp="));
        assert!(body.contains("&api_key=key-1&signature="));
    }

    #[tokio::test]
    async fn delete_not_found_is_success() {
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle = tokio::spawn(async move {
            server.respond_once(200, r#"{"result":"not found"}"#).await
        });

        let tag = ProviderTag::Cloudinary {
            public_id: "gone".into(),
            resource_type: "image".into(),
        };
        UploadProvider::delete(&provider, &tag).await.unwrap();
        server_handle.await.unwrap();
    }

    #[tokio::test]
    async fn delete_rejected() {
        let server = MockHttpServer::start().await;
        let provider = provider(server.base_url());

        let server_handle =
            tokio::spawn(async move { server.respond_once(200, r#"{"result":"error"}"#).await });

        let tag = ProviderTag::Cloudinary {
            public_id: "x".into(),
            resource_type: "raw".into(),
        };
        let err = UploadProvider::delete(&provider, &tag).await.unwrap_err();
        server_handle.await.unwrap();
        assert!(err.to_string().contains("Cloudinary delete failed"));
    }

    #[tokio::test]
    async fn delete_wrong_tag() {
        let provider = provider("http://localhost:1");
        let tag = ProviderTag::R2 {
            object_key: "uploads/1_a".into(),
        };
        let err = UploadProvider::delete(&provider, &tag).await.unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(_)));
    }
}
