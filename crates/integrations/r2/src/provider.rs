use cascade_core::{ProviderId, ProviderTag};
use cascade_crypto::{SigV4Signer, SignedRequest, SigningCredentials, uri_encode_path};
use cascade_multipart::OCTET_STREAM;
use cascade_provider::{
    AttemptContext, HttpSettings, ProviderError, RequestBody, SourceFile, UploadProvider,
    UploadedFile, read_success_body, send_streaming,
};
use chrono::Utc;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use tracing::{debug, info, instrument, warn};

use crate::config::R2Config;
use crate::error::R2Error;
use crate::key::object_key;

/// S3 service name used in the credential scope.
const SERVICE: &str = "s3";

/// Signed-storage provider.
pub struct R2Provider {
    config: R2Config,
    signer: SigV4Signer,
    client: Client,
}

impl R2Provider {
    /// Create a new signed-storage provider with the default transport
    /// timeouts.
    pub fn new(config: R2Config) -> Self {
        Self::with_client(config, HttpSettings::default().build_client())
    }

    /// Create a new signed-storage provider with a custom HTTP client.
    pub fn with_client(config: R2Config, client: Client) -> Self {
        let credentials = SigningCredentials {
            access_key: config.access_key.clone(),
            secret_key: config.secret_key.clone(),
        };
        let signer = SigV4Signer::new(credentials, config.region.clone(), SERVICE);
        Self {
            config,
            signer,
            client,
        }
    }

    /// The provider's configuration.
    pub fn config(&self) -> &R2Config {
        &self.config
    }

    /// Build a signed request for `key`. Returns the request and the public
    /// URL of the object.
    fn signed_request(&self, method: Method, key: &str) -> Result<(RequestBuilder, String), R2Error> {
        if !self.config.is_enabled() {
            return Err(R2Error::NotConfigured);
        }
        let host = self.config.host()?;
        let path = uri_encode_path(&self.config.object_path(key));
        let url = format!("{}{path}", self.config.endpoint.trim_end_matches('/'));

        let SignedRequest {
            authorization,
            amz_date,
            content_sha256,
        } = self
            .signer
            .sign(method.as_str(), &path, &host, OCTET_STREAM, Utc::now());

        let request = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, OCTET_STREAM)
            .header("x-amz-content-sha256", content_sha256)
            .header("x-amz-date", amz_date)
            .header(AUTHORIZATION, authorization);
        Ok((request, url))
    }
}

impl UploadProvider for R2Provider {
    fn id(&self) -> ProviderId {
        ProviderId::R2
    }

    #[instrument(skip_all, fields(provider = "r2", file = %file.file_name))]
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        let key = object_key(
            &self.config.key_prefix,
            Utc::now().timestamp_millis(),
            &file.file_name,
        );
        let (request, url) = self.signed_request(Method::PUT, &key)?;

        debug!(%key, size = file.size, "uploading to signed storage");
        let response = send_streaming(
            request,
            RequestBody::RawFile(file.path.clone()),
            file.size,
            ctx,
        )
        .await?;
        read_success_body(response).await?;

        info!(%url, "signed storage upload succeeded");
        Ok(UploadedFile {
            url,
            tag: ProviderTag::R2 { object_key: key },
        })
    }

    fn supports_delete(&self) -> bool {
        true
    }

    #[instrument(skip_all, fields(provider = "r2"))]
    async fn delete(&self, tag: &ProviderTag) -> Result<(), ProviderError> {
        let ProviderTag::R2 { object_key } = tag else {
            return Err(ProviderError::Configuration(format!(
                "not a signed storage tag: {tag}"
            )));
        };
        if !self.config.is_enabled() {
            warn!(%object_key, "signed storage not configured, skipping delete");
            return Ok(());
        }

        let (request, _) = self.signed_request(Method::DELETE, object_key)?;
        debug!(%object_key, "deleting from signed storage");
        let response = request
            .send()
            .await
            .map_err(|e| ProviderError::from_reqwest(&e))?;

        if response.status() == StatusCode::NOT_FOUND {
            info!(%object_key, "object already gone");
            return Ok(());
        }
        read_success_body(response).await?;

        info!(%object_key, "signed storage delete succeeded");
        Ok(())
    }
}
