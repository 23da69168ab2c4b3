//! AWS Signature Version 4 for S3-compatible object storage.
//!
//! Only the subset needed for single-object `PUT` and `DELETE` is
//! implemented: an empty query string, a fixed set of signed headers and the
//! `UNSIGNED-PAYLOAD` sentinel in place of a body hash.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use secrecy::{ExposeSecret, SecretString};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Algorithm identifier placed in the string to sign and the header.
pub const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Payload hash sentinel for bodies that are streamed rather than hashed.
pub const UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";

/// Signed header names, lower-cased and sorted.
pub const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

const SCOPE_TERMINATOR: &str = "aws4_request";

/// Characters left as-is in a canonical URI: the RFC 3986 unreserved set plus
/// the path separator.
const URI_PATH: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'/');

/// Access key pair for signed storage.
#[derive(Clone)]
pub struct SigningCredentials {
    /// Public access key id.
    pub access_key: String,
    /// Secret access key.
    pub secret_key: SecretString,
}

impl fmt::Debug for SigningCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningCredentials")
            .field("access_key", &self.access_key)
            .field("secret_key", &"[REDACTED]")
            .finish()
    }
}

impl SigningCredentials {
    /// Create credentials from an access key and a secret.
    pub fn new(access_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            access_key: access_key.into(),
            secret_key: SecretString::new(secret_key.into()),
        }
    }
}

/// The parts of an HTTP request that take part in the signature.
#[derive(Debug, Clone, Copy)]
pub struct SignableRequest<'a> {
    /// HTTP method, upper-case.
    pub method: &'a str,
    /// Canonical (already URI-encoded) path, e.g. `/bucket/key`.
    pub path: &'a str,
    /// Value of the `Host` header, including a non-default port.
    pub host: &'a str,
    /// Value of the `Content-Type` header.
    pub content_type: &'a str,
    /// Request timestamp in `YYYYMMDD'T'HHMMSS'Z'` form.
    pub amz_date: &'a str,
}

impl SignableRequest<'_> {
    /// The `YYYYMMDD` part of the timestamp.
    pub fn date_stamp(&self) -> &str {
        self.amz_date.get(..8).unwrap_or(self.amz_date)
    }
}

/// Header values to attach to a signed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    /// `Authorization` header value.
    pub authorization: String,
    /// `x-amz-date` header value.
    pub amz_date: String,
    /// `x-amz-content-sha256` header value.
    pub content_sha256: &'static str,
}

/// Computes SigV4 `Authorization` headers for one region and service.
#[derive(Debug, Clone)]
pub struct SigV4Signer {
    credentials: SigningCredentials,
    region: String,
    service: String,
}

impl SigV4Signer {
    /// Create a signer for `region` and `service` (e.g. `"auto"`, `"s3"`).
    pub fn new(
        credentials: SigningCredentials,
        region: impl Into<String>,
        service: impl Into<String>,
    ) -> Self {
        Self {
            credentials,
            region: region.into(),
            service: service.into(),
        }
    }

    /// The access key id these credentials sign with.
    pub fn access_key(&self) -> &str {
        &self.credentials.access_key
    }

    /// Step 1: the canonical request.
    pub fn canonical_request(&self, request: &SignableRequest<'_>) -> String {
        format!(
            "{method}\n{path}\n\n\
             content-type:{content_type}\n\
             host:{host}\n\
             x-amz-content-sha256:{UNSIGNED_PAYLOAD}\n\
             x-amz-date:{amz_date}\n\
             \n\
             {SIGNED_HEADERS}\n\
             {UNSIGNED_PAYLOAD}",
            method = request.method,
            path = request.path,
            content_type = request.content_type.trim(),
            host = request.host.trim(),
            amz_date = request.amz_date,
        )
    }

    /// `date/region/service/aws4_request`.
    pub fn credential_scope(&self, date_stamp: &str) -> String {
        format!(
            "{date_stamp}/{}/{}/{SCOPE_TERMINATOR}",
            self.region, self.service
        )
    }

    /// Step 2: the string to sign.
    pub fn string_to_sign(&self, amz_date: &str, date_stamp: &str, canonical_request: &str) -> String {
        let digest = hex::encode(Sha256::digest(canonical_request.as_bytes()));
        format!(
            "{ALGORITHM}\n{amz_date}\n{}\n{digest}",
            self.credential_scope(date_stamp)
        )
    }

    /// Step 3: the signing key, four chained HMACs seeded from the secret.
    pub fn signing_key(&self, date_stamp: &str) -> Vec<u8> {
        let seed = format!("AWS4{}", self.credentials.secret_key.expose_secret());
        let k_date = hmac_sha256(seed.as_bytes(), date_stamp.as_bytes());
        let k_region = hmac_sha256(&k_date, self.region.as_bytes());
        let k_service = hmac_sha256(&k_region, self.service.as_bytes());
        hmac_sha256(&k_service, SCOPE_TERMINATOR.as_bytes())
    }

    /// Step 4: hex signature of the request.
    pub fn signature(&self, request: &SignableRequest<'_>) -> String {
        let date_stamp = request.date_stamp();
        let canonical = self.canonical_request(request);
        let string_to_sign = self.string_to_sign(request.amz_date, date_stamp, &canonical);
        hex::encode(hmac_sha256(
            &self.signing_key(date_stamp),
            string_to_sign.as_bytes(),
        ))
    }

    /// Full `Authorization` header value.
    pub fn authorization(&self, request: &SignableRequest<'_>) -> String {
        format!(
            "{ALGORITHM} Credential={}/{}, SignedHeaders={SIGNED_HEADERS}, Signature={}",
            self.credentials.access_key,
            self.credential_scope(request.date_stamp()),
            self.signature(request)
        )
    }

    /// Sign a request made at `now`, returning every header value the
    /// request has to carry besides `Host` and `Content-Type`.
    pub fn sign(
        &self,
        method: &str,
        path: &str,
        host: &str,
        content_type: &str,
        now: DateTime<Utc>,
    ) -> SignedRequest {
        let amz_date = amz_date(now);
        let request = SignableRequest {
            method,
            path,
            host,
            content_type,
            amz_date: &amz_date,
        };
        let authorization = self.authorization(&request);
        SignedRequest {
            authorization,
            amz_date,
            content_sha256: UNSIGNED_PAYLOAD,
        }
    }
}

/// Format a timestamp the way `x-amz-date` expects.
pub fn amz_date(now: DateTime<Utc>) -> String {
    now.format("%Y%m%dT%H%M%SZ").to_string()
}

/// URI-encode a path for use as a canonical URI, keeping `/` separators.
pub fn uri_encode_path(path: &str) -> String {
    utf8_percent_encode(path, URI_PATH).to_string()
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key size");
    mac.update(data);
    mac.finalize().into_bytes().to_vec()
}
