//! Request signing for Cascade's hosting providers.
//!
//! - [`sigv4`]: AWS Signature Version 4 for S3-compatible signed storage,
//!   using the `UNSIGNED-PAYLOAD` sentinel so bodies can be streamed.
//! - [`params`]: the SHA-1 parameter signature used by the hosted media
//!   service's upload and destroy endpoints.
//!
//! Everything here is pure: the same inputs always produce the same output,
//! and nothing can fail at signing time. A bad signature shows up later as an
//! authentication error from the remote service.
//!
//! Secrets are held as [`SecretString`] so they never end up in logs.

pub mod params;
pub mod sigv4;

// Re-export for consumers so they don't need a direct `secrecy` dependency.
pub use secrecy::{ExposeSecret, Secret, SecretString};

pub use params::{sha1_hex, sign_params};
pub use sigv4::{
    ALGORITHM, SignableRequest, SignedRequest, SigningCredentials, SigV4Signer, UNSIGNED_PAYLOAD,
    amz_date, uri_encode_path,
};
