//! Signed-storage provider for the Cascade upload gateway.
//!
//! Uploads files to an S3-compatible bucket (Cloudflare R2) with a raw
//! `PUT`, authenticated with AWS Signature Version 4 over an
//! `UNSIGNED-PAYLOAD` so the body can be streamed from disk. This is the
//! last fallback for non-image files and is only used when credentials are
//! configured (see [`R2Config::is_enabled`]).
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cascade_r2::{R2Config, R2Provider};
//!
//! let config = R2Config::new(
//!     "https://account.r2.cloudflarestorage.com",
//!     "media",
//!     "access-key",
//!     "secret-key",
//!     "uploads/",
//! );
//! let provider = R2Provider::new(config);
//! ```

pub mod config;
pub mod error;
pub mod key;
pub mod provider;

pub use config::R2Config;
pub use error::R2Error;
pub use key::{object_key, safe_key};
pub use provider::R2Provider;
