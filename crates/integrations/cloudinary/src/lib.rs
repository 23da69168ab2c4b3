//! Cloudinary provider for the Cascade upload gateway.
//!
//! Non-image files go to Cloudinary's `auto` upload endpoint first. Every
//! request is signed with the SHA-1 parameter signature from
//! [`cascade_crypto::sign_params`]. Unlike the image hosts, Cloudinary
//! uploads can be deleted through the `destroy` API.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cascade_cloudinary::{CloudinaryConfig, CloudinaryProvider};
//!
//! let config = CloudinaryConfig::new("my-cloud", "123456", "api-secret");
//! let provider = CloudinaryProvider::new(config);
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::CloudinaryConfig;
pub use error::CloudinaryError;
pub use provider::CloudinaryProvider;
pub use types::{DestroyResponse, UploadResponse};
