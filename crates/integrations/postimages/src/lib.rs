//! Postimages provider for the Cascade upload gateway.
//!
//! Implements [`UploadProvider`](cascade_provider::UploadProvider) for
//! [postimages.org](https://postimages.org/). The upload response format is
//! not stable, so the image URL is looked up in several places (see
//! [`extract_url`]). Postimages has no delete API.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::PostImagesConfig;
pub use error::PostImagesError;
pub use provider::PostImagesProvider;
pub use types::{PostImagesResponse, extract_url};
