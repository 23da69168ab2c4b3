//! ImgBB provider for the Cascade upload gateway.
//!
//! This crate implements the [`UploadProvider`](cascade_provider::UploadProvider)
//! trait for the [ImgBB](https://api.imgbb.com/) image host. Uploads never
//! expire and ImgBB offers no delete API, so deleting an ImgBB tag is a
//! no-op.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use cascade_imgbb::{ImgBbConfig, ImgBbProvider};
//!
//! let config = ImgBbConfig::new("my-api-key");
//! let provider = ImgBbProvider::new(config);
//! ```

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::ImgBbConfig;
pub use error::ImgBbError;
pub use provider::ImgBbProvider;
pub use types::ImgBbResponse;
