//! ImgHippo provider for the Cascade upload gateway.
//!
//! The last image fallback. Implements
//! [`UploadProvider`](cascade_provider::UploadProvider) for
//! [ImgHippo](https://www.imghippo.com/); uploads cannot be deleted.

pub mod config;
pub mod error;
pub mod provider;
pub mod types;

pub use config::ImgHippoConfig;
pub use error::ImgHippoError;
pub use provider::ImgHippoProvider;
pub use types::ImgHippoResponse;
