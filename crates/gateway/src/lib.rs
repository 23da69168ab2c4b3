//! Upload orchestration for Cascade.
//!
//! An [`Uploader`] owns one client per configured provider and sends each
//! file through the fallback chain of its category, stopping at the first
//! provider that accepts it. In-flight uploads can be aborted by path through
//! [`Uploader::cancel_upload`], and the [`ProviderTag`](cascade_core::ProviderTag)
//! of a finished upload is all that is needed to delete it again.

pub mod builder;
pub mod cancellation;
pub mod config;
pub mod deletion;
pub mod error;
pub mod registry;
pub mod uploader;

pub use builder::UploaderBuilder;
pub use cancellation::{CancellationRegistry, Registration};
pub use config::{SignedStorageConfig, UploaderConfig};
pub use deletion::DeletionCoordinator;
pub use error::UploadError;
pub use registry::ProviderRegistry;
pub use uploader::{UploadTask, Uploader};
