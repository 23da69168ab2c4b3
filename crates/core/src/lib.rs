//! Core types for the Cascade upload pipeline.
//!
//! Everything here is transport-agnostic: the request a caller hands to the
//! gateway, the category that decides which providers are tried, the
//! self-describing [`ProviderTag`] that records where a file ended up, and the
//! outcomes and events a caller observes.

pub mod category;
pub mod outcome;
pub mod provider_id;
pub mod request;
pub mod tag;

pub use category::{FileCategory, IMAGE_EXTENSIONS, file_extension};
pub use outcome::{DeleteOutcome, UploadEvent, UploadOutcome};
pub use provider_id::ProviderId;
pub use request::UploadRequest;
pub use tag::{ProviderTag, TagParseError};
