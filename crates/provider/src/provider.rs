use std::path::PathBuf;

use async_trait::async_trait;
use cascade_core::{ProviderId, ProviderTag};

use crate::context::AttemptContext;
use crate::error::ProviderError;

/// A local file about to be sent to a provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path of the file on disk.
    pub path: PathBuf,
    /// Name used for remote naming and MIME inference.
    pub file_name: String,
    /// Size in bytes, read once before the first attempt.
    pub size: u64,
}

impl SourceFile {
    /// Describe a file that is known to exist.
    pub fn new(path: impl Into<PathBuf>, file_name: impl Into<String>, size: u64) -> Self {
        Self {
            path: path.into(),
            file_name: file_name.into(),
            size,
        }
    }
}

/// A successful upload: where the file lives and how to delete it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// Public URL of the file.
    pub url: String,
    /// Self-describing tag for a later delete.
    pub tag: ProviderTag,
}

/// Strongly-typed upload provider trait with native `async fn`.
///
/// This trait is **not** object-safe because it uses native `async fn` methods
/// (which desugar to opaque `impl Future` return types). If you need dynamic
/// dispatch, use [`DynUploadProvider`] instead -- every `UploadProvider`
/// automatically implements `DynUploadProvider` via a blanket implementation.
pub trait UploadProvider: Send + Sync {
    /// Which provider this is.
    fn id(&self) -> ProviderId;

    /// Make exactly one attempt at uploading `file`.
    ///
    /// Implementations report progress and observe cancellation through
    /// `ctx`, and must not retry internally.
    fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> impl std::future::Future<Output = Result<UploadedFile, ProviderError>> + Send;

    /// Whether the provider offers a delete API.
    ///
    /// Defaults to `false`: uploads to such providers cannot be undone and
    /// deleting their tags is a no-op.
    fn supports_delete(&self) -> bool {
        false
    }

    /// Delete the upload described by `tag`.
    ///
    /// The default implementation succeeds without any network call.
    /// Implementations must treat "not found" as success.
    fn delete(
        &self,
        _tag: &ProviderTag,
    ) -> impl std::future::Future<Output = Result<(), ProviderError>> + Send {
        async { Ok(()) }
    }
}

/// Object-safe provider trait for use behind `Arc<dyn DynUploadProvider>`.
///
/// Uses [`macro@async_trait`] to enable dynamic dispatch of async methods.
/// You generally should not implement this trait directly -- instead implement
/// [`UploadProvider`] and rely on the blanket implementation.
#[async_trait]
pub trait DynUploadProvider: Send + Sync {
    /// Which provider this is.
    fn id(&self) -> ProviderId;

    /// Make exactly one attempt at uploading `file`.
    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError>;

    /// Whether the provider offers a delete API.
    fn supports_delete(&self) -> bool {
        false
    }

    /// Delete the upload described by `tag`.
    async fn delete(&self, tag: &ProviderTag) -> Result<(), ProviderError>;
}

/// Blanket implementation: any type that implements [`UploadProvider`] also
/// implements [`DynUploadProvider`], bridging the static and dynamic dispatch
/// worlds.
#[async_trait]
impl<T: UploadProvider + Sync> DynUploadProvider for T {
    fn id(&self) -> ProviderId {
        UploadProvider::id(self)
    }

    async fn upload(
        &self,
        file: &SourceFile,
        ctx: &AttemptContext,
    ) -> Result<UploadedFile, ProviderError> {
        UploadProvider::upload(self, file, ctx).await
    }

    fn supports_delete(&self) -> bool {
        UploadProvider::supports_delete(self)
    }

    async fn delete(&self, tag: &ProviderTag) -> Result<(), ProviderError> {
        UploadProvider::delete(self, tag).await
    }
}
