use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicU16, Ordering};

use cascade_core::{
    DeleteOutcome, FileCategory, ProviderId, UploadEvent, UploadOutcome, UploadRequest,
};
use cascade_provider::{AttemptContext, DynUploadProvider, SourceFile};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, error, info, info_span, warn};

use crate::builder::UploaderBuilder;
use crate::cancellation::CancellationRegistry;
use crate::config::UploaderConfig;
use crate::deletion::DeletionCoordinator;
use crate::error::UploadError;
use crate::registry::ProviderRegistry;

/// Separator between per-provider diagnostics in a failure message.
const DIAGNOSTIC_SEPARATOR: &str = " | ";

/// An upload running on its own task.
///
/// `events` yields progress updates followed by exactly one terminal event;
/// `handle` resolves to the same outcome as the terminal event.
#[derive(Debug)]
pub struct UploadTask {
    pub events: mpsc::UnboundedReceiver<UploadEvent>,
    pub handle: JoinHandle<UploadOutcome>,
}

impl UploadTask {
    /// Wait for the upload to finish, ignoring progress.
    pub async fn outcome(self) -> UploadOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) => UploadOutcome::failure(format!("upload task failed: {err}")),
        }
    }
}

/// Uploads files through an ordered chain of providers, falling back to the
/// next provider whenever one fails.
///
/// Cloning is cheap; clones share providers and the cancellation registry.
#[derive(Debug, Clone)]
pub struct Uploader {
    registry: Arc<ProviderRegistry>,
    cancellations: Arc<CancellationRegistry>,
    deletions: DeletionCoordinator,
}

impl Uploader {
    /// Build an uploader with every provider `config` describes.
    pub fn new(config: UploaderConfig) -> Result<Self, UploadError> {
        UploaderBuilder::new().config(config)?.build()
    }

    /// Start building an uploader.
    pub fn builder() -> UploaderBuilder {
        UploaderBuilder::new()
    }

    pub(crate) fn from_parts(
        registry: Arc<ProviderRegistry>,
        cancellations: Arc<CancellationRegistry>,
    ) -> Self {
        Self {
            deletions: DeletionCoordinator::new(Arc::clone(&registry)),
            registry,
            cancellations,
        }
    }

    /// Registered providers.
    pub fn providers(&self) -> Vec<ProviderId> {
        self.registry.list()
    }

    /// The providers a file of `category` will be offered to, in order.
    pub fn chain(&self, category: FileCategory) -> Vec<ProviderId> {
        self.registry
            .chain(category)
            .iter()
            .map(|provider| provider.id())
            .collect()
    }

    /// The registry used by [`cancel_upload`](Self::cancel_upload).
    pub fn cancellations(&self) -> &Arc<CancellationRegistry> {
        &self.cancellations
    }

    /// Upload `request`, trying each provider of its chain once, in order,
    /// until one succeeds.
    ///
    /// `on_progress` receives the percentage of the current attempt; it
    /// restarts from zero when the chain advances. A percentage equal to the
    /// previous one is not repeated. The request stays cancellable through
    /// [`cancel_upload`](Self::cancel_upload) for the whole chain, including
    /// between attempts.
    pub async fn upload(
        &self,
        request: &UploadRequest,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> UploadOutcome {
        let span = info_span!(
            "upload",
            file = %request.file_name,
            category = %request.category(),
        );
        self.run_chain(request, CancellationToken::new(), on_progress)
            .instrument(span)
            .await
    }

    async fn run_chain(
        &self,
        request: &UploadRequest,
        token: CancellationToken,
        on_progress: impl Fn(u8) + Send + Sync + 'static,
    ) -> UploadOutcome {
        let path = request.path();
        let Some(size) = file_size(path).await else {
            warn!(path = %path.display(), "file not found");
            return UploadOutcome::failure(format!("file not found: {}", path.display()));
        };

        let chain = self.registry.chain(request.category());
        if chain.is_empty() {
            warn!("no provider configured for this category");
            return UploadOutcome::failure(format!(
                "no provider configured for {} files",
                request.category()
            ));
        }

        let file = SourceFile::new(path, &request.file_name, size);
        let last_percent = AtomicU16::new(u16::MAX);
        let ctx = AttemptContext::new(token.clone(), move |percent: u8| {
            if last_percent.swap(u16::from(percent), Ordering::Relaxed) != u16::from(percent) {
                on_progress(percent);
            }
        });

        let registration = self.cancellations.register(path, token.clone());
        let outcome = try_chain(&chain, &file, &ctx).await;
        self.cancellations.unregister(path, registration);
        outcome
    }

    /// Upload `request` on a new task.
    pub fn spawn_upload(&self, request: UploadRequest) -> UploadTask {
        let (tx, events) = mpsc::unbounded_channel();
        let uploader = self.clone();
        let span = info_span!(
            "upload",
            file = %request.file_name,
            category = %request.category(),
        );

        let handle = tokio::spawn(
            async move {
                let progress_tx = tx.clone();
                let outcome = uploader
                    .run_chain(&request, CancellationToken::new(), move |percent| {
                        let _ = progress_tx.send(UploadEvent::Progress { percent });
                    })
                    .await;
                let _ = tx.send(UploadEvent::from(outcome.clone()));
                outcome
            }
            .instrument(span),
        );

        UploadTask { events, handle }
    }

    /// Upload the file at `path`, naming it `file_name`, on a new task.
    pub fn upload_file(&self, path: impl Into<PathBuf>, file_name: impl Into<String>) -> UploadTask {
        self.spawn_upload(UploadRequest::new(path, file_name))
    }

    /// Delete the upload described by a provider tag.
    ///
    /// Tags of providers without a delete API succeed without any network
    /// call, as does an empty tag.
    pub async fn delete_by_provider_tag(&self, tag: &str) -> DeleteOutcome {
        self.deletions.delete(tag).await
    }

    /// Abort the in-flight upload of `path`.
    ///
    /// The current attempt fails like a dropped connection and no further
    /// providers are tried. Returns `false` when no upload of `path` is in
    /// flight.
    pub fn cancel_upload(&self, path: impl AsRef<Path>) -> bool {
        self.cancellations.cancel(path.as_ref())
    }
}

/// Offer `file` to each provider of `chain` in turn until one accepts it or
/// the request is cancelled.
async fn try_chain(
    chain: &[Arc<dyn DynUploadProvider>],
    file: &SourceFile,
    ctx: &AttemptContext,
) -> UploadOutcome {
    let mut diagnostics: Vec<String> = Vec::with_capacity(chain.len());

    for provider in chain {
        if ctx.is_cancelled() {
            break;
        }
        let id = provider.id();
        debug!(provider = %id, size = file.size, "attempting upload");

        match provider.upload(file, ctx).await {
            Ok(uploaded) if !ctx.is_cancelled() => {
                info!(provider = %id, url = %uploaded.url, tag = %uploaded.tag, "upload succeeded");
                return UploadOutcome::Success {
                    url: uploaded.url,
                    tag: uploaded.tag,
                };
            }
            Ok(_) => {
                debug!(provider = %id, "upload finished after cancellation, discarding");
                break;
            }
            Err(err) => {
                warn!(provider = %id, error = %err, "upload attempt failed");
                diagnostics.push(format!("{id}: {err}"));
                if !err.triggers_fallback() {
                    break;
                }
            }
        }
    }

    let message = if ctx.is_cancelled() {
        std::iter::once("upload cancelled".to_owned())
            .chain(diagnostics)
            .collect::<Vec<_>>()
            .join(DIAGNOSTIC_SEPARATOR)
    } else {
        diagnostics.join(DIAGNOSTIC_SEPARATOR)
    };
    error!(%message, "upload failed");
    UploadOutcome::failure(message)
}

/// Size of a regular file, or `None` if it cannot be read.
async fn file_size(path: &Path) -> Option<u64> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Some(metadata.len()),
        _ => None,
    }
}
