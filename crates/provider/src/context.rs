use std::fmt;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

type ProgressFn = dyn Fn(u8) + Send + Sync;

/// Per-attempt context handed to a provider.
///
/// Carries the request's cancellation handle and the sink for progress
/// updates. Cloning is cheap; clones share the same token and sink.
#[derive(Clone)]
pub struct AttemptContext {
    cancellation: CancellationToken,
    progress: Arc<ProgressFn>,
}

impl fmt::Debug for AttemptContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttemptContext")
            .field("cancelled", &self.cancellation.is_cancelled())
            .finish_non_exhaustive()
    }
}

impl Default for AttemptContext {
    fn default() -> Self {
        Self::detached()
    }
}

impl AttemptContext {
    /// Create a context that reports progress through `on_progress`.
    pub fn new(cancellation: CancellationToken, on_progress: impl Fn(u8) + Send + Sync + 'static) -> Self {
        Self {
            cancellation,
            progress: Arc::new(on_progress),
        }
    }

    /// A context with its own token that discards progress.
    pub fn detached() -> Self {
        Self::new(CancellationToken::new(), |_| {})
    }

    /// The token that aborts this attempt when cancelled.
    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancellation
    }

    /// Returns `true` once the request has been cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Forward a progress percentage to the caller.
    pub fn report_progress(&self, percent: u8) {
        (self.progress)(percent);
    }
}
