use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Proof of a [`CancellationRegistry::register`] call, needed to unregister.
///
/// Two uploads of the same path may overlap; the registration makes sure one
/// of them finishing never removes the other's entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Registration(u64);

/// In-flight uploads keyed by local path.
///
/// Safe to use from the uploading task, the caller and any external
/// canceller at the same time.
#[derive(Debug, Default)]
pub struct CancellationRegistry {
    active: DashMap<PathBuf, (Registration, CancellationToken)>,
    next_id: AtomicU64,
}

impl CancellationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Track `token` as the handle of the upload of `path`, replacing any
    /// earlier entry for the same path.
    pub fn register(&self, path: &Path, token: CancellationToken) -> Registration {
        let registration = Registration(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.active.insert(path.to_path_buf(), (registration, token));
        registration
    }

    /// Cancel the upload of `path`. Returns `false` if nothing was in flight.
    pub fn cancel(&self, path: &Path) -> bool {
        match self.active.remove(path) {
            Some((_, (_, token))) => {
                debug!(path = %path.display(), "cancelling upload");
                token.cancel();
                true
            }
            None => false,
        }
    }

    /// Stop tracking `path` if it still belongs to `registration`.
    pub fn unregister(&self, path: &Path, registration: Registration) {
        self.active
            .remove_if(path, |_, (current, _)| *current == registration);
    }

    /// Whether an upload of `path` is being tracked.
    pub fn is_active(&self, path: &Path) -> bool {
        self.active.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}
