use std::sync::Arc;

use cascade_core::{DeleteOutcome, ProviderId, ProviderTag};
use tracing::{debug, info, warn};

use crate::registry::ProviderRegistry;

/// Routes a provider tag to the provider that can delete it.
///
/// Providers without a delete API, and providers that are not configured,
/// succeed immediately without any network call.
#[derive(Debug, Clone)]
pub struct DeletionCoordinator {
    registry: Arc<ProviderRegistry>,
}

impl DeletionCoordinator {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Delete the upload described by the tag string `tag`.
    pub async fn delete(&self, tag: &str) -> DeleteOutcome {
        if tag.trim().is_empty() {
            debug!("empty provider tag, nothing to delete");
            return DeleteOutcome::Success;
        }
        match tag.parse::<ProviderTag>() {
            Ok(tag) => self.delete_tag(&tag).await,
            Err(err) => DeleteOutcome::failure(err.to_string()),
        }
    }

    /// Delete the upload described by a parsed tag.
    pub async fn delete_tag(&self, tag: &ProviderTag) -> DeleteOutcome {
        let id = tag.provider();
        let Some(provider) = self.registry.get(id) else {
            return unconfigured(id);
        };
        if !provider.supports_delete() {
            debug!(provider = %id, "provider has no delete API");
            return DeleteOutcome::Success;
        }

        match provider.delete(tag).await {
            Ok(()) => {
                info!(provider = %id, "deleted upload");
                DeleteOutcome::Success
            }
            Err(err) => {
                warn!(provider = %id, error = %err, "delete failed");
                DeleteOutcome::failure(format!("{id}: {err}"))
            }
        }
    }
}

/// Outcome of deleting a tag whose provider is not registered.
fn unconfigured(id: ProviderId) -> DeleteOutcome {
    match id {
        ProviderId::R2 => {
            warn!(provider = %id, "signed storage not configured, treating delete as done");
            DeleteOutcome::Success
        }
        id if id.has_delete_api() => {
            warn!(provider = %id, "provider not configured, cannot delete");
            DeleteOutcome::failure(format!("{id}: provider not configured"))
        }
        id => {
            debug!(provider = %id, "provider has no delete API");
            DeleteOutcome::Success
        }
    }
}
