use std::collections::HashMap;
use std::sync::Arc;

use cascade_core::{FileCategory, ProviderId};
use cascade_provider::DynUploadProvider;

/// A registry that maps provider ids to their implementations.
///
/// Built once when the [`Uploader`](crate::Uploader) is constructed and never
/// mutated afterwards, so fallback chains are fixed for the uploader's
/// lifetime.
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, Arc<dyn DynUploadProvider>>,
}

impl ProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Register a provider under its own id, replacing any previous one.
    pub fn register(&mut self, provider: Arc<dyn DynUploadProvider>) {
        self.providers.insert(provider.id(), provider);
    }

    /// Look up a provider by id.
    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn DynUploadProvider>> {
        self.providers.get(&id).cloned()
    }

    /// The fallback chain for `category`: registered providers in chain order.
    pub fn chain(&self, category: FileCategory) -> Vec<Arc<dyn DynUploadProvider>> {
        ProviderId::chain_for(category)
            .iter()
            .filter_map(|id| self.get(*id))
            .collect()
    }

    /// Ids of all registered providers, in declaration order.
    pub fn list(&self) -> Vec<ProviderId> {
        ProviderId::ALL
            .iter()
            .copied()
            .filter(|id| self.providers.contains_key(id))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.list())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use cascade_provider::{
        AttemptContext, ProviderError, SourceFile, UploadProvider, UploadedFile,
    };

    use super::*;

    struct StubProvider(ProviderId);

    impl UploadProvider for StubProvider {
        fn id(&self) -> ProviderId {
            self.0
        }

        async fn upload(
            &self,
            _file: &SourceFile,
            _ctx: &AttemptContext,
        ) -> Result<UploadedFile, ProviderError> {
            Err(ProviderError::Network("stub".into()))
        }
    }

    fn registry(ids: &[ProviderId]) -> ProviderRegistry {
        let mut reg = ProviderRegistry::new();
        for id in ids {
            reg.register(Arc::new(StubProvider(*id)));
        }
        reg
    }

    #[test]
    fn empty_registry() {
        let reg = ProviderRegistry::new();
        assert!(reg.is_empty());
        assert!(reg.chain(FileCategory::Image).is_empty());
    }

    #[test]
    fn chain_follows_fixed_order() {
        let reg = registry(&[
            ProviderId::ImgHippo,
            ProviderId::ImgBb,
            ProviderId::Cloudinary,
            ProviderId::PostImages,
        ]);
        let ids: Vec<_> = reg
            .chain(FileCategory::Image)
            .iter()
            .map(|p| p.id())
            .collect();
        assert_eq!(
            ids,
            vec![ProviderId::ImgBb, ProviderId::PostImages, ProviderId::ImgHippo]
        );
    }

    #[test]
    fn chain_skips_unregistered() {
        let reg = registry(&[ProviderId::Cloudinary]);
        let ids: Vec<_> = reg
            .chain(FileCategory::Other)
            .iter()
            .map(|p| p.id())
            .collect();
        assert_eq!(ids, vec![ProviderId::Cloudinary]);
    }

    #[test]
    fn register_replaces() {
        let mut reg = registry(&[ProviderId::R2]);
        reg.register(Arc::new(StubProvider(ProviderId::R2)));
        assert_eq!(reg.len(), 1);
        assert_eq!(reg.list(), vec![ProviderId::R2]);
    }
}
