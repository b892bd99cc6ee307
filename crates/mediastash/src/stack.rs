//! Assembly of a ready-to-use storage stack from configuration.

use crate::MediaStashConfig;
use mediastash_error::MediaStashResult;
use mediastash_interface::{InMemoryBackend, StorageManager};
use mediastash_storage::{DatabaseMediaStore, MediaStorageMiddleware};
use std::sync::Arc;

/// An in-memory storage manager with the media middleware installed.
#[derive(Debug)]
pub struct MediaStack {
    /// Manager applications issue operations through
    pub storage: StorageManager,
    /// Store holding the media objects
    pub media_store: Arc<DatabaseMediaStore>,
}

impl MediaStack {
    /// Build the stack over a fresh [`InMemoryBackend`].
    ///
    /// # Errors
    ///
    /// Fails if the configured collections clash with the media collection.
    #[tracing::instrument(skip(config), fields(collections = config.collections.len()))]
    pub fn in_memory(config: &MediaStashConfig) -> MediaStashResult<Self> {
        let registry = Arc::new(config.registry()?);
        let backend = Arc::new(InMemoryBackend::new(registry.clone()));
        let media_store = Arc::new(DatabaseMediaStore::new(
            backend.clone(),
            config.media.clone(),
        ));

        let middleware = MediaStorageMiddleware::new(media_store.clone(), &registry);
        let mut storage = StorageManager::new(registry, backend);
        storage.set_middleware(vec![Arc::new(middleware)]);

        Ok(Self {
            storage,
            media_store,
        })
    }
}
