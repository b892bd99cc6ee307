//! Storage manager: registry, backend and middleware chain.

use crate::{
    Filter, InMemoryBackend, Next, Operation, OperationResult, Record, StorageBackend,
    StorageMiddleware, StorageRegistry,
};
use mediastash_error::MediaStashResult;
use std::sync::Arc;

/// Entry point for issuing storage operations.
///
/// Every operation is checked against the registry, then passed through the
/// middleware chain in installation order before reaching the backend.
pub struct StorageManager {
    registry: Arc<StorageRegistry>,
    backend: Arc<dyn StorageBackend>,
    middleware: Vec<Arc<dyn StorageMiddleware>>,
}

impl StorageManager {
    /// Create a manager over an existing backend.
    pub fn new(registry: Arc<StorageRegistry>, backend: Arc<dyn StorageBackend>) -> Self {
        Self {
            registry,
            backend,
            middleware: Vec::new(),
        }
    }

    /// Create a manager backed by a fresh [`InMemoryBackend`].
    pub fn in_memory(registry: StorageRegistry) -> Self {
        let registry = Arc::new(registry);
        let backend = Arc::new(InMemoryBackend::new(registry.clone()));
        Self::new(registry, backend)
    }

    /// The schema registry.
    pub fn registry(&self) -> &StorageRegistry {
        &self.registry
    }

    /// Shared handle to the backend, for storage modules that execute their
    /// own operations.
    pub fn backend(&self) -> Arc<dyn StorageBackend> {
        self.backend.clone()
    }

    /// Replace the middleware chain. The first element sees operations first.
    pub fn set_middleware(&mut self, middleware: Vec<Arc<dyn StorageMiddleware>>) {
        tracing::debug!(links = middleware.len(), "Installed storage middleware");
        self.middleware = middleware;
    }

    /// Run an operation through the middleware chain and the backend.
    ///
    /// # Errors
    ///
    /// Fails for unregistered collections, and with whatever the chain or
    /// backend reports.
    #[tracing::instrument(skip(self, operation), fields(operation = operation.name(), collection = operation.collection()))]
    pub async fn execute(&self, operation: Operation) -> MediaStashResult<OperationResult> {
        self.registry.require_collection(operation.collection())?;
        Next::new(&self.middleware, self.backend.as_ref())
            .run(operation)
            .await
    }

    /// Handle for operations on one collection.
    pub fn collection<'a>(&'a self, name: &'a str) -> CollectionHandle<'a> {
        CollectionHandle {
            manager: self,
            name,
        }
    }
}

impl std::fmt::Debug for StorageManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageManager")
            .field("registry", &self.registry)
            .field("middleware", &self.middleware.len())
            .finish()
    }
}

/// Operations scoped to a single collection.
#[derive(Debug, Clone, Copy)]
pub struct CollectionHandle<'a> {
    manager: &'a StorageManager,
    name: &'a str,
}

impl CollectionHandle<'_> {
    /// Insert an object, returning it as stored.
    pub async fn create_object(&self, object: Record) -> MediaStashResult<Record> {
        self.manager
            .execute(Operation::CreateObject {
                collection: self.name.to_string(),
                object,
            })
            .await?
            .into_created()
    }

    /// First object matching `filter`.
    pub async fn find_object(&self, filter: Filter) -> MediaStashResult<Option<Record>> {
        self.manager
            .execute(Operation::FindObject {
                collection: self.name.to_string(),
                filter,
            })
            .await?
            .into_object()
    }

    /// Every object matching `filter`.
    pub async fn find_objects(&self, filter: Filter) -> MediaStashResult<Vec<Record>> {
        self.manager
            .execute(Operation::FindObjects {
                collection: self.name.to_string(),
                filter,
            })
            .await?
            .into_objects()
    }

    /// Overwrite fields on every object matching `filter`.
    pub async fn update_objects(&self, filter: Filter, updates: Record) -> MediaStashResult<usize> {
        self.manager
            .execute(Operation::UpdateObjects {
                collection: self.name.to_string(),
                filter,
                updates,
            })
            .await?
            .into_count()
    }

    /// Delete every object matching `filter`.
    pub async fn delete_objects(&self, filter: Filter) -> MediaStashResult<usize> {
        self.manager
            .execute(Operation::DeleteObjects {
                collection: self.name.to_string(),
                filter,
            })
            .await?
            .into_count()
    }

    /// Count objects matching `filter`.
    pub async fn count_objects(&self, filter: Filter) -> MediaStashResult<usize> {
        self.manager
            .execute(Operation::CountObjects {
                collection: self.name.to_string(),
                filter,
            })
            .await?
            .into_count()
    }
}
