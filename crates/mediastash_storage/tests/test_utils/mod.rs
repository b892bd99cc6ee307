//! Test utilities for media storage tests.
//!
//! Builds an in-memory storage manager with a `user` collection holding a
//! `picture` media field, a database media store, and the media middleware.

#![allow(dead_code)]

use async_trait::async_trait;
use mediastash_error::{MediaStashResult, StorageError, StorageErrorKind};
use mediastash_interface::{
    AutoPkType, CollectionDefinition, FieldDefinition, FieldType, InMemoryBackend,
    MediaObjectInfo, ObjectId, StorageManager, StorageRegistry, UnsavedMediaObject,
};
use mediastash_storage::{
    DatabaseMediaStore, MediaFieldContext, MediaStorageMiddleware, MediaStore, MediaStoreConfig,
};
use std::sync::{Arc, Mutex};

/// Everything a test needs to poke at.
pub struct Harness {
    pub storage: StorageManager,
    pub media_store: Arc<DatabaseMediaStore>,
    pub backend: Arc<InMemoryBackend>,
}

/// Collections used across tests.
pub fn test_collections() -> Vec<(&'static str, CollectionDefinition)> {
    vec![
        (
            "user",
            CollectionDefinition::new()
                .with_field("name", FieldDefinition::new(FieldType::String))
                .with_field("picture", FieldDefinition::new(FieldType::Media)),
        ),
        (
            "profile",
            CollectionDefinition::new()
                .with_field("avatar", FieldDefinition::new(FieldType::Media))
                .with_field("banner", FieldDefinition::new(FieldType::Media))
                .with_field("cover", FieldDefinition::new(FieldType::Media).optional()),
        ),
        (
            "note",
            CollectionDefinition::new()
                .with_field("title", FieldDefinition::new(FieldType::String))
                .with_field("attachment", FieldDefinition::new(FieldType::Blob)),
        ),
    ]
}

/// Storage without any middleware, plus the media store.
pub fn setup_without_middleware(pk: AutoPkType) -> Harness {
    let config = MediaStoreConfig::default().with_auto_pk_type(pk);
    let mut registry = StorageRegistry::new();
    registry.register_collections(test_collections()).unwrap();
    DatabaseMediaStore::register_collections(&mut registry, &config).unwrap();

    let registry = Arc::new(registry);
    let backend = Arc::new(InMemoryBackend::new(registry.clone()));
    let storage = StorageManager::new(registry, backend.clone());
    let media_store = Arc::new(DatabaseMediaStore::new(backend.clone(), config));

    Harness {
        storage,
        media_store,
        backend,
    }
}

/// Storage with the media middleware installed over a database media store.
pub fn setup_test(pk: AutoPkType) -> Harness {
    let mut harness = setup_without_middleware(pk);
    let middleware = MediaStorageMiddleware::new(
        harness.media_store.clone(),
        harness.storage.registry(),
    );
    harness.storage.set_middleware(vec![Arc::new(middleware)]);
    harness
}

/// The canonical test blob.
pub fn test_picture() -> UnsavedMediaObject {
    UnsavedMediaObject::new("text/plain", b"test".to_vec())
}

/// Media store wrapper recording the context of every contextual store call.
pub struct RecordingStore {
    pub inner: Arc<DatabaseMediaStore>,
    pub contexts: Mutex<Vec<(String, String, bool)>>,
}

#[async_trait]
impl MediaStore for RecordingStore {
    async fn store_media_object(&self, object: &UnsavedMediaObject) -> MediaStashResult<ObjectId> {
        self.inner.store_media_object(object).await
    }

    async fn store_media_object_with_context(
        &self,
        object: &UnsavedMediaObject,
        context: &MediaFieldContext<'_>,
    ) -> MediaStashResult<ObjectId> {
        self.contexts.lock().unwrap().push((
            context.collection.to_string(),
            context.field.to_string(),
            context.parent.contains(context.field),
        ));
        self.inner.store_media_object(object).await
    }

    async fn get_media_object_info(
        &self,
        id: &ObjectId,
    ) -> MediaStashResult<Option<MediaObjectInfo>> {
        self.inner.get_media_object_info(id).await
    }
}

/// Media store wrapper failing writes to one field, and optionally every read.
pub struct FailingStore {
    pub inner: Arc<DatabaseMediaStore>,
    pub fail_field: Option<&'static str>,
    pub fail_reads: bool,
}

fn backend_failure() -> StorageError {
    StorageError::new(StorageErrorKind::Backend("media store unavailable".to_string()))
}

#[async_trait]
impl MediaStore for FailingStore {
    async fn store_media_object(&self, object: &UnsavedMediaObject) -> MediaStashResult<ObjectId> {
        self.inner.store_media_object(object).await
    }

    async fn store_media_object_with_context(
        &self,
        object: &UnsavedMediaObject,
        context: &MediaFieldContext<'_>,
    ) -> MediaStashResult<ObjectId> {
        if self.fail_field == Some(context.field) {
            return Err(backend_failure().into());
        }
        self.inner.store_media_object(object).await
    }

    async fn get_media_object_info(
        &self,
        id: &ObjectId,
    ) -> MediaStashResult<Option<MediaObjectInfo>> {
        if self.fail_reads {
            return Err(backend_failure().into());
        }
        self.inner.get_media_object_info(id).await
    }
}

/// Harness whose middleware runs over a [`FailingStore`].
pub fn setup_failing(fail_field: Option<&'static str>, fail_reads: bool) -> Harness {
    let mut harness = setup_without_middleware(AutoPkType::Int);
    let failing = Arc::new(FailingStore {
        inner: harness.media_store.clone(),
        fail_field,
        fail_reads,
    });
    let middleware = MediaStorageMiddleware::new(failing, harness.storage.registry());
    harness.storage.set_middleware(vec![Arc::new(middleware)]);
    harness
}
