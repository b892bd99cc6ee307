//! Middleware moving media fields in and out of a [`MediaStore`].
//!
//! On create, every media field of the payload is stored through the media
//! store and replaced by its `media:<id>` reference before the record is
//! forwarded. On find, the references in the returned records are resolved to
//! [`MediaObjectInfo`](mediastash_interface::MediaObjectInfo) before they are
//! handed back. Everything else passes through untouched.

use crate::{CollectionInfo, CollectionInfoMap, MediaFieldContext, MediaReference, MediaStore};
use async_trait::async_trait;
use futures::future::try_join_all;
use mediastash_error::{MediaError, MediaErrorKind, MediaStashError, MediaStashResult};
use mediastash_interface::{
    Next, Operation, OperationResult, Record, StorageMiddleware, StorageRegistry, Value,
};
use std::sync::Arc;

/// Rewrites media-typed fields across the create/find boundary.
///
/// The collection info map is computed once from the registry given at
/// construction; collections registered later are never intercepted.
pub struct MediaStorageMiddleware {
    media_store: Arc<dyn MediaStore>,
    collection_info: CollectionInfoMap,
}

impl MediaStorageMiddleware {
    /// Create the middleware, scanning `registry` for media-typed fields.
    pub fn new(media_store: Arc<dyn MediaStore>, registry: &StorageRegistry) -> Self {
        let collection_info = CollectionInfoMap::from_registry(registry);
        tracing::debug!(
            collections = collection_info.len(),
            "Computed media field map"
        );
        Self {
            media_store,
            collection_info,
        }
    }

    /// The derived collection to media fields map.
    pub fn collection_info(&self) -> &CollectionInfoMap {
        &self.collection_info
    }

    /// Store every media field, then forward the create with references in their place.
    #[tracing::instrument(skip_all, fields(collection = %collection))]
    async fn create_with_media(
        &self,
        collection: String,
        object: Record,
        info: &CollectionInfo,
        next: Next<'_>,
    ) -> MediaStashResult<OperationResult> {
        let pending = info
            .media_fields()
            .iter()
            .filter_map(|field| match object.get(field.name()) {
                None | Some(Value::Null) if field.is_optional() => None,
                Some(Value::Media(media)) => Some(Ok((field.name(), media))),
                _ => Some(Err(MediaError::new(MediaErrorKind::InvalidMediaObject {
                    collection: collection.clone(),
                    field: field.name().to_string(),
                }))),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let collection_name = collection.as_str();
        let parent = &object;
        let references = try_join_all(pending.into_iter().map(|(field, media)| async move {
            let context = MediaFieldContext::new(collection_name, field, parent);
            let id = self
                .media_store
                .store_media_object_with_context(media, &context)
                .await?;
            Ok::<_, MediaStashError>((field, MediaReference::new(id)))
        }))
        .await?;

        let mut modified = object;
        for (field, reference) in references {
            tracing::debug!(field, reference = %reference, "Replaced media field with reference");
            modified.insert(field, reference.to_string());
        }

        next.run(Operation::CreateObject {
            collection,
            object: modified,
        })
        .await
    }

    /// Replace every media reference in `object` with resolved access info.
    async fn resolve_media_fields(
        &self,
        collection: &str,
        mut object: Record,
        info: &CollectionInfo,
    ) -> MediaStashResult<Record> {
        let lookups = info
            .media_fields()
            .iter()
            .filter_map(|field| match object.get(field.name()) {
                None | Some(Value::Null) if field.is_optional() => None,
                value => Some(
                    value
                        .and_then(Value::as_text)
                        .and_then(|text| text.parse::<MediaReference>().ok())
                        .map(|reference| (field.name(), reference))
                        .ok_or_else(|| {
                            MediaError::new(MediaErrorKind::InvalidReference {
                                collection: collection.to_string(),
                                field: field.name().to_string(),
                            })
                        }),
                ),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resolved = try_join_all(lookups.into_iter().map(|(field, reference)| async move {
            let info = self.media_store.get_media_object_info(reference.id()).await?;
            Ok::<_, MediaStashError>((field, info))
        }))
        .await?;

        for (field, info) in resolved {
            if info.is_none() {
                tracing::debug!(field, "Referenced media object is missing");
            }
            object.insert(field, Value::from(info));
        }
        Ok(object)
    }
}

impl std::fmt::Debug for MediaStorageMiddleware {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MediaStorageMiddleware")
            .field("collection_info", &self.collection_info)
            .finish()
    }
}

#[async_trait]
impl StorageMiddleware for MediaStorageMiddleware {
    async fn process(
        &self,
        operation: Operation,
        next: Next<'_>,
    ) -> MediaStashResult<OperationResult> {
        let Some(info) = self.collection_info.get(operation.collection()) else {
            return next.run(operation).await;
        };

        match operation {
            Operation::CreateObject { collection, object } => {
                self.create_with_media(collection, object, info, next).await
            }
            Operation::FindObject { .. } => {
                let collection = operation.collection().to_string();
                let found = next.run(operation).await?.into_object()?;
                let Some(object) = found else {
                    return Ok(OperationResult::Object(None));
                };
                let object = self.resolve_media_fields(&collection, object, info).await?;
                Ok(OperationResult::Object(Some(object)))
            }
            Operation::FindObjects { .. } => {
                let collection = operation.collection().to_string();
                let found = next.run(operation).await?.into_objects()?;
                let objects = try_join_all(
                    found
                        .into_iter()
                        .map(|object| self.resolve_media_fields(&collection, object, info)),
                )
                .await?;
                Ok(OperationResult::Objects(objects))
            }
            Operation::UpdateObjects { .. }
            | Operation::DeleteObjects { .. }
            | Operation::CountObjects { .. } => next.run(operation).await,
        }
    }
}
