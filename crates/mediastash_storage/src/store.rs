//! Media store trait definition.

use async_trait::async_trait;
use mediastash_error::MediaStashResult;
use mediastash_interface::{MediaObjectInfo, ObjectId, Record, UnsavedMediaObject};

/// Where a media object being stored came from.
///
/// Passed to [`MediaStore::store_media_object_with_context`] by the middleware so
/// backends can apply per-field policy (access control, path layout, ...).
#[derive(Debug, Clone, Copy)]
pub struct MediaFieldContext<'a> {
    /// Collection of the owning record
    pub collection: &'a str,
    /// Media-typed field the object was found in
    pub field: &'a str,
    /// The owning record as submitted, media fields still unsaved
    pub parent: &'a Record,
}

impl<'a> MediaFieldContext<'a> {
    /// Describe a media field of a record being created.
    pub fn new(collection: &'a str, field: &'a str, parent: &'a Record) -> Self {
        Self {
            collection,
            field,
            parent,
        }
    }
}

/// Trait for pluggable media storage backends.
///
/// Implementations own every media object they store. Nothing is ever
/// deduplicated: storing identical content twice yields two ids.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Persist a media object and return its id.
    ///
    /// The object must be fully stored when this returns.
    async fn store_media_object(&self, object: &UnsavedMediaObject) -> MediaStashResult<ObjectId>;

    /// Persist a media object found in a record field.
    ///
    /// The default ignores the context and delegates to
    /// [`store_media_object`](MediaStore::store_media_object).
    async fn store_media_object_with_context(
        &self,
        object: &UnsavedMediaObject,
        context: &MediaFieldContext<'_>,
    ) -> MediaStashResult<ObjectId> {
        let _ = context;
        self.store_media_object(object).await
    }

    /// Resolve an id to access information.
    ///
    /// Accepts the id in its native form or as text. Returns `Ok(None)` when no
    /// such object exists; not-found is never an error.
    async fn get_media_object_info(&self, id: &ObjectId)
    -> MediaStashResult<Option<MediaObjectInfo>>;
}
