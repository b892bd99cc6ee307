//! Media store that keeps blobs in a collection of the storage layer itself.
//!
//! Media objects live in one collection (`mediaObject` by default) with two data
//! fields, `mimetype` and `data`, next to the application's own collections.
//! Reads produce base64 `data:` URIs.

use crate::{MediaStore, encode_data_uri};
use async_trait::async_trait;
use derive_getters::Getters;
use mediastash_error::{MediaStashResult, StorageError, StorageErrorKind};
use mediastash_interface::{
    AutoPkType, CollectionDefinition, FieldDefinition, FieldType, Filter, ID_FIELD,
    MediaObjectInfo, ObjectId, Operation, OperationResult, Record, StorageBackend,
    StorageRegistry, UnsavedMediaObject, Value,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Named operation inserting one media object.
pub const CREATE_MEDIA_OBJECT: &str = "createMediaObject";
/// Named operation looking up one media object by id.
pub const FIND_MEDIA_OBJECT: &str = "findMediaObject";

const MIMETYPE_FIELD: &str = "mimetype";
const DATA_FIELD: &str = "data";

/// Configuration for [`DatabaseMediaStore`].
///
/// # Example
///
/// ```toml
/// [media]
/// collection = "mediaObject"
/// auto_pk_type = "int"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_setters::Setters)]
#[setters(prefix = "with_")]
pub struct MediaStoreConfig {
    /// Collection holding media objects
    #[serde(default = "default_collection")]
    #[setters(into)]
    collection: String,

    /// Key type of that collection
    #[serde(default)]
    auto_pk_type: AutoPkType,
}

fn default_collection() -> String {
    "mediaObject".to_string()
}

impl Default for MediaStoreConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            auto_pk_type: AutoPkType::default(),
        }
    }
}

impl MediaStoreConfig {
    /// Definition of the media object collection.
    pub fn collection_definition(&self) -> CollectionDefinition {
        CollectionDefinition::new()
            .with_pk(self.auto_pk_type)
            .with_field(MIMETYPE_FIELD, FieldDefinition::new(FieldType::String))
            .with_field(DATA_FIELD, FieldDefinition::new(FieldType::Blob))
    }
}

/// Media store backed by the generic storage layer.
///
/// Operations go straight to the [`StorageBackend`], so the media collection
/// never passes through the middleware that depends on this store. Other
/// middleware installed on the [`StorageManager`](mediastash_interface::StorageManager)
/// (auditing, access control) does not see media object writes or reads either.
pub struct DatabaseMediaStore {
    backend: Arc<dyn StorageBackend>,
    config: MediaStoreConfig,
}

impl DatabaseMediaStore {
    /// Create a store over `backend`.
    ///
    /// The backend's registry must already contain the media collection; see
    /// [`register_collections`](Self::register_collections).
    pub fn new(backend: Arc<dyn StorageBackend>, config: MediaStoreConfig) -> Self {
        tracing::info!(
            collection = %config.collection,
            auto_pk_type = %config.auto_pk_type,
            "Created database media store"
        );
        Self { backend, config }
    }

    /// Register the media object collection.
    ///
    /// # Errors
    ///
    /// Fails if a collection with the configured name already exists.
    pub fn register_collections(
        registry: &mut StorageRegistry,
        config: &MediaStoreConfig,
    ) -> MediaStashResult<()> {
        registry.register_collection(config.collection.clone(), config.collection_definition())
    }

    /// Store configuration.
    pub fn config(&self) -> &MediaStoreConfig {
        &self.config
    }

    /// Execute one of the store's named operations.
    ///
    /// - [`CREATE_MEDIA_OBJECT`] inserts `args` as a new media object.
    /// - [`FIND_MEDIA_OBJECT`] looks up the object whose id is `args["id"]`.
    ///
    /// # Errors
    ///
    /// Fails for unknown operation names, a find without an `id`, and backend errors.
    #[tracing::instrument(skip(self, args), fields(collection = %self.config.collection))]
    pub async fn operation(&self, name: &str, args: Record) -> MediaStashResult<OperationResult> {
        let collection = self.config.collection.clone();
        let operation = match name {
            CREATE_MEDIA_OBJECT => Operation::CreateObject {
                collection,
                object: args,
            },
            FIND_MEDIA_OBJECT => {
                let id = args.id().ok_or_else(|| {
                    StorageError::new(StorageErrorKind::InvalidArguments(format!(
                        "{} requires an '{}' argument",
                        FIND_MEDIA_OBJECT, ID_FIELD
                    )))
                })?;
                Operation::FindObject {
                    collection,
                    filter: Filter::by_id(id),
                }
            }
            other => {
                return Err(StorageError::new(StorageErrorKind::UnknownOperation(
                    other.to_string(),
                ))
                .into());
            }
        };

        self.backend.execute(operation).await
    }
}

impl std::fmt::Debug for DatabaseMediaStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseMediaStore")
            .field("config", &self.config)
            .finish()
    }
}

#[track_caller]
fn malformed(reason: String) -> StorageError {
    StorageError::new(StorageErrorKind::UnexpectedResult(reason))
}

#[async_trait]
impl MediaStore for DatabaseMediaStore {
    #[tracing::instrument(skip(self, object), fields(size = object.data().len(), mimetype = object.mimetype()))]
    async fn store_media_object(&self, object: &UnsavedMediaObject) -> MediaStashResult<ObjectId> {
        let args = Record::new()
            .with(MIMETYPE_FIELD, object.mimetype())
            .with(DATA_FIELD, object.data().to_vec());

        let created = self
            .operation(CREATE_MEDIA_OBJECT, args)
            .await?
            .into_created()?;
        let id = created
            .id()
            .ok_or_else(|| malformed("created media object has no id".to_string()))?;

        tracing::debug!(id = %id, "Stored media object");
        Ok(id)
    }

    #[tracing::instrument(skip(self, id), fields(id = %id))]
    async fn get_media_object_info(
        &self,
        id: &ObjectId,
    ) -> MediaStashResult<Option<MediaObjectInfo>> {
        let Some(id) = id.normalize(self.config.auto_pk_type) else {
            tracing::debug!("Id cannot name a media object, treating as not found");
            return Ok(None);
        };

        let found = self
            .operation(FIND_MEDIA_OBJECT, Record::new().with(ID_FIELD, Value::from(id)))
            .await?
            .into_object()?;
        let Some(media_object) = found else {
            tracing::debug!("Media object not found");
            return Ok(None);
        };

        let mimetype = media_object
            .get(MIMETYPE_FIELD)
            .and_then(Value::as_text)
            .ok_or_else(|| malformed(format!("media object has no '{}' text", MIMETYPE_FIELD)))?;
        let data = media_object
            .get(DATA_FIELD)
            .and_then(Value::as_blob)
            .ok_or_else(|| malformed(format!("media object has no '{}' blob", DATA_FIELD)))?;

        Ok(Some(MediaObjectInfo::new(encode_data_uri(mimetype, data))))
    }
}
