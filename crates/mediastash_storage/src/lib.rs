//! Out-of-line storage for media-typed fields.
//!
//! Records declare fields of type `media` whose write-time value is a blob plus a
//! MIME type. This crate keeps those blobs out of the owning record:
//!
//! - [`MediaStore`] - pluggable persistence for blobs (store, resolve to access info)
//! - [`DatabaseMediaStore`] - keeps blobs in a `mediaObject` collection of the same storage layer
//! - [`MediaStorageMiddleware`] - rewrites create/find operations so media fields hold
//!   `media:<id>` references at rest and resolved [`MediaObjectInfo`] on read
//!
//! # Example
//!
//! ```rust
//! use mediastash_interface::{
//!     CollectionDefinition, FieldDefinition, FieldType, Filter, InMemoryBackend, Record,
//!     StorageManager, StorageRegistry, UnsavedMediaObject, Value,
//! };
//! use mediastash_storage::{DatabaseMediaStore, MediaStorageMiddleware, MediaStoreConfig};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = MediaStoreConfig::default();
//! let mut registry = StorageRegistry::new();
//! registry.register_collection(
//!     "user",
//!     CollectionDefinition::new().with_field("picture", FieldDefinition::new(FieldType::Media)),
//! )?;
//! DatabaseMediaStore::register_collections(&mut registry, &config)?;
//!
//! let registry = Arc::new(registry);
//! let backend = Arc::new(InMemoryBackend::new(registry.clone()));
//! let mut storage = StorageManager::new(registry, backend.clone());
//!
//! let media_store = Arc::new(DatabaseMediaStore::new(backend, config));
//! storage.set_middleware(vec![Arc::new(MediaStorageMiddleware::new(
//!     media_store,
//!     storage.registry(),
//! ))]);
//!
//! let user = storage
//!     .collection("user")
//!     .create_object(Record::new().with(
//!         "picture",
//!         UnsavedMediaObject::new("text/plain", b"test".to_vec()),
//!     ))
//!     .await?;
//!
//! let found = storage
//!     .collection("user")
//!     .find_object(Filter::by_id(user.id().unwrap()))
//!     .await?
//!     .unwrap();
//! assert!(matches!(found.get("picture"), Some(Value::MediaInfo(_))));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod collection_info;
mod data_uri;
mod database;
mod middleware;
mod reference;
mod store;

pub use collection_info::{CollectionInfo, CollectionInfoMap, MediaField};
pub use data_uri::{DataUri, decode_data_uri, encode_data_uri};
pub use database::{
    CREATE_MEDIA_OBJECT, DatabaseMediaStore, FIND_MEDIA_OBJECT, MediaStoreConfig,
};
pub use mediastash_interface::{MediaObjectInfo, UnsavedMediaObject};
pub use middleware::MediaStorageMiddleware;
pub use reference::{InvalidMediaReference, MediaReference};
pub use store::{MediaFieldContext, MediaStore};
