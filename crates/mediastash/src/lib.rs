//! Media-typed fields for generic object storage.
//!
//! Collections declare fields of type `media`. On create, the
//! [`MediaStorageMiddleware`] moves their payloads into a [`MediaStore`] and
//! keeps a `media:<id>` reference in the record; on find, references come back
//! as [`MediaObjectInfo`] carrying a URL.
//!
//! ```no_run
//! use mediastash::{MediaStack, MediaStashConfig, Record, UnsavedMediaObject};
//!
//! # async fn run() -> mediastash::MediaStashResult<()> {
//! let config = MediaStashConfig::load()?;
//! let stack = MediaStack::in_memory(&config)?;
//! let user = stack
//!     .storage
//!     .collection("user")
//!     .create_object(Record::new().with(
//!         "picture",
//!         UnsavedMediaObject::new("text/plain", b"test".to_vec()),
//!     ))
//!     .await?;
//! # let _ = user;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod observability;
mod stack;

pub use config::{LoggingConfig, MediaStashConfig};
pub use observability::{ObservabilityConfig, init_observability, init_observability_with_config};
pub use stack::MediaStack;

pub use mediastash_error::{
    ConfigError, JsonError, MediaError, MediaErrorKind, MediaStashError, MediaStashErrorKind,
    MediaStashResult, StorageError, StorageErrorKind,
};
pub use mediastash_interface::{
    AutoPkType, CollectionDefinition, CollectionHandle, FieldDefinition, FieldType, Filter,
    InMemoryBackend, MediaObjectInfo, Next, ObjectId, Operation, OperationResult, Record,
    StorageBackend, StorageManager, StorageMiddleware, StorageRegistry, UnsavedMediaObject, Value,
};
pub use mediastash_storage::{
    CollectionInfo, CollectionInfoMap, DataUri, DatabaseMediaStore, MediaField, MediaFieldContext,
    MediaReference, MediaStorageMiddleware, MediaStore, MediaStoreConfig, decode_data_uri,
    encode_data_uri,
};
