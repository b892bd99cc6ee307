//! Generic object storage contracts for mediastash.
//!
//! This crate models the storage layer that media fields are layered on top of:
//!
//! - [`Record`] / [`Value`] - loosely shaped objects keyed by field name
//! - [`StorageRegistry`] - collection definitions with typed fields
//! - [`Operation`] / [`OperationResult`] - the closed set of storage operations
//! - [`StorageBackend`] - executes operations against persisted state
//! - [`StorageMiddleware`] / [`Next`] - ordered chain of operation interceptors
//! - [`StorageManager`] - registry + backend + middleware, with per-collection handles
//! - [`InMemoryBackend`] - volatile backend for tests and tooling
//!
//! # Example
//!
//! ```rust
//! use mediastash_interface::{
//!     CollectionDefinition, FieldDefinition, FieldType, Record, StorageManager,
//!     StorageRegistry, Value,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut registry = StorageRegistry::new();
//! registry.register_collection(
//!     "note",
//!     CollectionDefinition::new().with_field("title", FieldDefinition::new(FieldType::String)),
//! )?;
//!
//! let storage = StorageManager::in_memory(registry);
//! let created = storage
//!     .collection("note")
//!     .create_object(Record::new().with("title", Value::from("hello")))
//!     .await?;
//! assert!(created.id().is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod manager;
mod media;
mod memory;
mod middleware;
mod operation;
mod schema;
mod value;

pub use manager::{CollectionHandle, StorageManager};
pub use media::{MediaObjectInfo, UnsavedMediaObject};
pub use memory::InMemoryBackend;
pub use middleware::{Next, StorageBackend, StorageMiddleware};
pub use operation::{Filter, Operation, OperationResult};
pub use schema::{AutoPkType, CollectionDefinition, FieldDefinition, FieldType, StorageRegistry};
pub use value::{ID_FIELD, ObjectId, Record, Value};
