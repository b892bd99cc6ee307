//! In-memory storage backend.
//!
//! Keeps every collection in a `Vec` behind an `RwLock`. Lookups are linear
//! equality scans; all data is lost when the backend is dropped.

use crate::{
    AutoPkType, ID_FIELD, ObjectId, Operation, OperationResult, Record, StorageBackend,
    StorageRegistry, Value,
};
use async_trait::async_trait;
use mediastash_error::MediaStashResult;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Volatile backend for tests and tooling.
///
/// Primary keys are generated per collection according to its [`AutoPkType`]:
/// integers count up from 1, strings are random UUIDs. A create payload that
/// already carries a non-null `id` keeps it.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    registry: Arc<StorageRegistry>,
    tables: Arc<RwLock<HashMap<String, Table>>>,
}

#[derive(Debug, Default)]
struct Table {
    rows: Vec<Record>,
    next_id: i64,
}

impl Table {
    fn assign_id(&mut self, pk: AutoPkType) -> ObjectId {
        match pk {
            AutoPkType::Int => {
                self.next_id += 1;
                ObjectId::Int(self.next_id)
            }
            AutoPkType::String => ObjectId::Str(Uuid::new_v4().to_string()),
        }
    }
}

impl InMemoryBackend {
    /// Create an empty backend serving the collections in `registry`.
    pub fn new(registry: Arc<StorageRegistry>) -> Self {
        tracing::info!(
            collections = registry.collections().count(),
            "Created in-memory storage backend"
        );
        Self {
            registry,
            tables: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Raw stored rows of a collection, bypassing any middleware (for testing).
    pub async fn rows(&self, collection: &str) -> Vec<Record> {
        self.tables
            .read()
            .await
            .get(collection)
            .map(|table| table.rows.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl StorageBackend for InMemoryBackend {
    #[tracing::instrument(skip(self, operation), fields(operation = operation.name(), collection = operation.collection()))]
    async fn execute(&self, operation: Operation) -> MediaStashResult<OperationResult> {
        let definition = self.registry.require_collection(operation.collection())?;

        match operation {
            Operation::CreateObject { collection, object } => {
                let mut tables = self.tables.write().await;
                let table = tables.entry(collection).or_default();

                let mut object = object;
                let has_id = object.get(ID_FIELD).is_some_and(|id| !id.is_null());
                if !has_id {
                    let id = table.assign_id(definition.pk);
                    object.insert(ID_FIELD, Value::from(id));
                }

                table.rows.push(object.clone());
                tracing::debug!(rows = table.rows.len(), "Created object");
                Ok(OperationResult::Created { object })
            }
            Operation::FindObject { collection, filter } => {
                let tables = self.tables.read().await;
                let found = tables
                    .get(&collection)
                    .and_then(|table| table.rows.iter().find(|row| filter.matches(row)))
                    .cloned();
                Ok(OperationResult::Object(found))
            }
            Operation::FindObjects { collection, filter } => {
                let tables = self.tables.read().await;
                let found = tables
                    .get(&collection)
                    .map(|table| {
                        table
                            .rows
                            .iter()
                            .filter(|row| filter.matches(row))
                            .cloned()
                            .collect()
                    })
                    .unwrap_or_default();
                Ok(OperationResult::Objects(found))
            }
            Operation::UpdateObjects {
                collection,
                filter,
                updates,
            } => {
                let mut tables = self.tables.write().await;
                let mut updated = 0;
                if let Some(table) = tables.get_mut(&collection) {
                    for row in table.rows.iter_mut().filter(|row| filter.matches(row)) {
                        for (field, value) in updates.iter() {
                            row.insert(field, value.clone());
                        }
                        updated += 1;
                    }
                }
                Ok(OperationResult::Updated(updated))
            }
            Operation::DeleteObjects { collection, filter } => {
                let mut tables = self.tables.write().await;
                let deleted = tables
                    .get_mut(&collection)
                    .map(|table| {
                        let before = table.rows.len();
                        table.rows.retain(|row| !filter.matches(row));
                        before - table.rows.len()
                    })
                    .unwrap_or(0);
                Ok(OperationResult::Deleted(deleted))
            }
            Operation::CountObjects { collection, filter } => {
                let tables = self.tables.read().await;
                let count = tables
                    .get(&collection)
                    .map(|table| table.rows.iter().filter(|row| filter.matches(row)).count())
                    .unwrap_or(0);
                Ok(OperationResult::Count(count))
            }
        }
    }
}
