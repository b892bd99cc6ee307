//! Storage operations and their results.

use crate::{ID_FIELD, ObjectId, Record, Value};
use mediastash_error::{MediaStashResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Equality filter over record fields.
///
/// An empty filter matches every record.
///
/// # Examples
///
/// ```
/// use mediastash_interface::{Filter, Record};
///
/// let filter = Filter::by_id(1_i64);
/// assert!(filter.matches(&Record::new().with("id", 1_i64)));
/// assert!(!filter.matches(&Record::new().with("id", 2_i64)));
/// assert!(Filter::all().matches(&Record::new()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Filter(BTreeMap<String, Value>);

impl Filter {
    /// Match everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// Match the object with the given primary key.
    pub fn by_id(id: impl Into<ObjectId>) -> Self {
        Self::all().where_eq(ID_FIELD, id.into())
    }

    /// Add an equality condition.
    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// True if every condition holds for the record.
    pub fn matches(&self, record: &Record) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| record.get(field) == Some(expected))
    }
}

/// A storage operation against one collection.
///
/// The set is closed: interceptors match it exhaustively and decide explicitly
/// what passes through untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Insert one object
    CreateObject {
        /// Target collection
        collection: String,
        /// Object payload
        object: Record,
    },
    /// Find the first object matching a filter
    FindObject {
        /// Target collection
        collection: String,
        /// Lookup criteria
        filter: Filter,
    },
    /// Find every object matching a filter
    FindObjects {
        /// Target collection
        collection: String,
        /// Lookup criteria
        filter: Filter,
    },
    /// Set fields on every object matching a filter
    UpdateObjects {
        /// Target collection
        collection: String,
        /// Lookup criteria
        filter: Filter,
        /// Fields to overwrite
        updates: Record,
    },
    /// Remove every object matching a filter
    DeleteObjects {
        /// Target collection
        collection: String,
        /// Lookup criteria
        filter: Filter,
    },
    /// Count objects matching a filter
    CountObjects {
        /// Target collection
        collection: String,
        /// Lookup criteria
        filter: Filter,
    },
}

impl Operation {
    /// Collection the operation targets.
    pub fn collection(&self) -> &str {
        match self {
            Operation::CreateObject { collection, .. }
            | Operation::FindObject { collection, .. }
            | Operation::FindObjects { collection, .. }
            | Operation::UpdateObjects { collection, .. }
            | Operation::DeleteObjects { collection, .. }
            | Operation::CountObjects { collection, .. } => collection,
        }
    }

    /// Operation name as used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::CreateObject { .. } => "createObject",
            Operation::FindObject { .. } => "findObject",
            Operation::FindObjects { .. } => "findObjects",
            Operation::UpdateObjects { .. } => "updateObjects",
            Operation::DeleteObjects { .. } => "deleteObjects",
            Operation::CountObjects { .. } => "countObjects",
        }
    }
}

/// Result of executing an [`Operation`].
#[derive(Debug, Clone, PartialEq)]
pub enum OperationResult {
    /// Object as stored, including its generated id
    Created {
        /// The stored object
        object: Record,
    },
    /// Single lookup result
    Object(Option<Record>),
    /// Multi-object lookup result
    Objects(Vec<Record>),
    /// Number of matching objects
    Count(usize),
    /// Number of updated objects
    Updated(usize),
    /// Number of deleted objects
    Deleted(usize),
}

impl OperationResult {
    /// Unwrap a [`OperationResult::Created`].
    #[track_caller]
    pub fn into_created(self) -> MediaStashResult<Record> {
        match self {
            OperationResult::Created { object } => Ok(object),
            other => Err(unexpected("Created", &other)),
        }
    }

    /// Unwrap a [`OperationResult::Object`].
    #[track_caller]
    pub fn into_object(self) -> MediaStashResult<Option<Record>> {
        match self {
            OperationResult::Object(object) => Ok(object),
            other => Err(unexpected("Object", &other)),
        }
    }

    /// Unwrap a [`OperationResult::Objects`].
    #[track_caller]
    pub fn into_objects(self) -> MediaStashResult<Vec<Record>> {
        match self {
            OperationResult::Objects(objects) => Ok(objects),
            other => Err(unexpected("Objects", &other)),
        }
    }

    /// Unwrap any of the counting variants.
    #[track_caller]
    pub fn into_count(self) -> MediaStashResult<usize> {
        match self {
            OperationResult::Count(count)
            | OperationResult::Updated(count)
            | OperationResult::Deleted(count) => Ok(count),
            other => Err(unexpected("Count", &other)),
        }
    }
}

#[track_caller]
fn unexpected(expected: &str, actual: &OperationResult) -> mediastash_error::MediaStashError {
    StorageError::new(StorageErrorKind::UnexpectedResult(format!(
        "expected {}, got {:?}",
        expected, actual
    )))
    .into()
}
