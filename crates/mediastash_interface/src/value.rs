//! Record and field value types.

use crate::{AutoPkType, MediaObjectInfo, UnsavedMediaObject};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Name of the auto-generated primary key field.
pub const ID_FIELD: &str = "id";

/// Primary key of a stored object.
///
/// Backends choose integer or string keys per collection (see [`AutoPkType`]).
///
/// # Examples
///
/// ```
/// use mediastash_interface::{AutoPkType, ObjectId};
///
/// let id = ObjectId::from("42");
/// assert_eq!(id.normalize(AutoPkType::Int), Some(ObjectId::Int(42)));
/// assert_eq!(ObjectId::Int(7).to_string(), "7");
/// ```
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, derive_more::Display,
)]
#[serde(untagged)]
pub enum ObjectId {
    /// Integer key
    #[display("{}", _0)]
    Int(i64),
    /// String key
    #[display("{}", _0)]
    Str(String),
}

impl ObjectId {
    /// Coerce this id to the key type a collection actually uses.
    ///
    /// Returns `None` when a string cannot be parsed as an integer key; such an
    /// id cannot name any object in an integer-keyed collection.
    pub fn normalize(&self, pk: AutoPkType) -> Option<ObjectId> {
        match (pk, self) {
            (AutoPkType::Int, ObjectId::Int(id)) => Some(ObjectId::Int(*id)),
            (AutoPkType::Int, ObjectId::Str(id)) => id.parse().ok().map(ObjectId::Int),
            (AutoPkType::String, ObjectId::Int(id)) => Some(ObjectId::Str(id.to_string())),
            (AutoPkType::String, ObjectId::Str(id)) => Some(ObjectId::Str(id.clone())),
        }
    }

    /// Read an id out of a field value.
    pub fn from_value(value: &Value) -> Option<ObjectId> {
        match value {
            Value::Int(id) => Some(ObjectId::Int(*id)),
            Value::Text(id) => Some(ObjectId::Str(id.clone())),
            _ => None,
        }
    }
}

impl From<i64> for ObjectId {
    fn from(id: i64) -> Self {
        ObjectId::Int(id)
    }
}

impl From<&str> for ObjectId {
    fn from(id: &str) -> Self {
        ObjectId::Str(id.to_string())
    }
}

impl From<String> for ObjectId {
    fn from(id: String) -> Self {
        ObjectId::Str(id)
    }
}

/// A single field value.
///
/// Media-typed fields move through three shapes: [`Value::Media`] when written by a
/// caller, [`Value::Text`] holding a `media:<id>` reference once persisted, and
/// [`Value::MediaInfo`] when handed back on read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Absent value
    Null,
    /// Boolean
    Bool(bool),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// Text
    Text(String),
    /// Raw bytes
    Blob(Vec<u8>),
    /// Arbitrary JSON document
    Json(serde_json::Value),
    /// Blob plus MIME type awaiting storage
    Media(UnsavedMediaObject),
    /// Resolved access information for stored media
    MediaInfo(MediaObjectInfo),
}

impl Value {
    /// Borrow the text of a [`Value::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            _ => None,
        }
    }

    /// Borrow the bytes of a [`Value::Blob`].
    pub fn as_blob(&self) -> Option<&[u8]> {
        match self {
            Value::Blob(data) => Some(data),
            _ => None,
        }
    }

    /// True for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::Blob(value)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        Value::Json(value)
    }
}

impl From<UnsavedMediaObject> for Value {
    fn from(value: UnsavedMediaObject) -> Self {
        Value::Media(value)
    }
}

impl From<MediaObjectInfo> for Value {
    fn from(value: MediaObjectInfo) -> Self {
        Value::MediaInfo(value)
    }
}

impl From<ObjectId> for Value {
    fn from(id: ObjectId) -> Self {
        match id {
            ObjectId::Int(id) => Value::Int(id),
            ObjectId::Str(id) => Value::Text(id),
        }
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

/// A stored object: field name to value.
///
/// # Examples
///
/// ```
/// use mediastash_interface::{Record, Value};
///
/// let user = Record::new().with("name", "Ada").with("age", 36_i64);
/// assert_eq!(user.get("name"), Some(&Value::from("Ada")));
/// assert_eq!(user.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(BTreeMap<String, Value>);

impl Record {
    /// Create an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, returning the previous value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(field.into(), value.into())
    }

    /// Look up a field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Remove a field.
    pub fn remove(&mut self, field: &str) -> Option<Value> {
        self.0.remove(field)
    }

    /// True if the field is present (even when null).
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Primary key, if assigned.
    pub fn id(&self) -> Option<ObjectId> {
        self.get(ID_FIELD).and_then(ObjectId::from_value)
    }

    /// Iterate fields in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(field, value)| (field.as_str(), value))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(field, value)| (field.into(), value.into()))
                .collect(),
        )
    }
}

impl IntoIterator for Record {
    type Item = (String, Value);
    type IntoIter = std::collections::btree_map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
