//! Collection definitions and the schema registry.

use mediastash_error::{MediaStashResult, StorageError, StorageErrorKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declared type of a field.
///
/// Serialized as a lowercase tag (`"string"`, `"blob"`, `"media"`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FieldType {
    /// Short text
    String,
    /// Long text
    Text,
    /// Integer
    Int,
    /// Floating point
    Float,
    /// Boolean
    Boolean,
    /// Raw bytes
    Blob,
    /// JSON document
    Json,
    /// Timestamp
    Timestamp,
    /// Blob plus MIME type, stored out of line
    Media,
}

/// How primary keys are generated for a collection.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AutoPkType {
    /// Sequential integers starting at 1
    #[default]
    Int,
    /// Random UUID strings
    String,
}

/// Definition of a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Declared type
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Whether the field may be absent or null
    #[serde(default)]
    pub optional: bool,
}

impl FieldDefinition {
    /// A required field of the given type.
    pub fn new(field_type: FieldType) -> Self {
        Self {
            field_type,
            optional: false,
        }
    }

    /// Mark the field optional.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Definition of a collection.
///
/// # Example
///
/// ```toml
/// [collections.user]
/// pk = "int"
///
/// [collections.user.fields]
/// name = { type = "string" }
/// picture = { type = "media" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionDefinition {
    /// Primary key generation strategy
    #[serde(default)]
    pub pk: AutoPkType,
    /// Fields by name
    #[serde(default)]
    pub fields: BTreeMap<String, FieldDefinition>,
}

impl CollectionDefinition {
    /// Empty collection with integer keys.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the primary key strategy.
    pub fn with_pk(mut self, pk: AutoPkType) -> Self {
        self.pk = pk;
        self
    }

    /// Add a field.
    pub fn with_field(mut self, name: impl Into<String>, definition: FieldDefinition) -> Self {
        self.fields.insert(name.into(), definition);
        self
    }

    /// Fields declared with the given type, in name order.
    pub fn fields_of_type(
        &self,
        field_type: FieldType,
    ) -> impl Iterator<Item = (&str, &FieldDefinition)> {
        self.fields
            .iter()
            .filter(move |(_, definition)| definition.field_type == field_type)
            .map(|(name, definition)| (name.as_str(), definition))
    }
}

/// Registry of every collection known to a storage manager.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageRegistry {
    /// Collections by name
    #[serde(default)]
    collections: BTreeMap<String, CollectionDefinition>,
}

impl StorageRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a collection.
    ///
    /// # Errors
    ///
    /// Fails if a collection with the same name is already registered.
    #[tracing::instrument(skip(self, definition), fields(fields = definition.fields.len()))]
    pub fn register_collection(
        &mut self,
        name: impl Into<String> + std::fmt::Debug,
        definition: CollectionDefinition,
    ) -> MediaStashResult<()> {
        let name = name.into();
        if self.collections.contains_key(&name) {
            return Err(StorageError::new(StorageErrorKind::DuplicateCollection(name)).into());
        }
        tracing::debug!(collection = %name, "Registered collection");
        self.collections.insert(name, definition);
        Ok(())
    }

    /// Register several collections at once.
    pub fn register_collections<I, S>(&mut self, collections: I) -> MediaStashResult<()>
    where
        I: IntoIterator<Item = (S, CollectionDefinition)>,
        S: Into<String> + std::fmt::Debug,
    {
        for (name, definition) in collections {
            self.register_collection(name, definition)?;
        }
        Ok(())
    }

    /// Look up a collection.
    pub fn collection(&self, name: &str) -> Option<&CollectionDefinition> {
        self.collections.get(name)
    }

    /// Look up a collection, failing if it is not registered.
    pub fn require_collection(&self, name: &str) -> MediaStashResult<&CollectionDefinition> {
        self.collection(name).ok_or_else(|| {
            StorageError::new(StorageErrorKind::UnknownCollection(name.to_string())).into()
        })
    }

    /// Iterate collections in name order.
    pub fn collections(&self) -> impl Iterator<Item = (&str, &CollectionDefinition)> {
        self.collections
            .iter()
            .map(|(name, definition)| (name.as_str(), definition))
    }
}
