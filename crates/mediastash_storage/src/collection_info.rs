//! Per-collection media field lookup table.

use mediastash_interface::{FieldType, StorageRegistry};
use std::collections::HashMap;

/// A media-typed field of a collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaField {
    name: String,
    optional: bool,
}

impl MediaField {
    /// Field name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the field may be absent or null.
    pub fn is_optional(&self) -> bool {
        self.optional
    }
}

/// Media fields of one collection, in name order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionInfo {
    media_fields: Vec<MediaField>,
}

impl CollectionInfo {
    /// The media-typed fields.
    pub fn media_fields(&self) -> &[MediaField] {
        &self.media_fields
    }
}

/// Collection name to its media fields.
///
/// Derived once from a registry and never updated; collections without media
/// fields are left out so that a single lookup decides pass-through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollectionInfoMap {
    collections: HashMap<String, CollectionInfo>,
}

impl CollectionInfoMap {
    /// Scan every registered collection for fields of type `media`.
    pub fn from_registry(registry: &StorageRegistry) -> Self {
        let collections = registry
            .collections()
            .filter_map(|(name, definition)| {
                let media_fields: Vec<MediaField> = definition
                    .fields_of_type(FieldType::Media)
                    .map(|(field, field_definition)| MediaField {
                        name: field.to_string(),
                        optional: field_definition.optional,
                    })
                    .collect();

                if media_fields.is_empty() {
                    None
                } else {
                    Some((name.to_string(), CollectionInfo { media_fields }))
                }
            })
            .collect();

        Self { collections }
    }

    /// Media fields of a collection, or `None` if it has none.
    pub fn get(&self, collection: &str) -> Option<&CollectionInfo> {
        self.collections.get(collection)
    }

    /// Iterate collections that have media fields.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CollectionInfo)> {
        self.collections
            .iter()
            .map(|(name, info)| (name.as_str(), info))
    }

    /// Number of collections with media fields.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    /// True if no collection has media fields.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
