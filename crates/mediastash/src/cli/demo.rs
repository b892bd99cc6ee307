//! `demo` handler.

use mediastash::{
    CollectionDefinition, FieldDefinition, FieldType, Filter, MediaStack, MediaStashConfig, Record,
    UnsavedMediaObject, Value,
};
use std::path::Path;

/// Create an object holding `file` in every required media field of
/// `collection`, then find it again and print what came back.
///
/// Without configured collections, a `user` collection with a `picture` media
/// field is used.
pub async fn run_demo(
    config: &MediaStashConfig,
    file: &Path,
    mimetype: &str,
    collection: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = config.clone();
    if config.collections.is_empty() {
        config.collections.insert(
            "user".to_string(),
            CollectionDefinition::new()
                .with_field("picture", FieldDefinition::new(FieldType::Media)),
        );
    }

    let stack = MediaStack::in_memory(&config)?;
    let fields: Vec<String> = stack
        .storage
        .registry()
        .require_collection(collection)?
        .fields
        .iter()
        .filter(|(_, definition)| definition.field_type == FieldType::Media && !definition.optional)
        .map(|(name, _)| name.clone())
        .collect();
    if fields.is_empty() {
        return Err(format!("collection '{}' has no required media field", collection).into());
    }

    let media = UnsavedMediaObject::new(mimetype, tokio::fs::read(file).await?);
    let object: Record = fields
        .iter()
        .map(|field| (field.clone(), Value::from(media.clone())))
        .collect();

    let handle = stack.storage.collection(collection);
    let created = handle.create_object(object).await?;
    let id = created.id().ok_or("created object has no id")?;
    println!("Created {} {}", collection, id);
    for field in &fields {
        if let Some(reference) = created.get(field).and_then(Value::as_text) {
            println!("  {} stored as {}", field, reference);
        }
    }

    let found = handle
        .find_object(Filter::by_id(id))
        .await?
        .ok_or("created object not found")?;
    for field in &fields {
        match found.get(field) {
            Some(Value::MediaInfo(info)) => println!("  {} resolves to {}", field, info.url),
            _ => println!("  {} did not resolve", field),
        }
    }

    Ok(())
}
