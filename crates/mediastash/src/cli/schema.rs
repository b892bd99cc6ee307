//! `schema` handler.

use mediastash::{CollectionInfoMap, JsonError, MediaStashConfig};

/// Print the collection to media fields map derived from `config` as JSON.
pub fn print_schema(config: &MediaStashConfig) -> Result<(), Box<dyn std::error::Error>> {
    let registry = config.registry()?;
    let info = CollectionInfoMap::from_registry(&registry);

    let mut collections: Vec<_> = info.iter().collect();
    collections.sort_by_key(|(name, _)| *name);

    let map: serde_json::Map<String, serde_json::Value> = collections
        .into_iter()
        .map(|(name, collection)| {
            let fields = collection
                .media_fields()
                .iter()
                .map(|field| {
                    serde_json::json!({
                        "field": field.name(),
                        "optional": field.is_optional(),
                    })
                })
                .collect();
            (name.to_string(), serde_json::Value::Array(fields))
        })
        .collect();

    let json = serde_json::to_string_pretty(&map).map_err(JsonError::from)?;
    println!("{}", json);
    Ok(())
}
