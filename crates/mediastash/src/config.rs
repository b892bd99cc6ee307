//! Configuration loading.
//!
//! Sources, later ones winning:
//! - Bundled defaults (include_str! from mediastash.toml)
//! - `~/.config/mediastash/mediastash.toml`
//! - `./mediastash.toml`

use config::{Config, File, FileFormat};
use mediastash_error::{ConfigError, MediaStashResult};
use mediastash_interface::{CollectionDefinition, StorageRegistry};
use mediastash_storage::{DatabaseMediaStore, MediaStoreConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

const DEFAULT_CONFIG: &str = include_str!("../../../mediastash.toml");

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_level")]
    pub level: String,
    /// Emit JSON lines instead of human-readable text
    #[serde(default)]
    pub json: bool,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

/// Top-level mediastash configuration.
///
/// ```toml
/// [media]
/// collection = "mediaObject"
/// auto_pk_type = "int"
///
/// [logging]
/// level = "info"
/// json = false
///
/// [collections.user.fields]
/// picture = { type = "media" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaStashConfig {
    /// Media store settings
    #[serde(default)]
    pub media: MediaStoreConfig,
    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Application collections
    #[serde(default)]
    pub collections: BTreeMap<String, CollectionDefinition>,
}

impl MediaStashConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Fails if a present source cannot be read or the merged result does not
    /// deserialize.
    pub fn load() -> MediaStashResult<Self> {
        debug!("Loading configuration with precedence: current dir > home dir > bundled defaults");

        let mut builder =
            Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml));

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/mediastash/mediastash.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("mediastash").required(false));

        Self::finish(builder.build().map_err(ConfigError::from)?)
    }

    /// Load configuration from a single file, on top of the bundled defaults.
    ///
    /// # Errors
    ///
    /// Fails if the file is missing or malformed.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> MediaStashResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading configuration from file");

        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .add_source(File::from(path))
            .build()
            .map_err(ConfigError::from)?;

        Self::finish(config)
    }

    /// The bundled defaults alone.
    ///
    /// # Errors
    ///
    /// Fails only if the bundled file is malformed.
    pub fn bundled() -> MediaStashResult<Self> {
        let config = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
            .build()
            .map_err(ConfigError::from)?;

        Self::finish(config)
    }

    fn finish(config: Config) -> MediaStashResult<Self> {
        config
            .try_deserialize()
            .map_err(|e| ConfigError::from(e).into())
    }

    /// Registry holding the configured collections and the media object collection.
    ///
    /// # Errors
    ///
    /// Fails if a configured collection uses the media collection's name.
    pub fn registry(&self) -> MediaStashResult<StorageRegistry> {
        let mut registry = StorageRegistry::new();
        registry.register_collections(self.collections.clone())?;
        DatabaseMediaStore::register_collections(&mut registry, &self.media)?;
        Ok(registry)
    }
}
