//! Top-level error wrapper types.

use crate::{ConfigError, JsonError, MediaError, StorageError};

/// Every error condition mediastash can surface.
///
/// # Examples
///
/// ```
/// use mediastash_error::{ConfigError, MediaStashError};
///
/// let err: MediaStashError = ConfigError::new("bad value").into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MediaStashErrorKind {
    /// Storage layer error (registry, backend, named operations)
    #[from(StorageError)]
    Storage(StorageError),
    /// Media field error (references, payloads, data URIs)
    #[from(MediaError)]
    Media(MediaError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// mediastash error with kind discrimination.
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("MediaStash Error: {}", _0)]
pub struct MediaStashError(Box<MediaStashErrorKind>);

impl MediaStashError {
    /// Create a new error from a kind.
    pub fn new(kind: MediaStashErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaStashErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MediaStashErrorKind
impl<T> From<T> for MediaStashError
where
    T: Into<MediaStashErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for mediastash operations.
pub type MediaStashResult<T> = std::result::Result<T, MediaStashError>;
