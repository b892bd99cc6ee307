//! Media payload shapes carried in record values.

use serde::{Deserialize, Serialize};

/// A blob waiting to be handed to a media store.
///
/// This is the write-time value of a media-typed field.
///
/// # Examples
///
/// ```
/// use mediastash_interface::UnsavedMediaObject;
///
/// let picture = UnsavedMediaObject::new("text/plain", b"test".to_vec());
/// assert_eq!(picture.mimetype(), "text/plain");
/// assert_eq!(picture.data(), b"test");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnsavedMediaObject {
    data: Vec<u8>,
    mimetype: String,
}

impl UnsavedMediaObject {
    /// Create a media object from a MIME type and its bytes.
    pub fn new(mimetype: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            mimetype: mimetype.into(),
        }
    }

    /// Raw content.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Declared MIME type.
    pub fn mimetype(&self) -> &str {
        &self.mimetype
    }
}

/// Access information for a stored media object.
///
/// Returned on read in place of the stored reference. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaObjectInfo {
    /// Self-describing locator for the content (a `data:` URI for in-database storage)
    pub url: String,
}

impl MediaObjectInfo {
    /// Wrap a locator.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}
