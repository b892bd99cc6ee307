//! Media field error types.

/// Media field error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum MediaErrorKind {
    /// A persisted media field does not hold a `media:<id>` reference
    #[display(
        "Found '{}' object with invalid media reference stored in field '{}'",
        collection,
        field
    )]
    InvalidReference {
        /// Collection of the offending record
        collection: String,
        /// Media-typed field holding the bad value
        field: String,
    },
    /// A create payload holds something other than a blob plus mimetype in a media field
    #[display(
        "Expected media object (data + mimetype) in field '{}' of '{}' object",
        field,
        collection
    )]
    InvalidMediaObject {
        /// Collection of the record being created
        collection: String,
        /// Media-typed field holding the bad value
        field: String,
    },
    /// Text is not a base64 data URI
    #[display("Invalid data URI: {}", _0)]
    InvalidDataUri(String),
}

/// Media error with source location tracking.
///
/// # Examples
///
/// ```
/// use mediastash_error::{MediaError, MediaErrorKind};
///
/// let err = MediaError::new(MediaErrorKind::InvalidReference {
///     collection: "user".to_string(),
///     field: "picture".to_string(),
/// });
/// assert!(format!("{}", err).contains("invalid media reference stored in field 'picture'"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Media Error: {} at line {} in {}", kind, line, file)]
pub struct MediaError {
    /// The kind of error that occurred
    pub kind: MediaErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl MediaError {
    /// Create a new MediaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: MediaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MediaErrorKind {
        &self.kind
    }
}
