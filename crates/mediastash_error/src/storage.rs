//! Storage layer error types.

/// Kinds of storage errors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum StorageErrorKind {
    /// Operation targets a collection missing from the registry
    #[display("Unknown collection: {}", _0)]
    UnknownCollection(String),
    /// Collection registered twice
    #[display("Collection already registered: {}", _0)]
    DuplicateCollection(String),
    /// Named operation not defined by a storage module
    #[display("Unknown operation: {}", _0)]
    UnknownOperation(String),
    /// Operation arguments do not fit the operation
    #[display("Invalid operation arguments: {}", _0)]
    InvalidArguments(String),
    /// Operation produced a result of the wrong shape
    #[display("Unexpected operation result: {}", _0)]
    UnexpectedResult(String),
    /// Backend failed to execute an operation
    #[display("Backend failure: {}", _0)]
    Backend(String),
}

/// Storage error with location tracking.
///
/// # Examples
///
/// ```
/// use mediastash_error::{StorageError, StorageErrorKind};
///
/// let err = StorageError::new(StorageErrorKind::UnknownCollection("user".to_string()));
/// assert!(format!("{}", err).contains("Unknown collection: user"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Storage Error: {} at line {} in {}", kind, line, file)]
pub struct StorageError {
    /// The kind of error that occurred
    pub kind: StorageErrorKind,
    /// Line number where error was created
    pub line: u32,
    /// File where error was created
    pub file: &'static str,
}

impl StorageError {
    /// Create a new storage error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: StorageErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
