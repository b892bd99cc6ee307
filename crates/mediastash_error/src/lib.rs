//! Error types for mediastash.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All constructors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use mediastash_error::{MediaStashResult, StorageError, StorageErrorKind};
//!
//! fn lookup() -> MediaStashResult<()> {
//!     Err(StorageError::new(StorageErrorKind::UnknownCollection("user".to_string())))?
//! }
//!
//! assert!(lookup().is_err());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod json;
mod media;
mod storage;

pub use config::ConfigError;
pub use error::{MediaStashError, MediaStashErrorKind, MediaStashResult};
pub use json::JsonError;
pub use media::{MediaError, MediaErrorKind};
pub use storage::{StorageError, StorageErrorKind};
