//! Configuration error types.

/// Configuration error with source location.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediastash_error::ConfigError;
    ///
    /// let err = ConfigError::new("Unknown auto_pk_type");
    /// assert!(err.message.contains("auto_pk_type"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}

#[cfg(feature = "config")]
impl From<config::ConfigError> for ConfigError {
    #[track_caller]
    fn from(err: config::ConfigError) -> Self {
        ConfigError::new(err.to_string())
    }
}
