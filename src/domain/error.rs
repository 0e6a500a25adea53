//! Error types for Langfuse callback construction.
//!
//! This module defines the centralized error type [`LangfuseError`] and a type alias
//! [`Result`] used throughout the crate. All errors are implemented using the
//! `thiserror` crate for automatic `Error` trait implementation.
//!
//! Note that the public facades in [`crate::factories`] never surface these errors:
//! they log them and degrade to a disabled callback instead. The error type is
//! visible to callers who use the lower layers (strategies, handler factory,
//! settings loaders) directly.

use thiserror::Error;

/// The main error type for Langfuse configuration operations.
///
/// # Examples
///
/// ```
/// use langfuse_runnable_config::LangfuseError;
///
/// let err = LangfuseError::DependencyMissing("no tracing library installed".to_string());
/// assert!(err.is_dependency_missing());
/// assert_eq!(err.to_string(), "Dependency missing: no tracing library installed");
/// ```
#[derive(Debug, Error)]
pub enum LangfuseError {
    /// The tracing client library could not be located.
    ///
    /// Raised by the version detector when neither the metadata tier nor the
    /// entry-point check finds the library, and by a library asked to construct
    /// a handler through an entry point it does not provide.
    #[error("Dependency missing: {0}")]
    DependencyMissing(String),

    /// Settings are invalid or missing.
    ///
    /// Occurs when required connection parameters are absent, when a value
    /// cannot be parsed, or when truncation limits are zero.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The tracing client rejected a construction request or a lifecycle event.
    #[error("Handler error: {0}")]
    Handler(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations, e.g. reading a
    /// settings file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Converting a value through `serde_json` failed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LangfuseError {
    /// Returns `true` for the "library not installed" class of failures.
    ///
    /// The facades use this to pick between the "not installed" and
    /// "not configured" advisories.
    #[must_use]
    pub const fn is_dependency_missing(&self) -> bool {
        matches!(self, Self::DependencyMissing(_))
    }
}

/// A specialized `Result` type for Langfuse configuration operations.
pub type Result<T> = std::result::Result<T, LangfuseError>;
