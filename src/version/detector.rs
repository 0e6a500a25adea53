//! Tracing client version detection.
//!
//! Resolution runs in two tiers, first success wins:
//!
//! 1. **Metadata**: the library's self-reported version string. The leading
//!    component before the first `.` is parsed as the major version. A
//!    malformed string is logged and ignored.
//! 2. **Entry points**: if the current-generation entry point resolves, the version
//!    is reported as 3 regardless of the real number. Otherwise, if the legacy
//!    entry point resolves, it is reported as 2.
//!
//! Detection is not cached. Every construction call re-runs it, so a library
//! swapped in the registry at runtime is picked up immediately.

use std::fmt;

use crate::client::{ApiGeneration, TracingLibrary};
use crate::domain::{LangfuseError, Result};
use crate::infrastructure::LibraryLocator;

/// Major versions the construction strategies were written against.
pub const SUPPORTED_VERSIONS: [u32; 2] = [TracingVersion::LEGACY.0, TracingVersion::CURRENT.0];

/// Major version of the installed tracing client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TracingVersion(u32);

impl TracingVersion {
    /// The legacy-generation major.
    pub const LEGACY: Self = Self(2);

    /// The canonical current-generation major, reported when only entry points are checked.
    pub const CURRENT: Self = Self(3);

    #[must_use]
    pub const fn new(major: u32) -> Self {
        Self(major)
    }

    #[must_use]
    pub const fn major(self) -> u32 {
        self.0
    }

    /// Returns `true` for the explicitly supported majors 2 and 3.
    #[must_use]
    pub const fn is_supported(self) -> bool {
        self.0 == Self::LEGACY.0 || self.0 == Self::CURRENT.0
    }

    /// API generation handling this version.
    ///
    /// Only major 2 is legacy. Every other major, including untested future
    /// ones, is handled as current.
    #[must_use]
    pub const fn generation(self) -> ApiGeneration {
        if self.0 == Self::LEGACY.0 {
            ApiGeneration::Legacy
        } else {
            ApiGeneration::Current
        }
    }
}

impl fmt::Display for TracingVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

/// Locates the tracing library and detects its major version.
///
/// # Errors
///
/// Returns [`LangfuseError::DependencyMissing`] if no library can be located,
/// or if the located library neither reports a parseable version nor exposes
/// any entry point.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use langfuse_runnable_config::client::memory::InMemoryLibrary;
/// use langfuse_runnable_config::infrastructure::FixedLocator;
/// use langfuse_runnable_config::version::detect_version;
///
/// let locator = FixedLocator::new(Arc::new(InMemoryLibrary::current("3.1.0")));
/// assert_eq!(detect_version(&locator)?.major(), 3);
///
/// assert!(detect_version(&FixedLocator::none()).is_err());
/// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
/// ```
pub fn detect_version(locator: &dyn LibraryLocator) -> Result<TracingVersion> {
    let library = locator.locate().ok_or_else(|| {
        LangfuseError::DependencyMissing("Langfuse tracing library is not installed".to_string())
    })?;
    detect_library_version(library.as_ref())
}

/// Detects the major version of a given library.
///
/// # Errors
///
/// Returns [`LangfuseError::DependencyMissing`] if neither tier resolves.
pub fn detect_library_version(library: &dyn TracingLibrary) -> Result<TracingVersion> {
    if let Some(version) = library.version_string().as_deref().and_then(parse_major) {
        tracing::debug!(version = %version, "detected tracing library version from metadata");
        warn_if_unsupported(version);
        return Ok(version);
    }

    if library.provides(ApiGeneration::Current) {
        tracing::debug!("current-generation entry point found");
        return Ok(TracingVersion::CURRENT);
    }

    if library.provides(ApiGeneration::Legacy) {
        tracing::debug!("legacy-generation entry point found");
        return Ok(TracingVersion::LEGACY);
    }

    Err(LangfuseError::DependencyMissing(
        "Langfuse tracing library exposes no callback handler entry point".to_string(),
    ))
}

fn parse_major(raw: &str) -> Option<TracingVersion> {
    let leading = raw.trim().split('.').next().unwrap_or_default();
    match leading.parse::<u32>() {
        Ok(major) => Some(TracingVersion(major)),
        Err(e) => {
            tracing::debug!(raw_version = %raw, error = %e, "unparseable version metadata, probing entry points");
            None
        }
    }
}

fn warn_if_unsupported(version: TracingVersion) {
    if version.is_supported() {
        return;
    }

    if version > TracingVersion::CURRENT {
        tracing::warn!(
            version = version.major(),
            supported = ?SUPPORTED_VERSIONS,
            "Langfuse version is newer than tested, falling back to current-generation handling"
        );
    } else {
        tracing::warn!(
            version = version.major(),
            supported = ?SUPPORTED_VERSIONS,
            "Langfuse version is outdated and not supported"
        );
    }
}
