//! Process-wide registry of the installed tracing library.
//!
//! The registry plays the role of "the package installed in this process":
//! the application installs its tracing client once at startup, and the
//! version detector locates it through [`InstalledLibrary`]. Components that
//! need a specific library without touching global state use
//! [`FixedLocator`] instead.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::client::TracingLibrary;

static INSTALLED: RwLock<Option<Arc<dyn TracingLibrary>>> = RwLock::new(None);

/// Resolves the tracing library to build handlers with.
pub trait LibraryLocator: Send + Sync + fmt::Debug {
    /// Returns the library, `None` if it cannot be located.
    fn locate(&self) -> Option<Arc<dyn TracingLibrary>>;
}

/// Installs the process-wide tracing library, returning the previous one.
pub fn install_library(library: Arc<dyn TracingLibrary>) -> Option<Arc<dyn TracingLibrary>> {
    tracing::debug!(version = ?library.version_string(), "installing tracing library");
    INSTALLED
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .replace(library)
}

/// Removes the process-wide tracing library, returning it.
pub fn uninstall_library() -> Option<Arc<dyn TracingLibrary>> {
    tracing::debug!("uninstalling tracing library");
    INSTALLED.write().unwrap_or_else(PoisonError::into_inner).take()
}

/// Returns the process-wide tracing library, if installed.
#[must_use]
pub fn installed_library() -> Option<Arc<dyn TracingLibrary>> {
    INSTALLED.read().unwrap_or_else(PoisonError::into_inner).clone()
}

/// Locates the library installed with [`install_library`].
#[derive(Debug, Clone, Copy, Default)]
pub struct InstalledLibrary;

impl LibraryLocator for InstalledLibrary {
    fn locate(&self) -> Option<Arc<dyn TracingLibrary>> {
        installed_library()
    }
}

/// Locates a fixed library, or nothing.
#[derive(Debug, Clone, Default)]
pub struct FixedLocator {
    library: Option<Arc<dyn TracingLibrary>>,
}

impl FixedLocator {
    pub fn new(library: Arc<dyn TracingLibrary>) -> Self {
        Self {
            library: Some(library),
        }
    }

    /// A locator that never finds a library.
    #[must_use]
    pub const fn none() -> Self {
        Self { library: None }
    }
}

impl LibraryLocator for FixedLocator {
    fn locate(&self) -> Option<Arc<dyn TracingLibrary>> {
        self.library.clone()
    }
}
