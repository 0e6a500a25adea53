//! Collaborators needed to build a handler.

use std::sync::Arc;

use crate::client::TracingLibrary;
use crate::domain::{LangfuseError, Result};
use crate::infrastructure::env::{Environment, ProcessEnvironment};
use crate::infrastructure::registry::{FixedLocator, InstalledLibrary, LibraryLocator};

/// Where to find the tracing library and which environment to read and write.
///
/// [`BuildContext::process`] (also the `Default`) uses the library installed
/// in the process registry and the real process environment. Tests build a
/// context around an in-memory library and a [`crate::infrastructure::MemoryEnvironment`].
#[derive(Debug, Clone)]
pub struct BuildContext {
    locator: Arc<dyn LibraryLocator>,
    environment: Arc<dyn Environment>,
}

impl BuildContext {
    pub fn new(locator: Arc<dyn LibraryLocator>, environment: Arc<dyn Environment>) -> Self {
        Self { locator, environment }
    }

    /// Context backed by the process registry and process environment.
    #[must_use]
    pub fn process() -> Self {
        Self::new(Arc::new(InstalledLibrary), Arc::new(ProcessEnvironment))
    }

    /// Context with a fixed library.
    pub fn with_library(library: Arc<dyn TracingLibrary>, environment: Arc<dyn Environment>) -> Self {
        Self::new(Arc::new(FixedLocator::new(library)), environment)
    }

    /// Context in which no library can be located.
    pub fn without_library(environment: Arc<dyn Environment>) -> Self {
        Self::new(Arc::new(FixedLocator::none()), environment)
    }

    #[must_use]
    pub fn locator(&self) -> &dyn LibraryLocator {
        self.locator.as_ref()
    }

    #[must_use]
    pub fn environment(&self) -> &dyn Environment {
        self.environment.as_ref()
    }

    /// Locates the tracing library.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::DependencyMissing`] if no library is found.
    pub fn library(&self) -> Result<Arc<dyn TracingLibrary>> {
        self.locator
            .locate()
            .ok_or_else(|| LangfuseError::DependencyMissing("Langfuse tracing library is not installed".to_string()))
    }
}

impl Default for BuildContext {
    fn default() -> Self {
        Self::process()
    }
}
