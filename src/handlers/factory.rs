//! Detect, select, build.
//!
//! These functions are the fallible core behind the facades in
//! [`crate::factories`]. Each call locates the library once, detects its
//! version, picks a strategy and builds on that same library instance.

use std::sync::Arc;

use crate::client::{Handler, RunnableConfig, TracingLibrary};
use crate::domain::{Result, TruncationLimits};
use crate::infrastructure::BuildContext;
use crate::settings::LangfuseSettings;
use crate::strategies::{select_strategy, select_truncating_strategy, Strategy};
use crate::version::detect_library_version;

type Resolved = (Box<dyn Strategy>, Arc<dyn TracingLibrary>);

fn resolve(context: &BuildContext, limits: Option<TruncationLimits>) -> Result<Resolved> {
    let library = context.library()?;
    let version = detect_library_version(library.as_ref())?;
    let strategy = match limits {
        Some(limits) => select_truncating_strategy(version, limits),
        None => select_strategy(version),
    };
    tracing::debug!(version = %version, generation = %strategy.generation(), "selected construction strategy");
    Ok((strategy, library))
}

/// Builds a bare callback handler for the installed client.
///
/// # Errors
///
/// Returns [`crate::LangfuseError::DependencyMissing`] if no client can be
/// located, or the error raised while constructing the handler.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use langfuse_runnable_config::client::memory::InMemoryLibrary;
/// use langfuse_runnable_config::handlers::create_handler;
/// use langfuse_runnable_config::infrastructure::{BuildContext, MemoryEnvironment};
/// use langfuse_runnable_config::settings::LangfuseSettings;
///
/// let context = BuildContext::with_library(
///     Arc::new(InMemoryLibrary::legacy("2.60.0")),
///     Arc::new(MemoryEnvironment::new()),
/// );
/// let settings = LangfuseSettings::new("https://cloud.langfuse.com", "pk-lf-1", "sk-lf-1");
///
/// let handler = create_handler(&context, &settings)?;
/// # let _ = handler;
/// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
/// ```
pub fn create_handler(context: &BuildContext, settings: &LangfuseSettings) -> Result<Handler> {
    let (strategy, library) = resolve(context, None)?;
    strategy.build_handler(library.as_ref(), settings, context)
}

/// Builds a callback handler that truncates every payload with `limits`.
///
/// # Errors
///
/// Same as [`create_handler`].
pub fn create_truncating_handler(
    context: &BuildContext,
    limits: TruncationLimits,
    settings: &LangfuseSettings,
) -> Result<Handler> {
    let (strategy, library) = resolve(context, Some(limits))?;
    strategy.build_handler(library.as_ref(), settings, context)
}

/// Builds a configuration envelope around [`create_handler`]'s result.
///
/// # Errors
///
/// Same as [`create_handler`].
pub fn create_config(context: &BuildContext, settings: &LangfuseSettings) -> Result<RunnableConfig> {
    let (strategy, library) = resolve(context, None)?;
    strategy.build_config(library.as_ref(), settings, context)
}

/// Builds a configuration envelope around [`create_truncating_handler`]'s result.
///
/// # Errors
///
/// Same as [`create_handler`].
pub fn create_truncating_config(
    context: &BuildContext,
    limits: TruncationLimits,
    settings: &LangfuseSettings,
) -> Result<RunnableConfig> {
    let (strategy, library) = resolve(context, Some(limits))?;
    strategy.build_config(library.as_ref(), settings, context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemoryLibrary;
    use crate::client::ApiGeneration;
    use crate::infrastructure::{LibraryLocator, MemoryEnvironment};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn settings() -> LangfuseSettings {
        LangfuseSettings::new("https://langfuse.example", "pk", "sk")
    }

    #[test]
    fn test_create_handler_without_library() {
        let context = BuildContext::without_library(Arc::new(MemoryEnvironment::new()));
        assert!(create_handler(&context, &settings()).unwrap_err().is_dependency_missing());
    }

    #[test]
    fn test_create_truncating_config_legacy() {
        let library = Arc::new(InMemoryLibrary::legacy("2.1.0"));
        let context = BuildContext::with_library(library.clone(), Arc::new(MemoryEnvironment::new()));

        let config = create_truncating_config(&context, TruncationLimits::default(), &settings()).unwrap();

        assert!(config.is_enabled());
        assert_eq!(library.constructed_handlers().len(), 1);
    }

    /// Hands out a different library on every lookup.
    #[derive(Debug)]
    struct AlternatingLocator {
        lookups: AtomicUsize,
        legacy: Arc<InMemoryLibrary>,
        current: Arc<InMemoryLibrary>,
    }

    impl LibraryLocator for AlternatingLocator {
        fn locate(&self) -> Option<Arc<dyn TracingLibrary>> {
            if self.lookups.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
                Some(self.legacy.clone())
            } else {
                Some(self.current.clone())
            }
        }
    }

    #[test]
    fn test_builds_on_the_detected_library() {
        let env = Arc::new(MemoryEnvironment::new());
        let locator = Arc::new(AlternatingLocator {
            lookups: AtomicUsize::new(0),
            legacy: Arc::new(InMemoryLibrary::legacy("2.60.0")),
            current: Arc::new(InMemoryLibrary::current("3.0.0").with_environment(env.clone())),
        });
        let context = BuildContext::new(locator.clone(), env);

        create_handler(&context, &settings()).unwrap();
        create_truncating_config(&context, TruncationLimits::default(), &settings()).unwrap();

        assert_eq!(locator.lookups.load(Ordering::SeqCst), 2);
        let legacy = locator.legacy.constructed_handlers();
        let current = locator.current.constructed_handlers();
        assert_eq!(legacy.len(), 1);
        assert_eq!(legacy[0].generation(), ApiGeneration::Legacy);
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].generation(), ApiGeneration::Current);
    }
}
