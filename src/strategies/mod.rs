//! Version-dispatched handler construction.
//!
//! Exactly two construction paths exist. Major version 2 is built by
//! [`LegacyStrategy`]; every other major, including untested future ones, is
//! built by [`CurrentStrategy`]. The current-generation construction API is
//! assumed stable across all majors from 3 on.
//!
//! ```text
//! TracingVersion ──select_strategy──▶ LegacyStrategy | CurrentStrategy
//!                                              │
//!            select_truncating_strategy ──▶ TruncatingStrategy(inner)
//! ```

pub mod simple;
pub mod truncating;

pub use simple::{CurrentStrategy, LegacyStrategy};
pub use truncating::TruncatingStrategy;

use std::fmt;

use crate::client::{ApiGeneration, Handler, RunnableConfig, TracingLibrary};
use crate::domain::{Result, TruncationLimits};
use crate::infrastructure::BuildContext;
use crate::settings::LangfuseSettings;
use crate::version::TracingVersion;

/// A way of constructing a callback handler.
///
/// Strategies are stateless apart from their configuration and are built
/// fresh for each construction call.
pub trait Strategy: Send + Sync + fmt::Debug {
    /// Client generation this strategy constructs for.
    fn generation(&self) -> ApiGeneration;

    /// Builds a handler on `library` from connection settings.
    ///
    /// `library` is the instance version detection ran against. The context
    /// only supplies the environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LangfuseError::DependencyMissing`] if the library
    /// lacks the entry point, or the client's construction error.
    fn build_handler(
        &self,
        library: &dyn TracingLibrary,
        settings: &LangfuseSettings,
        context: &BuildContext,
    ) -> Result<Handler>;

    /// Builds a configuration envelope holding a single handler.
    ///
    /// # Errors
    ///
    /// Same as [`Strategy::build_handler`].
    fn build_config(
        &self,
        library: &dyn TracingLibrary,
        settings: &LangfuseSettings,
        context: &BuildContext,
    ) -> Result<RunnableConfig> {
        self.build_handler(library, settings, context)
            .map(RunnableConfig::with_callback)
    }
}

/// Selects the construction strategy for a detected version.
///
/// # Example
///
/// ```rust
/// use langfuse_runnable_config::client::ApiGeneration;
/// use langfuse_runnable_config::strategies::select_strategy;
/// use langfuse_runnable_config::version::TracingVersion;
///
/// assert_eq!(select_strategy(TracingVersion::new(2)).generation(), ApiGeneration::Legacy);
/// assert_eq!(select_strategy(TracingVersion::new(99)).generation(), ApiGeneration::Current);
/// ```
#[must_use]
pub fn select_strategy(version: TracingVersion) -> Box<dyn Strategy> {
    match version.generation() {
        ApiGeneration::Legacy => Box::new(LegacyStrategy),
        ApiGeneration::Current => Box::new(CurrentStrategy),
    }
}

/// Selects the construction strategy for a version and adds truncation.
#[must_use]
pub fn select_truncating_strategy(version: TracingVersion, limits: TruncationLimits) -> Box<dyn Strategy> {
    Box::new(TruncatingStrategy::new(select_strategy(version), limits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_strategy_buckets() {
        assert_eq!(select_strategy(TracingVersion::new(2)).generation(), ApiGeneration::Legacy);
        for major in [3, 4, 99] {
            assert_eq!(
                select_strategy(TracingVersion::new(major)).generation(),
                ApiGeneration::Current,
                "major {major}"
            );
        }
    }

    #[test]
    fn test_select_truncating_strategy_keeps_generation() {
        let strategy = select_truncating_strategy(TracingVersion::LEGACY, TruncationLimits::default());
        assert_eq!(strategy.generation(), ApiGeneration::Legacy);
    }

    #[test]
    fn test_outdated_major_uses_current() {
        assert_eq!(select_strategy(TracingVersion::new(1)).generation(), ApiGeneration::Current);
    }
}
