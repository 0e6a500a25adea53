//! Facade for truncating callbacks.

use crate::client::{Handler, RunnableConfig};
use crate::domain::{Result, TruncationLimits};
use crate::factories::{log_degraded, Requested};
use crate::handlers::{create_truncating_config, create_truncating_handler};
use crate::infrastructure::BuildContext;
use crate::settings::{LangfuseSettings, LangfuseTruncatingSettings};

/// Builds Langfuse callbacks that truncate payloads before tracing them.
///
/// Behaves like [`crate::factories::LangfuseConfig`], except that the built
/// handler is wrapped in a [`crate::handlers::TruncatingHandler`] using the
/// bounds from [`LangfuseTruncatingSettings`].
#[derive(Debug, Clone, Default)]
pub struct LangfuseTruncatingConfig {
    context: BuildContext,
}

impl LangfuseTruncatingConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_context(context: BuildContext) -> Self {
        Self { context }
    }

    #[must_use]
    pub const fn context(&self) -> &BuildContext {
        &self.context
    }

    /// Builds a truncating callback handler, or `None` if tracing cannot be
    /// set up.
    #[must_use]
    pub fn create_callback(&self, settings: Option<LangfuseTruncatingSettings>) -> Option<Handler> {
        self.resolve(settings)
            .and_then(|(connection, limits)| create_truncating_handler(&self.context, limits, &connection))
            .map_err(|e| log_degraded(Requested::Callback, &e))
            .ok()
    }

    /// Builds a configuration envelope, disabled if tracing cannot be set up.
    #[must_use]
    pub fn create_config(&self, settings: Option<LangfuseTruncatingSettings>) -> RunnableConfig {
        self.resolve(settings)
            .and_then(|(connection, limits)| create_truncating_config(&self.context, limits, &connection))
            .unwrap_or_else(|e| {
                log_degraded(Requested::Config, &e);
                RunnableConfig::disabled()
            })
    }

    fn resolve(
        &self,
        settings: Option<LangfuseTruncatingSettings>,
    ) -> Result<(LangfuseSettings, TruncationLimits)> {
        let settings = settings.map_or_else(
            || LangfuseTruncatingSettings::from_environment(self.context.environment()),
            Ok,
        )?;
        let limits = settings.limits()?;
        Ok((settings.connection, limits))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemoryLibrary;
    use crate::infrastructure::MemoryEnvironment;
    use std::sync::Arc;

    #[test]
    fn test_zero_limits_degrade() {
        let library = Arc::new(InMemoryLibrary::legacy("2.0.0"));
        let facade = LangfuseTruncatingConfig::with_context(BuildContext::with_library(
            library.clone(),
            Arc::new(MemoryEnvironment::new()),
        ));
        let settings = LangfuseTruncatingSettings::new(LangfuseSettings::new("https://a", "pk", "sk"))
            .with_limits(0, 10);

        assert!(facade.create_callback(Some(settings)).is_none());
        assert!(library.constructed_handlers().is_empty());
    }
}
