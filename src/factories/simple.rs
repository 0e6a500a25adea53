//! Facade for plain callbacks.

use crate::client::{Handler, RunnableConfig};
use crate::domain::Result;
use crate::factories::{log_degraded, Requested};
use crate::handlers::{create_config, create_handler};
use crate::infrastructure::BuildContext;
use crate::settings::LangfuseSettings;

/// Builds Langfuse callbacks for the installed client version.
#[derive(Debug, Clone, Default)]
pub struct LangfuseConfig {
    context: BuildContext,
}

impl LangfuseConfig {
    /// Facade using the process registry and environment.
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

    /// Builds a callback handler, or `None` if tracing cannot be set up.
    ///
    /// # Parameters
    ///
    /// * `settings` - Connection settings; `None` reads them from the
    ///   context's environment
    #[must_use]
    pub fn create_callback(&self, settings: Option<LangfuseSettings>) -> Option<Handler> {
        self.resolve(settings)
            .and_then(|settings| create_handler(&self.context, &settings))
            .map_err(|e| log_degraded(Requested::Callback, &e))
            .ok()
    }

    /// Builds a configuration envelope, disabled if tracing cannot be set up.
    #[must_use]
    pub fn create_config(&self, settings: Option<LangfuseSettings>) -> RunnableConfig {
        self.resolve(settings)
            .and_then(|settings| create_config(&self.context, &settings))
            .unwrap_or_else(|e| {
                log_degraded(Requested::Config, &e);
                RunnableConfig::disabled()
            })
    }

    fn resolve(&self, settings: Option<LangfuseSettings>) -> Result<LangfuseSettings> {
        settings.map_or_else(|| LangfuseSettings::from_environment(self.context.environment()), Ok)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::memory::InMemoryLibrary;
    use crate::infrastructure::MemoryEnvironment;
    use std::sync::Arc;

    #[test]
    fn test_settings_from_context_environment() {
        let env = Arc::new(MemoryEnvironment::from_vars([
            ("LANGFUSE_URL", "https://langfuse.example"),
            ("LANGFUSE_PUBLIC_KEY", "pk-env"),
            ("LANGFUSE_SECRET_KEY", "sk-env"),
        ]));
        let library = Arc::new(InMemoryLibrary::legacy("2.0.0"));
        let facade = LangfuseConfig::with_context(BuildContext::with_library(library.clone(), env));

        assert!(facade.create_callback(None).is_some());
        assert_eq!(library.last_handler().unwrap().credentials().public_key, "pk-env");
    }

    #[test]
    fn test_missing_settings_degrade() {
        let library = Arc::new(InMemoryLibrary::legacy("2.0.0"));
        let facade = LangfuseConfig::with_context(BuildContext::with_library(
            library.clone(),
            Arc::new(MemoryEnvironment::new()),
        ));

        assert!(facade.create_callback(None).is_none());
        assert!(!facade.create_config(None).is_enabled());
        assert!(library.constructed_handlers().is_empty());
    }
}
