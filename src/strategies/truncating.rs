//! Strategy decorator adding payload truncation.

use crate::client::{ApiGeneration, Handler, TracingLibrary};
use crate::domain::{Result, TruncationLimits};
use crate::handlers::TruncatingHandler;
use crate::infrastructure::BuildContext;
use crate::settings::LangfuseSettings;
use crate::strategies::Strategy;

/// Builds a handler with the inner strategy and wraps it in a
/// [`TruncatingHandler`].
#[derive(Debug)]
pub struct TruncatingStrategy {
    inner: Box<dyn Strategy>,
    limits: TruncationLimits,
}

impl TruncatingStrategy {
    #[must_use]
    pub fn new(inner: Box<dyn Strategy>, limits: TruncationLimits) -> Self {
        Self { inner, limits }
    }

    #[must_use]
    pub const fn limits(&self) -> TruncationLimits {
        self.limits
    }
}

impl Strategy for TruncatingStrategy {
    fn generation(&self) -> ApiGeneration {
        self.inner.generation()
    }

    fn build_handler(
        &self,
        library: &dyn TracingLibrary,
        settings: &LangfuseSettings,
        context: &BuildContext,
    ) -> Result<Handler> {
        let inner = self.inner.build_handler(library, settings, context)?;
        tracing::debug!(
            max_text_length = self.limits.max_text_length(),
            max_container_elements = self.limits.max_container_elements(),
            "wrapping callback handler with truncation"
        );
        Ok(std::sync::Arc::new(TruncatingHandler::new(inner, self.limits)))
    }
}
