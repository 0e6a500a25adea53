//! Configuration envelope handed to the host pipeline.

use crate::client::handler::Handler;

/// Callback configuration for a pipeline run.
///
/// A configured envelope holds exactly one callback. A disabled envelope
/// holds none, which turns tracing into a no-op for the run.
#[derive(Debug, Clone, Default)]
pub struct RunnableConfig {
    pub callbacks: Vec<Handler>,
}

impl RunnableConfig {
    /// Envelope with no callbacks.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Envelope holding a single callback.
    #[must_use]
    pub fn with_callback(handler: Handler) -> Self {
        Self {
            callbacks: vec![handler],
        }
    }

    /// Returns `true` if at least one callback is attached.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.callbacks.is_empty()
    }
}
