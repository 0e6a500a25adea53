//! Logging initialization and subscriber setup.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Logging configuration.
///
/// # Fields
///
/// * `level` - Filter directive used when `RUST_LOG` is unset, e.g. `"debug"`
///   or `"langfuse_runnable_config=debug"`. Default: `"info"`
/// * `with_target` - Include the module path in every line
#[derive(Debug, Clone, Default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub with_target: bool,
}

impl LoggingConfig {
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = Some(level.into());
        self
    }

    #[must_use]
    pub const fn with_target(mut self, with_target: bool) -> Self {
        self.with_target = with_target;
        self
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let level = self.level.as_deref().unwrap_or("info");
            EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
        })
    }
}

/// Installs a global `tracing` subscriber writing formatted lines to stderr.
///
/// # Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.level` if set and valid
/// 3. Default: `"info"`
///
/// # Initialization Behavior
///
/// Idempotent: if a global subscriber is already installed (by an earlier
/// call or by the host application) the call does nothing.
///
/// # Example
///
/// ```rust
/// use langfuse_runnable_config::observability::{init_logging, LoggingConfig};
///
/// init_logging(&LoggingConfig::default().with_level("debug"));
///
/// tracing::debug!("logging is now active");
/// ```
pub fn init_logging(config: &LoggingConfig) {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(config.with_target);

    let subscriber = tracing_subscriber::registry()
        .with(config.filter())
        .with(fmt_layer);

    let _ = subscriber.try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        let config = LoggingConfig::default().with_level("warn").with_target(true);
        init_logging(&config);
        init_logging(&config);
    }

    #[test]
    fn test_invalid_level_falls_back() {
        let config = LoggingConfig::default().with_level("not a [valid directive");
        let _filter = config.filter();
    }
}
