//! Public facades that never fail.
//!
//! [`LangfuseConfig`] and [`LangfuseTruncatingConfig`] are the entry points
//! applications call. They resolve settings (explicit, or read from the
//! environment), detect the installed client and build a callback through the
//! matching strategy. Every failure along the way is logged at warn level and
//! turns into "tracing disabled": `None` for a callback, an empty
//! [`crate::client::RunnableConfig`] for a configuration envelope. Tracing
//! never breaks the host application.
//!
//! # Example
//!
//! ```rust
//! use langfuse_runnable_config::factories::LangfuseConfig;
//! use langfuse_runnable_config::infrastructure::{BuildContext, MemoryEnvironment};
//! use langfuse_runnable_config::settings::LangfuseSettings;
//! use std::sync::Arc;
//!
//! // No tracing library available: tracing is disabled, nothing fails.
//! let facade = LangfuseConfig::with_context(BuildContext::without_library(Arc::new(MemoryEnvironment::new())));
//! let settings = LangfuseSettings::new("https://cloud.langfuse.com", "pk-lf-1", "sk-lf-1");
//!
//! assert!(facade.create_callback(Some(settings.clone())).is_none());
//! assert!(!facade.create_config(Some(settings)).is_enabled());
//! ```

pub mod simple;
pub mod truncating;

pub use simple::LangfuseConfig;
pub use truncating::LangfuseTruncatingConfig;

use crate::domain::LangfuseError;

/// What the caller asked for, used in degrade advisories.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Requested {
    Callback,
    Config,
}

pub(crate) fn log_degraded(requested: Requested, error: &LangfuseError) {
    let outcome = match requested {
        Requested::Callback => "callback will not be created",
        Requested::Config => "tracing will be disabled",
    };

    if error.is_dependency_missing() {
        tracing::warn!(error = %error, "Langfuse is not installed, {outcome}");
    } else {
        tracing::warn!(error = %error, "Langfuse is not configured, {outcome}");
    }
}
