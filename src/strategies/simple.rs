//! Construction strategies for the two client generations.

use std::sync::{Mutex, PoisonError};

use crate::client::{ApiGeneration, Handler, LegacyClientParams, TracingLibrary};
use crate::domain::Result;
use crate::infrastructure::{BuildContext, BASE_URL_VAR, PUBLIC_KEY_VAR, SECRET_KEY_VAR};
use crate::settings::LangfuseSettings;
use crate::strategies::Strategy;

/// Serializes environment publication with current-generation construction.
static CONSTRUCTION_LOCK: Mutex<()> = Mutex::new(());

/// Builds handlers through the legacy-generation entry point.
///
/// Connection parameters are passed as constructor arguments together with a
/// [`crate::client::TransportConfig`]. Certificate verification is off unless
/// `verify_tls` is set in the settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyStrategy;

impl Strategy for LegacyStrategy {
    fn generation(&self) -> ApiGeneration {
        ApiGeneration::Legacy
    }

    fn build_handler(
        &self,
        library: &dyn TracingLibrary,
        settings: &LangfuseSettings,
        _context: &BuildContext,
    ) -> Result<Handler> {
        let transport = settings.transport();

        if !transport.verify_tls {
            tracing::warn!(host = %settings.url, "TLS certificate verification is disabled for the tracing endpoint");
        }
        tracing::debug!(host = %settings.url, debug = settings.debug, "constructing legacy callback handler");

        library.construct_legacy(LegacyClientParams {
            host: settings.url.clone(),
            public_key: settings.public_key.clone(),
            secret_key: settings.secret_key.clone(),
            debug: settings.debug,
            transport,
        })
    }
}

/// Builds handlers through the current-generation entry point.
///
/// The current-generation client takes no constructor arguments and reads
/// its credentials from the environment, so this strategy writes
/// `LANGFUSE_PUBLIC_KEY`, `LANGFUSE_SECRET_KEY` and `LANGFUSE_BASE_URL` into
/// the context's [`crate::infrastructure::Environment`] first.
///
/// # Side Effects
///
/// With [`BuildContext::process`] the variables are written to the process
/// environment and stay set after the call. Publication and construction run
/// under a process-wide lock, so concurrent builds inside this crate each see
/// their own credentials. Code outside the crate writing the same variables
/// concurrently can still race with construction.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentStrategy;

impl Strategy for CurrentStrategy {
    fn generation(&self) -> ApiGeneration {
        ApiGeneration::Current
    }

    fn build_handler(
        &self,
        library: &dyn TracingLibrary,
        settings: &LangfuseSettings,
        context: &BuildContext,
    ) -> Result<Handler> {
        let _guard = CONSTRUCTION_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let environment = context.environment();
        environment.set_var(PUBLIC_KEY_VAR, &settings.public_key);
        environment.set_var(SECRET_KEY_VAR, &settings.secret_key);
        environment.set_var(BASE_URL_VAR, &settings.url);
        tracing::debug!(host = %settings.url, "published credentials, constructing current callback handler");

        library.construct_current()
    }
}
