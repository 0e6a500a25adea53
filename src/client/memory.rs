//! In-memory tracing client.
//!
//! [`InMemoryLibrary`] stands in for an installed tracing client: its version
//! string and available entry points are configurable, and every handler it
//! constructs is a [`RecordingHandler`] that keeps the lifecycle events it
//! receives. It is used by the test suite and is handy for local development
//! when no tracing backend is reachable.
//!
//! Like a real current-generation client, the current entry point reads its
//! credentials from an [`Environment`] at construction time.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use langfuse_runnable_config::client::memory::InMemoryLibrary;
//! use langfuse_runnable_config::client::{ApiGeneration, TracingLibrary};
//!
//! let library = InMemoryLibrary::new()
//!     .with_version("2.60.1")
//!     .with_legacy_entry_point();
//!
//! assert_eq!(library.version_string().as_deref(), Some("2.60.1"));
//! assert!(library.provides(ApiGeneration::Legacy));
//! assert!(!library.provides(ApiGeneration::Current));
//! ```

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use std::sync::{Arc, Mutex, PoisonError};

use crate::client::handler::{CallbackHandler, Handler, RunContext};
use crate::client::library::{ApiGeneration, LegacyClientParams, TracingLibrary, TransportConfig};
use crate::domain::{Document, LangfuseError, Payload, Result};
use crate::infrastructure::env::{Environment, ProcessEnvironment, BASE_URL_VAR, PUBLIC_KEY_VAR, SECRET_KEY_VAR};

/// Credentials a handler was constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    /// Endpoint URL, `None` when the client falls back to its built-in default.
    pub host: Option<String>,
    pub public_key: String,
    pub secret_key: String,
}

/// A lifecycle notification as received by a [`RecordingHandler`].
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    ChainStart { serialized: Payload, inputs: Payload },
    ChainEnd { outputs: Payload },
    RetrieverStart { serialized: Payload, query: String },
    RetrieverEnd { documents: Vec<Document> },
}

/// A recorded lifecycle notification.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub event: LifecycleEvent,
    pub run: RunContext,
    /// Whether the notification arrived through an `*_async` method.
    pub asynchronous: bool,
    pub recorded_at: DateTime<Utc>,
}

/// Handler that records every notification it receives.
#[derive(Debug)]
pub struct RecordingHandler {
    generation: ApiGeneration,
    credentials: ClientCredentials,
    debug: bool,
    transport: Option<TransportConfig>,
    events: Mutex<Vec<RecordedEvent>>,
}

impl RecordingHandler {
    /// Creates a handler for the given generation and credentials.
    #[must_use]
    pub fn new(generation: ApiGeneration, credentials: ClientCredentials) -> Self {
        Self {
            generation,
            credentials,
            debug: false,
            transport: None,
            events: Mutex::new(Vec::new()),
        }
    }

    fn from_legacy_params(params: LegacyClientParams) -> Self {
        Self {
            generation: ApiGeneration::Legacy,
            credentials: ClientCredentials {
                host: Some(params.host),
                public_key: params.public_key,
                secret_key: params.secret_key,
            },
            debug: params.debug,
            transport: Some(params.transport),
            events: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn generation(&self) -> ApiGeneration {
        self.generation
    }

    #[must_use]
    pub const fn credentials(&self) -> &ClientCredentials {
        &self.credentials
    }

    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }

    /// Transport passed at construction, `None` for current-generation handlers.
    #[must_use]
    pub const fn transport(&self) -> Option<TransportConfig> {
        self.transport
    }

    /// Snapshot of the recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> Vec<RecordedEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn record(&self, event: LifecycleEvent, run: &RunContext, asynchronous: bool) -> Result<()> {
        tracing::trace!(run_id = %run.run_id, asynchronous, "recording lifecycle event");
        self.events
            .lock()
            .map_err(|e| LangfuseError::Handler(format!("event log poisoned: {e}")))?
            .push(RecordedEvent {
                event,
                run: run.clone(),
                asynchronous,
                recorded_at: Utc::now(),
            });
        Ok(())
    }
}

impl CallbackHandler for RecordingHandler {
    fn on_chain_start(&self, serialized: &Payload, inputs: Payload, run: &RunContext) -> Result<()> {
        let event = LifecycleEvent::ChainStart {
            serialized: serialized.clone(),
            inputs,
        };
        self.record(event, run, false)
    }

    fn on_chain_end(&self, outputs: Payload, run: &RunContext) -> Result<()> {
        self.record(LifecycleEvent::ChainEnd { outputs }, run, false)
    }

    fn on_retriever_start(&self, serialized: &Payload, query: String, run: &RunContext) -> Result<()> {
        let event = LifecycleEvent::RetrieverStart {
            serialized: serialized.clone(),
            query,
        };
        self.record(event, run, false)
    }

    fn on_retriever_end(&self, documents: Vec<Document>, run: &RunContext) -> Result<()> {
        self.record(LifecycleEvent::RetrieverEnd { documents }, run, false)
    }

    fn on_chain_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        inputs: Payload,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let event = LifecycleEvent::ChainStart {
                serialized: serialized.clone(),
                inputs,
            };
            self.record(event, run, true)
        })
    }

    fn on_chain_end_async<'a>(&'a self, outputs: Payload, run: &'a RunContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.record(LifecycleEvent::ChainEnd { outputs }, run, true) })
    }

    fn on_retriever_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        query: String,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move {
            let event = LifecycleEvent::RetrieverStart {
                serialized: serialized.clone(),
                query,
            };
            self.record(event, run, true)
        })
    }

    fn on_retriever_end_async<'a>(
        &'a self,
        documents: Vec<Document>,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.record(LifecycleEvent::RetrieverEnd { documents }, run, true) })
    }
}

/// Configurable stand-in for an installed tracing client.
#[derive(Debug)]
pub struct InMemoryLibrary {
    version: Option<String>,
    legacy: bool,
    current: bool,
    construction_error: Option<String>,
    environment: Arc<dyn Environment>,
    constructed: Mutex<Vec<Arc<RecordingHandler>>>,
}

impl Default for InMemoryLibrary {
    fn default() -> Self {
        Self {
            version: None,
            legacy: false,
            current: false,
            construction_error: None,
            environment: Arc::new(ProcessEnvironment),
            constructed: Mutex::new(Vec::new()),
        }
    }
}

impl InMemoryLibrary {
    /// A library with no version metadata and no entry points.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A legacy-generation library reporting `version`.
    #[must_use]
    pub fn legacy(version: &str) -> Self {
        Self::new().with_version(version).with_legacy_entry_point()
    }

    /// A current-generation library reporting `version`.
    #[must_use]
    pub fn current(version: &str) -> Self {
        Self::new().with_version(version).with_current_entry_point()
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub const fn with_legacy_entry_point(mut self) -> Self {
        self.legacy = true;
        self
    }

    #[must_use]
    pub const fn with_current_entry_point(mut self) -> Self {
        self.current = true;
        self
    }

    /// Environment the current entry point reads credentials from.
    #[must_use]
    pub fn with_environment(mut self, environment: Arc<dyn Environment>) -> Self {
        self.environment = environment;
        self
    }

    /// Makes every construction attempt fail with a handler error.
    #[must_use]
    pub fn failing_construction(mut self, message: impl Into<String>) -> Self {
        self.construction_error = Some(message.into());
        self
    }

    /// Handlers constructed so far, oldest first.
    #[must_use]
    pub fn constructed_handlers(&self) -> Vec<Arc<RecordingHandler>> {
        self.constructed.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// The most recently constructed handler.
    #[must_use]
    pub fn last_handler(&self) -> Option<Arc<RecordingHandler>> {
        self.constructed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    fn check_construction(&self, generation: ApiGeneration, available: bool) -> Result<()> {
        if !available {
            return Err(LangfuseError::DependencyMissing(format!(
                "{generation} entry point is not available"
            )));
        }
        if let Some(message) = &self.construction_error {
            return Err(LangfuseError::Handler(message.clone()));
        }
        Ok(())
    }

    fn register(&self, handler: RecordingHandler) -> Handler {
        let handler = Arc::new(handler);
        self.constructed
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::clone(&handler));
        handler
    }
}

impl TracingLibrary for InMemoryLibrary {
    fn version_string(&self) -> Option<String> {
        self.version.clone()
    }

    fn provides(&self, generation: ApiGeneration) -> bool {
        match generation {
            ApiGeneration::Legacy => self.legacy,
            ApiGeneration::Current => self.current,
        }
    }

    fn construct_legacy(&self, params: LegacyClientParams) -> Result<Handler> {
        self.check_construction(ApiGeneration::Legacy, self.legacy)?;
        Ok(self.register(RecordingHandler::from_legacy_params(params)))
    }

    fn construct_current(&self) -> Result<Handler> {
        self.check_construction(ApiGeneration::Current, self.current)?;

        let required = |key: &str| {
            self.environment
                .var(key)
                .ok_or_else(|| LangfuseError::Config(format!("{key} is not set")))
        };
        let credentials = ClientCredentials {
            host: self.environment.var(BASE_URL_VAR),
            public_key: required(PUBLIC_KEY_VAR)?,
            secret_key: required(SECRET_KEY_VAR)?,
        };

        Ok(self.register(RecordingHandler::new(ApiGeneration::Current, credentials)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryEnvironment;

    #[test]
    fn test_current_entry_point_reads_environment() {
        let env = Arc::new(MemoryEnvironment::from_vars([
            (PUBLIC_KEY_VAR, "pk-env"),
            (SECRET_KEY_VAR, "sk-env"),
            (BASE_URL_VAR, "https://env.example"),
        ]));
        let library = InMemoryLibrary::current("3.0.0").with_environment(env);

        library.construct_current().unwrap();

        let handler = library.last_handler().unwrap();
        assert_eq!(handler.generation(), ApiGeneration::Current);
        assert_eq!(
            handler.credentials(),
            &ClientCredentials {
                host: Some("https://env.example".to_string()),
                public_key: "pk-env".to_string(),
                secret_key: "sk-env".to_string(),
            }
        );
    }

    #[test]
    fn test_current_entry_point_requires_keys() {
        let library = InMemoryLibrary::current("3.0.0").with_environment(Arc::new(MemoryEnvironment::new()));
        assert!(matches!(library.construct_current(), Err(LangfuseError::Config(_))));
    }

    #[test]
    fn test_missing_entry_point_is_dependency_error() {
        let library = InMemoryLibrary::legacy("2.1.0");
        let err = library.construct_current().unwrap_err();
        assert!(err.is_dependency_missing());
    }

    #[test]
    fn test_recording_handler_records_in_order() {
        let handler = RecordingHandler::new(
            ApiGeneration::Current,
            ClientCredentials {
                host: None,
                public_key: "pk".to_string(),
                secret_key: "sk".to_string(),
            },
        );
        let run = RunContext::new("run-1");

        handler.on_chain_start(&Payload::Null, Payload::from("in"), &run).unwrap();
        handler.on_chain_end(Payload::from("out"), &run).unwrap();

        let events = handler.events();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0].event, LifecycleEvent::ChainStart { .. }));
        assert_eq!(events[1].event, LifecycleEvent::ChainEnd { outputs: Payload::from("out") });
        assert!(events.iter().all(|e| !e.asynchronous));
    }
}
