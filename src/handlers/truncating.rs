//! Handler decorator that truncates payloads before forwarding them.

use futures_util::future::BoxFuture;

use crate::client::{CallbackHandler, Handler, RunContext};
use crate::domain::{Document, Payload, Result, TruncationLimits};
use crate::serializers::{serialize_documents, truncate_text};

/// Wraps a [`Handler`] and bounds every payload passed to it.
///
/// Each lifecycle method runs its payload argument through the truncation
/// engine and forwards the result to the inner method of the same name.
/// Asynchronous methods forward to the inner asynchronous methods. The
/// `serialized` component description and the [`RunContext`] are passed
/// through untouched.
///
/// | Method                 | Truncated argument                       |
/// |------------------------|------------------------------------------|
/// | `on_chain_start`       | `inputs`                                 |
/// | `on_chain_end`         | `outputs`                                |
/// | `on_retriever_start`   | `query`                                  |
/// | `on_retriever_end`     | `documents` (count and each content)     |
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
/// use langfuse_runnable_config::client::memory::{ClientCredentials, LifecycleEvent, RecordingHandler};
/// use langfuse_runnable_config::client::{ApiGeneration, CallbackHandler, RunContext};
/// use langfuse_runnable_config::handlers::TruncatingHandler;
/// use langfuse_runnable_config::{Payload, TruncationLimits};
///
/// let inner = Arc::new(RecordingHandler::new(
///     ApiGeneration::Current,
///     ClientCredentials { host: None, public_key: "pk".into(), secret_key: "sk".into() },
/// ));
/// let handler = TruncatingHandler::new(inner.clone(), TruncationLimits::new(5, 10)?);
///
/// handler.on_chain_end(Payload::from("truncate me"), &RunContext::new("run-1"))?;
///
/// assert_eq!(
///     inner.events()[0].event,
///     LifecycleEvent::ChainEnd { outputs: Payload::from("trunc...") },
/// );
/// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
/// ```
#[derive(Debug, Clone)]
pub struct TruncatingHandler {
    inner: Handler,
    limits: TruncationLimits,
}

impl TruncatingHandler {
    #[must_use]
    pub fn new(inner: Handler, limits: TruncationLimits) -> Self {
        Self { inner, limits }
    }

    #[must_use]
    pub fn inner(&self) -> &Handler {
        &self.inner
    }

    #[must_use]
    pub const fn limits(&self) -> TruncationLimits {
        self.limits
    }

    fn bound(&self, value: &Payload, event: &'static str) -> Payload {
        tracing::trace!(event, payload_type = value.type_name(), "truncating payload");
        self.limits.apply(value)
    }

    fn bound_query(&self, query: &str) -> String {
        truncate_text(query, self.limits.max_text_length())
    }
}

impl CallbackHandler for TruncatingHandler {
    fn on_chain_start(&self, serialized: &Payload, inputs: Payload, run: &RunContext) -> Result<()> {
        self.inner.on_chain_start(serialized, self.bound(&inputs, "chain_start"), run)
    }

    fn on_chain_end(&self, outputs: Payload, run: &RunContext) -> Result<()> {
        self.inner.on_chain_end(self.bound(&outputs, "chain_end"), run)
    }

    fn on_retriever_start(&self, serialized: &Payload, query: String, run: &RunContext) -> Result<()> {
        self.inner.on_retriever_start(serialized, self.bound_query(&query), run)
    }

    fn on_retriever_end(&self, documents: Vec<Document>, run: &RunContext) -> Result<()> {
        self.inner
            .on_retriever_end(serialize_documents(&documents, self.limits), run)
    }

    fn on_chain_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        inputs: Payload,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        self.inner
            .on_chain_start_async(serialized, self.bound(&inputs, "chain_start"), run)
    }

    fn on_chain_end_async<'a>(&'a self, outputs: Payload, run: &'a RunContext) -> BoxFuture<'a, Result<()>> {
        self.inner.on_chain_end_async(self.bound(&outputs, "chain_end"), run)
    }

    fn on_retriever_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        query: String,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        self.inner
            .on_retriever_start_async(serialized, self.bound_query(&query), run)
    }

    fn on_retriever_end_async<'a>(
        &'a self,
        documents: Vec<Document>,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        self.inner
            .on_retriever_end_async(serialize_documents(&documents, self.limits), run)
    }
}
