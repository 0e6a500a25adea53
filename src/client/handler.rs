//! Callback handler contract of the tracing client.
//!
//! A [`CallbackHandler`] receives lifecycle notifications from the host
//! application's processing pipeline: the start and end of a chain, and the
//! start and end of a retrieval step. Every notification exists in a
//! synchronous and an asynchronous flavour; asynchronous methods return a
//! boxed future so handlers stay object safe and can be shared as
//! [`Handler`] trait objects.

use futures_util::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::domain::{Document, Payload, Result};

/// Shared handle to a callback handler.
///
/// Owned by whoever receives it from the factory. No close or flush contract
/// is defined here; that belongs to the tracing client behind the handle.
pub type Handler = Arc<dyn CallbackHandler>;

/// Identifiers attached to every lifecycle notification.
///
/// Forwarded untouched by decorating handlers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunContext {
    /// Identifier of the run this notification belongs to.
    pub run_id: String,

    /// Identifier of the enclosing run, `None` for root runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_run_id: Option<String>,

    /// Free-form tags attached by the application.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl RunContext {
    pub fn new(run_id: impl Into<String>) -> Self {
        Self {
            run_id: run_id.into(),
            parent_run_id: None,
            tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_parent(mut self, parent_run_id: impl Into<String>) -> Self {
        self.parent_run_id = Some(parent_run_id.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }
}

/// Receiver of pipeline lifecycle notifications.
///
/// Implementations are provided by tracing clients. The asynchronous methods
/// default to running the synchronous method when polled; clients with a
/// native asynchronous path override them.
///
/// # Parameters shared by all methods
///
/// * `serialized` - Description of the component emitting the event
/// * `run` - Run identifiers and tags
pub trait CallbackHandler: Send + Sync + fmt::Debug {
    /// A chain started with the given inputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the event.
    fn on_chain_start(&self, serialized: &Payload, inputs: Payload, run: &RunContext) -> Result<()>;

    /// A chain finished with the given outputs.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the event.
    fn on_chain_end(&self, outputs: Payload, run: &RunContext) -> Result<()>;

    /// A retriever started with the given query.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the event.
    fn on_retriever_start(&self, serialized: &Payload, query: String, run: &RunContext) -> Result<()>;

    /// A retriever finished with the given documents.
    ///
    /// # Errors
    ///
    /// Returns an error if the client rejects the event.
    fn on_retriever_end(&self, documents: Vec<Document>, run: &RunContext) -> Result<()>;

    fn on_chain_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        inputs: Payload,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.on_chain_start(serialized, inputs, run) })
    }

    fn on_chain_end_async<'a>(&'a self, outputs: Payload, run: &'a RunContext) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.on_chain_end(outputs, run) })
    }

    fn on_retriever_start_async<'a>(
        &'a self,
        serialized: &'a Payload,
        query: String,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.on_retriever_start(serialized, query, run) })
    }

    fn on_retriever_end_async<'a>(
        &'a self,
        documents: Vec<Document>,
        run: &'a RunContext,
    ) -> BoxFuture<'a, Result<()>> {
        Box::pin(async move { self.on_retriever_end(documents, run) })
    }
}
