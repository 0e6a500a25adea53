//! Boundary with the external tracing client.
//!
//! This crate does not implement a tracing backend. It talks to one through
//! the traits in this module:
//!
//! - [`handler`]: the [`CallbackHandler`] lifecycle contract and [`RunContext`]
//! - [`library`]: the [`TracingLibrary`] description of an installed client
//!   and its two API generations
//! - [`runnable`]: the [`RunnableConfig`] envelope handed to pipelines
//! - [`memory`]: an in-memory client recording every event

pub mod handler;
pub mod library;
pub mod memory;
pub mod runnable;

pub use handler::{CallbackHandler, Handler, RunContext};
pub use library::{ApiGeneration, LegacyClientParams, TracingLibrary, TransportConfig};
pub use runnable::RunnableConfig;
