//! Domain layer: payload model, truncation limits and error types.
//!
//! This module contains the types shared by every other layer, independent of
//! any particular tracing client or environment.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`payload`]: The recursive traced-value model
//! - [`limits`]: Truncation bounds and their defaults

pub mod error;
pub mod limits;
pub mod payload;

pub use error::{LangfuseError, Result};
pub use limits::{TruncationLimits, DEFAULT_MAX_CONTAINER_ELEMENTS, DEFAULT_MAX_TEXT_LENGTH};
pub use payload::{Document, Payload, PayloadMap, StructuredExport, TextRepr};
