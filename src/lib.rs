//! Langfuse runnable config: version-aware tracing callbacks with payload
//! truncation.
//!
//! This crate sits between an application's processing pipeline and the
//! Langfuse tracing client. It provides:
//! - A recursive truncation engine bounding text length and container size of
//!   traced payloads
//! - Detection of the installed client's API generation (legacy v2, current v3+)
//! - A construction strategy per generation, optionally composed with truncation
//! - Facades that degrade to "tracing disabled" instead of failing
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Facades (factories/)                               │  ← Entry point
//! │  - LangfuseConfig / LangfuseTruncatingConfig        │  ← Never fail
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Handler Factory (handlers/)                        │  ← Detect, select,
//! │  - create_handler / create_truncating_handler       │    build
//! │  - TruncatingHandler decorator                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Version       │   │ Strategies    │   │ Serializers   │
//! │ (version/)    │   │ (strategies/) │   │ (serializers/)│
//! │ - Metadata    │   │ - Legacy      │   │ - Truncation  │
//! │ - Probing     │   │ - Current     │   │   engine      │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Client Boundary, Infrastructure & Domain           │
//! │  - Handler / library traits (client/)               │
//! │  - Environment and library registry (infrastructure/)│
//! │  - Payload model, limits, errors (domain/)          │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`domain`]: Payload model, truncation limits, error types
//! - [`serializers`]: Truncation engine
//! - [`client`]: Tracing client boundary and an in-memory client
//! - [`infrastructure`]: Environment access and the installed-library registry
//! - [`version`]: Client version detection
//! - [`strategies`]: Per-generation construction strategies
//! - [`handlers`]: Handler factory and truncation decorator
//! - [`settings`]: Connection settings from values, environment or TOML
//! - [`factories`]: Non-failing public facades
//! - [`observability`]: Logging setup
//!
//! # Configuration
//!
//! Settings are read from `LANGFUSE_`-prefixed environment variables when
//! not given explicitly. See [`settings`] for the full list.
//!
//! # Examples
//!
//! ## Truncating a Payload
//!
//! ```rust
//! use langfuse_runnable_config::{serialize_for_tracing, Payload, PayloadMap};
//!
//! let mut map = PayloadMap::new();
//! map.insert("a", 1);
//! map.insert("b", 2);
//! map.insert("c", 3);
//!
//! let bounded = serialize_for_tracing(&Payload::from(map), 1000, 2);
//! let keys: Vec<_> = bounded.as_mapping().map(|m| m.keys().collect()).unwrap_or_default();
//! assert_eq!(keys, ["a", "b"]);
//! ```
//!
//! ## Building a Callback
//!
//! ```rust
//! use std::sync::Arc;
//! use langfuse_runnable_config::client::memory::InMemoryLibrary;
//! use langfuse_runnable_config::factories::LangfuseTruncatingConfig;
//! use langfuse_runnable_config::infrastructure::install_library;
//! use langfuse_runnable_config::settings::{LangfuseSettings, LangfuseTruncatingSettings};
//!
//! // The application installs its tracing client once at startup.
//! install_library(Arc::new(InMemoryLibrary::legacy("2.60.0")));
//!
//! let settings = LangfuseTruncatingSettings::new(LangfuseSettings::new(
//!     "https://cloud.langfuse.com",
//!     "pk-lf-1",
//!     "sk-lf-1",
//! ))
//! .with_limits(5000, 10);
//!
//! let config = LangfuseTruncatingConfig::new().create_config(Some(settings));
//! assert_eq!(config.callbacks.len(), 1);
//! ```
//!
//! # Key Design Decisions
//!
//! ## Two Construction Buckets
//!
//! Major version 2 is legacy; every other major is built the current way.
//! Untested future majors log a warning and proceed.
//!
//! ## Composition over Subclassing
//!
//! Truncation is a [`handlers::TruncatingHandler`] wrapping any handler, and a
//! [`strategies::TruncatingStrategy`] wrapping any strategy.
//!
//! ## Degrade, Don't Fail
//!
//! The facades never return errors. A missing client or bad settings logs a
//! warning and yields a disabled callback.

pub mod client;
pub mod domain;
pub mod factories;
pub mod handlers;
pub mod infrastructure;
pub mod observability;
pub mod serializers;
pub mod settings;
pub mod strategies;
pub mod version;

pub use client::{CallbackHandler, Handler, RunContext, RunnableConfig};
pub use domain::{
    Document, LangfuseError, Payload, PayloadMap, Result, StructuredExport, TruncationLimits,
    DEFAULT_MAX_CONTAINER_ELEMENTS, DEFAULT_MAX_TEXT_LENGTH,
};
pub use factories::{LangfuseConfig, LangfuseTruncatingConfig};
pub use serializers::serialize_for_tracing;
pub use settings::{LangfuseSettings, LangfuseTruncatingSettings};
pub use version::{detect_version, TracingVersion};
