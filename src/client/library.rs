//! Tracing client library boundary.
//!
//! The tracing client ships in two mutually incompatible API generations.
//! A [`TracingLibrary`] describes one installed client: the version string it
//! reports about itself, which generation entry points it exposes, and how to
//! construct a [`Handler`] through each of them.
//!
//! # Generations
//!
//! - **Legacy** (major version 2): the handler takes its connection
//!   parameters and an outbound transport as constructor arguments.
//! - **Current** (major version 3 and later): the handler takes no arguments
//!   and reads `LANGFUSE_PUBLIC_KEY`, `LANGFUSE_SECRET_KEY` and
//!   `LANGFUSE_BASE_URL` from the environment at construction time.

use std::fmt;

use crate::client::handler::Handler;
use crate::domain::Result;

/// API generation of the tracing client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiGeneration {
    Legacy,
    Current,
}

impl ApiGeneration {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Current => "current",
        }
    }
}

impl fmt::Display for ApiGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outbound transport settings handed to legacy-generation clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportConfig {
    /// Whether TLS certificates of the tracing endpoint are verified.
    pub verify_tls: bool,
}

impl TransportConfig {
    /// Transport with certificate verification disabled.
    ///
    /// This is the historical default of the legacy construction path. It
    /// accepts any certificate presented by the endpoint, including
    /// self-signed and intercepted ones.
    #[must_use]
    pub const fn permissive() -> Self {
        Self { verify_tls: false }
    }

    /// Transport with certificate verification enabled.
    #[must_use]
    pub const fn verified() -> Self {
        Self { verify_tls: true }
    }
}

/// Constructor arguments of a legacy-generation handler.
#[derive(Clone, PartialEq, Eq)]
pub struct LegacyClientParams {
    pub host: String,
    pub public_key: String,
    pub secret_key: String,
    pub debug: bool,
    pub transport: TransportConfig,
}

impl fmt::Debug for LegacyClientParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyClientParams")
            .field("host", &self.host)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("transport", &self.transport)
            .finish()
    }
}

/// An installed tracing client library.
///
/// The version detector reads [`version_string`](Self::version_string) first
/// and falls back to probing [`provides`](Self::provides). Strategies call the
/// `construct_*` entry point matching their generation.
pub trait TracingLibrary: Send + Sync + fmt::Debug {
    /// Self-reported version string, e.g. `"3.2.1"`.
    fn version_string(&self) -> Option<String>;

    /// Whether the entry point of the given generation can be resolved.
    fn provides(&self, generation: ApiGeneration) -> bool;

    /// Constructs a handler through the legacy-generation entry point.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LangfuseError::DependencyMissing`] if the entry point
    /// is absent, or another error if the client rejects the arguments.
    fn construct_legacy(&self, params: LegacyClientParams) -> Result<Handler>;

    /// Constructs a handler through the current-generation entry point.
    ///
    /// The client reads its credentials from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`crate::LangfuseError::DependencyMissing`] if the entry point
    /// is absent, or another error if the environment lacks credentials.
    fn construct_current(&self) -> Result<Handler>;
}
