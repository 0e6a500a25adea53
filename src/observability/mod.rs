//! Diagnostic logging for the crate.
//!
//! Every layer logs through `tracing` macros with structured fields:
//!
//! - `debug`: version detection steps, strategy selection, handler construction
//! - `warn`: unsupported client versions, disabled TLS verification, and
//!   construction failures degraded to disabled tracing
//!
//! Applications that already install a subscriber see these events with no
//! further setup. [`init_logging`] installs a plain stderr subscriber for
//! applications that do not.
//!
//! # Configuration
//!
//! The filter is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. [`LoggingConfig::level`]
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup

mod init;

pub use init::{init_logging, LoggingConfig};
