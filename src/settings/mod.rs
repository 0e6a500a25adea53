//! Typed connection settings for the tracing client.
//!
//! Settings can be built from explicit values, read from environment
//! variables under the `LANGFUSE_` prefix (names are matched
//! case-insensitively), or loaded from a TOML file.
//!
//! # Environment Variables
//!
//! | Variable                                | Required | Default |
//! |-----------------------------------------|----------|---------|
//! | `LANGFUSE_URL`                          | yes      |         |
//! | `LANGFUSE_PUBLIC_KEY`                   | yes      |         |
//! | `LANGFUSE_SECRET_KEY`                   | yes      |         |
//! | `LANGFUSE_DEBUG`                        | no       | `false` |
//! | `LANGFUSE_VERIFY_TLS`                   | no       | `false` |
//! | `LANGFUSE_TRUNCATE_MAX_LENGTH`          | no       | `1000`  |
//! | `LANGFUSE_TRUNCATE_MAX_VECTOR_ELEMENTS` | no       | `10`    |
//!
//! The last two are only read by [`LangfuseTruncatingSettings`].

pub mod simple;
pub mod truncating;

pub use simple::LangfuseSettings;
pub use truncating::LangfuseTruncatingSettings;

use std::collections::BTreeMap;
use std::str::FromStr;

use crate::domain::{LangfuseError, Result};

/// Prefix shared by every settings variable.
pub const ENV_PREFIX: &str = "LANGFUSE_";

/// Settings variables keyed by their upper-cased name without the prefix.
#[derive(Debug, Default)]
pub(crate) struct EnvSnapshot {
    vars: BTreeMap<String, String>,
}

impl EnvSnapshot {
    pub(crate) fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let vars = vars
            .into_iter()
            .filter_map(|(key, value)| {
                let key = key.as_ref().to_ascii_uppercase();
                let name = key.strip_prefix(ENV_PREFIX)?.to_string();
                Some((name, value.into()))
            })
            .collect();
        Self { vars }
    }

    pub(crate) fn optional(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    pub(crate) fn required(&self, name: &str) -> Result<String> {
        self.optional(name)
            .map(str::to_string)
            .ok_or_else(|| LangfuseError::Config(format!("{ENV_PREFIX}{name} is not set")))
    }

    pub(crate) fn flag(&self, name: &str) -> Result<bool> {
        self.optional(name)
            .map_or(Ok(false), |raw| parse_bool(raw).map_err(|e| with_name(name, e)))
    }

    pub(crate) fn parsed<T>(&self, name: &str, default: T) -> Result<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.optional(name).map_or(Ok(default), |raw| {
            raw.trim().parse::<T>().map_err(|e| {
                LangfuseError::Config(format!("{ENV_PREFIX}{name}: invalid value {raw:?}: {e}"))
            })
        })
    }
}

fn with_name(name: &str, err: LangfuseError) -> LangfuseError {
    match err {
        LangfuseError::Config(message) => LangfuseError::Config(format!("{ENV_PREFIX}{name}: {message}")),
        other => other,
    }
}

/// Parses a boolean the way settings variables accept them.
///
/// Accepts `1/0`, `true/false`, `yes/no`, `on/off`, `t/f` and `y/n`,
/// case-insensitively and ignoring surrounding whitespace.
///
/// # Errors
///
/// Returns [`LangfuseError::Config`] for anything else.
///
/// # Example
///
/// ```rust
/// use langfuse_runnable_config::settings::parse_bool;
///
/// assert!(parse_bool("Yes")?);
/// assert!(!parse_bool("0")?);
/// assert!(parse_bool("maybe").is_err());
/// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
/// ```
pub fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" | "t" | "y" => Ok(true),
        "0" | "false" | "no" | "off" | "f" | "n" => Ok(false),
        _ => Err(LangfuseError::Config(format!("invalid boolean {raw:?}"))),
    }
}
