//! Environment variable access.
//!
//! Current-generation tracing clients read their credentials from the process
//! environment, so publishing settings there is the hand-off mechanism between
//! this crate and the client. The [`Environment`] trait makes that channel
//! injectable: [`ProcessEnvironment`] talks to the real process,
//! [`MemoryEnvironment`] keeps variables in an isolated map so tests can run
//! without mutating shared state.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::{PoisonError, RwLock};

/// Variable holding the public key read by current-generation clients.
pub const PUBLIC_KEY_VAR: &str = "LANGFUSE_PUBLIC_KEY";

/// Variable holding the secret key read by current-generation clients.
pub const SECRET_KEY_VAR: &str = "LANGFUSE_SECRET_KEY";

/// Variable holding the endpoint URL read by current-generation clients.
pub const BASE_URL_VAR: &str = "LANGFUSE_BASE_URL";

/// Readable and writable set of environment variables.
pub trait Environment: Send + Sync + fmt::Debug {
    /// Returns the value of a variable, `None` if unset or not valid Unicode.
    fn var(&self, key: &str) -> Option<String>;

    /// Returns all variables with Unicode names and values.
    fn vars(&self) -> Vec<(String, String)>;

    /// Sets a variable.
    fn set_var(&self, key: &str, value: &str);
}

/// The real process environment.
///
/// Writes are visible process-wide and are not synchronized with readers
/// outside this crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnvironment;

impl Environment for ProcessEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect()
    }

    fn set_var(&self, key: &str, value: &str) {
        std::env::set_var(key, value);
    }
}

/// Isolated in-memory environment.
///
/// # Example
///
/// ```rust
/// use langfuse_runnable_config::infrastructure::{Environment, MemoryEnvironment};
///
/// let env = MemoryEnvironment::from_vars([("LANGFUSE_URL", "https://cloud.langfuse.com")]);
/// env.set_var("LANGFUSE_DEBUG", "true");
///
/// assert_eq!(env.var("LANGFUSE_DEBUG").as_deref(), Some("true"));
/// assert_eq!(env.vars().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    vars: RwLock<BTreeMap<String, String>>,
}

impl MemoryEnvironment {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: RwLock::new(vars.into_iter().map(|(k, v)| (k.into(), v.into())).collect()),
        }
    }
}

impl Environment for MemoryEnvironment {
    fn var(&self, key: &str) -> Option<String> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn set_var(&self, key: &str, value: &str) {
        self.vars
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_environment_overwrites() {
        let env = MemoryEnvironment::new();
        env.set_var(PUBLIC_KEY_VAR, "pk-1");
        env.set_var(PUBLIC_KEY_VAR, "pk-2");

        assert_eq!(env.var(PUBLIC_KEY_VAR).as_deref(), Some("pk-2"));
        assert_eq!(env.var(SECRET_KEY_VAR), None);
    }
}
