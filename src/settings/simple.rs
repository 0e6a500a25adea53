//! Connection settings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::client::TransportConfig;
use crate::domain::{LangfuseError, Result};
use crate::infrastructure::{Environment, ProcessEnvironment};
use crate::settings::EnvSnapshot;

/// Connection parameters of the tracing endpoint.
///
/// The three connection fields are required and have no defaults.
///
/// # Fields
///
/// * `url` - Base URL of the tracing endpoint
/// * `public_key` - Project public key
/// * `secret_key` - Project secret key, redacted from `Debug` output
/// * `debug` - Verbose client-side logging
/// * `verify_tls` - Verify the endpoint's TLS certificate on the legacy
///   construction path (default `false`)
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangfuseSettings {
    pub url: String,
    pub public_key: String,
    pub secret_key: String,

    #[serde(default)]
    pub debug: bool,

    #[serde(default)]
    pub verify_tls: bool,
}

impl LangfuseSettings {
    /// Creates settings with `debug` and `verify_tls` off.
    pub fn new(url: impl Into<String>, public_key: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            public_key: public_key.into(),
            secret_key: secret_key.into(),
            debug: false,
            verify_tls: false,
        }
    }

    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    #[must_use]
    pub const fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LangfuseSettings::from_vars`].
    pub fn from_env() -> Result<Self> {
        Self::from_environment(&ProcessEnvironment)
    }

    /// Reads settings from the given environment.
    ///
    /// # Errors
    ///
    /// See [`LangfuseSettings::from_vars`].
    pub fn from_environment(environment: &dyn Environment) -> Result<Self> {
        Self::from_vars(environment.vars())
    }

    /// Parses settings from `LANGFUSE_`-prefixed key/value pairs.
    ///
    /// Keys are matched case-insensitively. Pairs without the prefix are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Config`] if a required variable is missing or
    /// a boolean variable holds an unrecognized value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use langfuse_runnable_config::settings::LangfuseSettings;
    ///
    /// let settings = LangfuseSettings::from_vars([
    ///     ("LANGFUSE_URL", "https://cloud.langfuse.com"),
    ///     ("LANGFUSE_PUBLIC_KEY", "pk-lf-1"),
    ///     ("LANGFUSE_SECRET_KEY", "sk-lf-1"),
    ///     ("langfuse_debug", "yes"),
    /// ])?;
    ///
    /// assert_eq!(settings.url, "https://cloud.langfuse.com");
    /// assert!(settings.debug);
    /// assert!(!settings.verify_tls);
    /// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
    /// ```
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_snapshot(&EnvSnapshot::from_vars(vars))
    }

    pub(crate) fn from_snapshot(snapshot: &EnvSnapshot) -> Result<Self> {
        Ok(Self {
            url: snapshot.required("URL")?,
            public_key: snapshot.required("PUBLIC_KEY")?,
            secret_key: snapshot.required("SECRET_KEY")?,
            debug: snapshot.flag("DEBUG")?,
            verify_tls: snapshot.flag("VERIFY_TLS")?,
        })
    }

    /// Loads settings from a TOML file.
    ///
    /// ```toml
    /// url = "https://cloud.langfuse.com"
    /// public_key = "pk-lf-..."
    /// secret_key = "sk-lf-..."
    /// debug = false
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Io`] if the file cannot be read and
    /// [`LangfuseError::Config`] if it is not valid settings TOML.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        toml::from_str(&contents).map_err(|e| LangfuseError::Config(format!("failed to parse settings TOML: {e}")))
    }

    /// Transport handed to legacy-generation clients.
    #[must_use]
    pub const fn transport(&self) -> TransportConfig {
        if self.verify_tls {
            TransportConfig::verified()
        } else {
            TransportConfig::permissive()
        }
    }
}

impl fmt::Debug for LangfuseSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LangfuseSettings")
            .field("url", &self.url)
            .field("public_key", &self.public_key)
            .field("secret_key", &"<redacted>")
            .field("debug", &self.debug)
            .field("verify_tls", &self.verify_tls)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryEnvironment;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn full_vars() -> Vec<(&'static str, &'static str)> {
        vec![
            ("LANGFUSE_URL", "https://langfuse.example"),
            ("LANGFUSE_PUBLIC_KEY", "pk-lf-test"),
            ("LANGFUSE_SECRET_KEY", "sk-lf-test"),
        ]
    }

    #[test]
    fn test_from_vars_defaults() {
        let settings = LangfuseSettings::from_vars(full_vars()).unwrap();

        assert_eq!(
            settings,
            LangfuseSettings::new("https://langfuse.example", "pk-lf-test", "sk-lf-test")
        );
        assert_eq!(settings.transport(), TransportConfig::permissive());
    }

    #[test]
    fn test_from_vars_missing_secret() {
        let vars = full_vars().into_iter().filter(|(k, _)| *k != "LANGFUSE_SECRET_KEY");
        let err = LangfuseSettings::from_vars(vars).unwrap_err();
        assert!(err.to_string().contains("LANGFUSE_SECRET_KEY"));
    }

    #[test]
    fn test_from_vars_invalid_flag() {
        let mut vars = full_vars();
        vars.push(("LANGFUSE_VERIFY_TLS", "sometimes"));
        assert!(matches!(LangfuseSettings::from_vars(vars), Err(LangfuseError::Config(_))));
    }

    #[test]
    fn test_from_environment() {
        let env = MemoryEnvironment::from_vars(full_vars());
        env.set_var("LANGFUSE_VERIFY_TLS", "true");

        let settings = LangfuseSettings::from_environment(&env).unwrap();
        assert!(settings.verify_tls);
        assert_eq!(settings.transport(), TransportConfig::verified());
    }

    #[test]
    fn test_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
url = "https://langfuse.example"
public_key = "pk-lf-file"
secret_key = "sk-lf-file"
debug = true
"#
        )
        .unwrap();

        let settings = LangfuseSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.public_key, "pk-lf-file");
        assert!(settings.debug);
        assert!(!settings.verify_tls);
    }

    #[test]
    fn test_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = LangfuseSettings::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, LangfuseError::Io(_)));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "url = \"https://only-url\"").unwrap();
        let incomplete = LangfuseSettings::from_file(file.path()).unwrap_err();
        assert!(matches!(incomplete, LangfuseError::Config(_)));
    }

    #[test]
    fn test_debug_redacts_secret() {
        let settings = LangfuseSettings::new("https://a", "pk", "sk-super-secret");
        assert!(!format!("{settings:?}").contains("sk-super-secret"));
    }
}
