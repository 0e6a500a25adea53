//! Connection settings plus truncation bounds.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::domain::{LangfuseError, Result, TruncationLimits, DEFAULT_MAX_CONTAINER_ELEMENTS, DEFAULT_MAX_TEXT_LENGTH};
use crate::infrastructure::{Environment, ProcessEnvironment};
use crate::settings::{EnvSnapshot, LangfuseSettings};

const fn default_max_length() -> usize {
    DEFAULT_MAX_TEXT_LENGTH
}

const fn default_max_vector_elements() -> usize {
    DEFAULT_MAX_CONTAINER_ELEMENTS
}

/// Settings for a handler that truncates payloads before tracing them.
///
/// In TOML the connection fields sit at the top level next to the
/// truncation fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LangfuseTruncatingSettings {
    #[serde(flatten)]
    pub connection: LangfuseSettings,

    /// Maximum characters kept from a text value.
    #[serde(default = "default_max_length")]
    pub truncate_max_length: usize,

    /// Maximum elements kept from a vector, sequence or mapping.
    #[serde(default = "default_max_vector_elements")]
    pub truncate_max_vector_elements: usize,
}

impl LangfuseTruncatingSettings {
    /// Wraps connection settings with the default bounds.
    #[must_use]
    pub const fn new(connection: LangfuseSettings) -> Self {
        Self {
            connection,
            truncate_max_length: DEFAULT_MAX_TEXT_LENGTH,
            truncate_max_vector_elements: DEFAULT_MAX_CONTAINER_ELEMENTS,
        }
    }

    #[must_use]
    pub const fn with_limits(mut self, max_length: usize, max_vector_elements: usize) -> Self {
        self.truncate_max_length = max_length;
        self.truncate_max_vector_elements = max_vector_elements;
        self
    }

    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// See [`LangfuseTruncatingSettings::from_vars`].
    pub fn from_env() -> Result<Self> {
        Self::from_environment(&ProcessEnvironment)
    }

    /// Reads settings from the given environment.
    ///
    /// # Errors
    ///
    /// See [`LangfuseTruncatingSettings::from_vars`].
    pub fn from_environment(environment: &dyn Environment) -> Result<Self> {
        Self::from_vars(environment.vars())
    }

    /// Parses settings from `LANGFUSE_`-prefixed key/value pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Config`] if connection settings are invalid,
    /// or if a bound is not a positive integer.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let snapshot = EnvSnapshot::from_vars(vars);
        let settings = Self {
            connection: LangfuseSettings::from_snapshot(&snapshot)?,
            truncate_max_length: snapshot.parsed("TRUNCATE_MAX_LENGTH", DEFAULT_MAX_TEXT_LENGTH)?,
            truncate_max_vector_elements: snapshot
                .parsed("TRUNCATE_MAX_VECTOR_ELEMENTS", DEFAULT_MAX_CONTAINER_ELEMENTS)?,
        };
        settings.limits()?;
        Ok(settings)
    }

    /// Loads settings from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Io`] if the file cannot be read and
    /// [`LangfuseError::Config`] if the contents or bounds are invalid.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&contents)
            .map_err(|e| LangfuseError::Config(format!("failed to parse settings TOML: {e}")))?;
        settings.limits()?;
        Ok(settings)
    }

    /// Truncation bounds described by these settings.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Config`] if either bound is zero.
    pub fn limits(&self) -> Result<TruncationLimits> {
        TruncationLimits::new(self.truncate_max_length, self.truncate_max_vector_elements)
    }
}

impl From<LangfuseSettings> for LangfuseTruncatingSettings {
    fn from(connection: LangfuseSettings) -> Self {
        Self::new(connection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CONNECTION: [(&str, &str); 3] = [
        ("LANGFUSE_URL", "https://langfuse.example"),
        ("LANGFUSE_PUBLIC_KEY", "pk-lf-test"),
        ("LANGFUSE_SECRET_KEY", "sk-lf-test"),
    ];

    #[test]
    fn test_defaults() {
        let settings = LangfuseTruncatingSettings::from_vars(CONNECTION).unwrap();
        assert_eq!(settings.truncate_max_length, DEFAULT_MAX_TEXT_LENGTH);
        assert_eq!(settings.truncate_max_vector_elements, DEFAULT_MAX_CONTAINER_ELEMENTS);
        assert_eq!(settings.limits().unwrap(), TruncationLimits::default());
    }

    #[test]
    fn test_overrides_from_vars() {
        let vars = CONNECTION.into_iter().chain([
            ("LANGFUSE_TRUNCATE_MAX_LENGTH", "50"),
            ("langfuse_truncate_max_vector_elements", "3"),
        ]);
        let settings = LangfuseTruncatingSettings::from_vars(vars).unwrap();

        let limits = settings.limits().unwrap();
        assert_eq!(limits.max_text_length(), 50);
        assert_eq!(limits.max_container_elements(), 3);
    }

    #[test]
    fn test_zero_bound_rejected() {
        let vars = CONNECTION.into_iter().chain([("LANGFUSE_TRUNCATE_MAX_LENGTH", "0")]);
        assert!(matches!(
            LangfuseTruncatingSettings::from_vars(vars),
            Err(LangfuseError::Config(_))
        ));
    }

    #[test]
    fn test_from_file_flattened() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
url = "https://langfuse.example"
public_key = "pk-lf-file"
secret_key = "sk-lf-file"
truncate_max_length = 200
"#
        )
        .unwrap();

        let settings = LangfuseTruncatingSettings::from_file(file.path()).unwrap();
        assert_eq!(settings.connection.public_key, "pk-lf-file");
        assert_eq!(settings.truncate_max_length, 200);
        assert_eq!(settings.truncate_max_vector_elements, DEFAULT_MAX_CONTAINER_ELEMENTS);
    }

    #[test]
    fn test_from_connection() {
        let settings: LangfuseTruncatingSettings = LangfuseSettings::new("https://a", "pk", "sk").into();
        assert_eq!(settings.limits().unwrap(), TruncationLimits::default());
    }
}
