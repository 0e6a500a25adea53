//! Truncation limits and their defaults.

use crate::domain::error::{LangfuseError, Result};

/// Default maximum number of characters kept from a text value.
pub const DEFAULT_MAX_TEXT_LENGTH: usize = 1000;

/// Default maximum number of elements kept from a sequence or mapping.
pub const DEFAULT_MAX_CONTAINER_ELEMENTS: usize = 10;

/// Bounds applied by the truncation engine.
///
/// Immutable once built; the engine passes the same limits down through every
/// recursive call.
///
/// # Examples
///
/// ```
/// use langfuse_runnable_config::TruncationLimits;
///
/// let limits = TruncationLimits::new(50, 3)?;
/// assert_eq!(limits.max_text_length(), 50);
/// assert!(TruncationLimits::new(0, 3).is_err());
/// # Ok::<(), langfuse_runnable_config::LangfuseError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TruncationLimits {
    max_text_length: usize,
    max_container_elements: usize,
}

impl TruncationLimits {
    /// Creates limits, rejecting zero for either bound.
    ///
    /// # Errors
    ///
    /// Returns [`LangfuseError::Config`] if either value is zero.
    pub fn new(max_text_length: usize, max_container_elements: usize) -> Result<Self> {
        if max_text_length == 0 {
            return Err(LangfuseError::Config(
                "max_text_length must be a positive integer".to_string(),
            ));
        }
        if max_container_elements == 0 {
            return Err(LangfuseError::Config(
                "max_container_elements must be a positive integer".to_string(),
            ));
        }
        Ok(Self {
            max_text_length,
            max_container_elements,
        })
    }

    #[must_use]
    pub const fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    #[must_use]
    pub const fn max_container_elements(&self) -> usize {
        self.max_container_elements
    }
}

impl Default for TruncationLimits {
    fn default() -> Self {
        Self {
            max_text_length: DEFAULT_MAX_TEXT_LENGTH,
            max_container_elements: DEFAULT_MAX_CONTAINER_ELEMENTS,
        }
    }
}
