//! Coordinator configuration
//!
//! Defaults suit an interactive tool: a 50-entry result cache, five seconds
//! for text and poems, fifteen for images (decode plus sampling), and no
//! age-based purging. Any of these can be overridden in code or through the
//! environment:
//!
//! ```bash
//! GLYPHART_CACHE_CAPACITY=200 GLYPHART_IMAGE_TIMEOUT_MS=30000 ./my_app
//! ```
//!
//! ```
//! use std::time::Duration;
//! use glyphart_core::config::CoordinatorConfig;
//!
//! let config = CoordinatorConfig::default()
//!     .with_cache_capacity(10)
//!     .with_max_entry_age(Some(Duration::from_secs(600)));
//! assert!(config.validate().is_ok());
//! ```

use std::time::Duration;

use crate::cache::DEFAULT_CAPACITY;
use crate::error::{GlyphartError, Result};

pub const ENV_CACHE_CAPACITY: &str = "GLYPHART_CACHE_CAPACITY";
pub const ENV_TEXT_TIMEOUT_MS: &str = "GLYPHART_TEXT_TIMEOUT_MS";
pub const ENV_IMAGE_TIMEOUT_MS: &str = "GLYPHART_IMAGE_TIMEOUT_MS";
pub const ENV_CACHE_MAX_AGE_MS: &str = "GLYPHART_CACHE_MAX_AGE_MS";

/// Budgets and bounds for a coordinator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Most results the cache keeps
    pub cache_capacity: usize,
    /// Render budget for text and poem requests
    pub text_timeout: Duration,
    /// Render budget for image requests, decode included
    pub image_timeout: Duration,
    /// Entries older than this are purged before each cacheable request
    pub max_entry_age: Option<Duration>,
    /// Longest text echoed back in a `start` event
    pub echo_limit: usize,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CAPACITY,
            text_timeout: Duration::from_secs(5),
            image_timeout: Duration::from_secs(15),
            max_entry_age: None,
            echo_limit: 100,
        }
    }
}

impl CoordinatorConfig {
    /// Defaults with any environment overrides applied
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::default().with_overrides(|name| std::env::var(name).ok())
    }

    /// Apply overrides from any key/value lookup
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(capacity) = read_number(&lookup, ENV_CACHE_CAPACITY).filter(|n| *n > 0) {
            log::info!("Glyphart cache capacity set to {capacity} via {ENV_CACHE_CAPACITY}");
            self.cache_capacity = capacity as usize;
        }
        if let Some(ms) = read_number(&lookup, ENV_TEXT_TIMEOUT_MS).filter(|n| *n > 0) {
            log::info!("Glyphart text timeout set to {ms} ms via {ENV_TEXT_TIMEOUT_MS}");
            self.text_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = read_number(&lookup, ENV_IMAGE_TIMEOUT_MS).filter(|n| *n > 0) {
            log::info!("Glyphart image timeout set to {ms} ms via {ENV_IMAGE_TIMEOUT_MS}");
            self.image_timeout = Duration::from_millis(ms);
        }
        if let Some(ms) = read_number(&lookup, ENV_CACHE_MAX_AGE_MS) {
            log::info!("Glyphart cache max age set to {ms} ms via {ENV_CACHE_MAX_AGE_MS}");
            self.max_entry_age = Some(Duration::from_millis(ms));
        }
        self
    }

    pub fn with_cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    pub fn with_text_timeout(mut self, timeout: Duration) -> Self {
        self.text_timeout = timeout;
        self
    }

    pub fn with_image_timeout(mut self, timeout: Duration) -> Self {
        self.image_timeout = timeout;
        self
    }

    pub fn with_max_entry_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_entry_age = max_age;
        self
    }

    pub fn with_echo_limit(mut self, limit: usize) -> Self {
        self.echo_limit = limit;
        self
    }

    /// Reject settings the coordinator cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.cache_capacity == 0 {
            return Err(GlyphartError::Config("cache capacity must be at least 1".into()));
        }
        if self.text_timeout.is_zero() || self.image_timeout.is_zero() {
            return Err(GlyphartError::Config("render timeouts must be non-zero".into()));
        }
        Ok(())
    }
}

fn read_number(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<u64> {
    let raw = lookup(name)?;
    match raw.trim().parse::<u64>() {
        Ok(value) => Some(value),
        Err(_) => {
            log::warn!("Ignoring {name}={raw:?}: not a whole number");
            None
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = CoordinatorConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.image_timeout > config.text_timeout);
        assert_eq!(config.max_entry_age, None);
    }

    #[test]
    fn test_overrides_apply() {
        let config = CoordinatorConfig::default().with_overrides(lookup_from(&[
            (ENV_CACHE_CAPACITY, "7"),
            (ENV_TEXT_TIMEOUT_MS, "250"),
            (ENV_CACHE_MAX_AGE_MS, "1000"),
        ]));
        assert_eq!(config.cache_capacity, 7);
        assert_eq!(config.text_timeout, Duration::from_millis(250));
        assert_eq!(config.max_entry_age, Some(Duration::from_secs(1)));
        assert_eq!(config.image_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_bad_overrides_are_ignored() {
        let config = CoordinatorConfig::default().with_overrides(lookup_from(&[
            (ENV_CACHE_CAPACITY, "lots"),
            (ENV_IMAGE_TIMEOUT_MS, "0"),
        ]));
        assert_eq!(config, CoordinatorConfig::default());
    }

    #[test]
    fn test_zero_capacity_fails_validation() {
        let config = CoordinatorConfig::default().with_cache_capacity(0);
        assert!(matches!(config.validate(), Err(GlyphartError::Config(_))));
    }
}
