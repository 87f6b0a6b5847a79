//! Key generator configuration
//!
//! Plain settings with presets and environment overrides.

use safevision_common::LoggingTransformer;

/// Environment variable toggling success diagnostics
pub const DEBUG_LOG_ENV: &str = "SAFEVISION_DEBUG_LOG";

/// Environment variable overriding the minimum key length
pub const MIN_KEY_LEN_ENV: &str = "SAFEVISION_MIN_KEY_LEN";

/// Keys must be strictly longer than this many bytes (128 bits)
///
/// This is also the floor: a configured minimum may raise it, never lower it.
pub const DEFAULT_MIN_KEY_LEN: usize = 16;

/// Settings for a [`KeyGenerator`](crate::KeyGenerator)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Exclusive lower bound on accepted key length in bytes
    ///
    /// Values below [`DEFAULT_MIN_KEY_LEN`] are treated as
    /// [`DEFAULT_MIN_KEY_LEN`] when keys are validated.
    pub min_key_len: usize,
    /// Emit a debug-level entry for every successful generation
    pub debug_logging: bool,
}

impl Default for GeneratorConfig {
    /// Debug logging follows the build profile: on in debug builds, off in
    /// release builds.
    fn default() -> Self {
        Self {
            min_key_len: DEFAULT_MIN_KEY_LEN,
            debug_logging: cfg!(debug_assertions),
        }
    }
}

impl GeneratorConfig {
    /// Development preset: success diagnostics on
    #[must_use]
    pub fn development() -> Self {
        Self {
            debug_logging: true,
            ..Self::default()
        }
    }

    /// Release preset: success diagnostics off
    #[must_use]
    pub fn release() -> Self {
        Self {
            debug_logging: false,
            ..Self::default()
        }
    }

    /// Defaults overridden by `SAFEVISION_DEBUG_LOG` and `SAFEVISION_MIN_KEY_LEN`
    ///
    /// Unrecognised values, and minimum lengths below
    /// [`DEFAULT_MIN_KEY_LEN`], are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env) with an explicit variable lookup
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(DEBUG_LOG_ENV) {
            match parse_flag(&raw) {
                Some(flag) => config.debug_logging = flag,
                None => LoggingTransformer::log_config_warning(DEBUG_LOG_ENV, &raw),
            }
        }

        if let Some(raw) = lookup(MIN_KEY_LEN_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(len) if len >= DEFAULT_MIN_KEY_LEN => config.min_key_len = len,
                _ => LoggingTransformer::log_config_warning(MIN_KEY_LEN_ENV, &raw),
            }
        }

        config
    }

    /// Minimum actually enforced, never below [`DEFAULT_MIN_KEY_LEN`]
    #[must_use]
    pub fn effective_min_key_len(&self) -> usize {
        self.min_key_len.max(DEFAULT_MIN_KEY_LEN)
    }

    /// Set whether success diagnostics are emitted
    #[must_use]
    pub fn with_debug_logging(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }

    /// Raise the exclusive lower bound on key length
    ///
    /// Values below [`DEFAULT_MIN_KEY_LEN`] are clamped up to it.
    #[must_use]
    pub fn with_min_key_len(mut self, min_key_len: usize) -> Self {
        self.min_key_len = min_key_len.max(DEFAULT_MIN_KEY_LEN);
        self
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
