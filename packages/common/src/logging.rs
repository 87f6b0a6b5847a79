//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of key material
//! and integration with the standard log crate.

use log::{debug, error, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Number of hex characters kept from the SHA-256 digest in a fingerprint
const FINGERPRINT_HEX_LEN: usize = 12;

/// Short, log-safe fingerprint of sensitive bytes
///
/// Returns `#` followed by the first 12 hex characters of the SHA-256 digest.
#[must_use]
pub fn fingerprint(bytes: &[u8]) -> String {
    let hex_hash = format!("{:x}", Sha256::digest(bytes));
    format!("#{}", &hex_hash[..FINGERPRINT_HEX_LEN])
}

/// Logging entry points used across the key generation crates
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (call once at application startup)
    ///
    /// Configure levels via the `RUST_LOG` environment variable:
    /// - `RUST_LOG=debug` - Enable all debug logs
    /// - `RUST_LOG=info` - Info and above
    /// - `RUST_LOG=safevision_common=debug` - Module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Safe to call from every test; later calls are no-ops.
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log a successful key generation
    ///
    /// Emitted only when `debug_enabled` is set. The key itself is never
    /// logged, only its length and fingerprint.
    pub fn log_key_generated(source: &str, key: &[u8], debug_enabled: bool) {
        if debug_enabled {
            debug!(
                "Key generated successfully: source={source} len={} fingerprint={}",
                key.len(),
                fingerprint(key)
            );
        }
    }

    /// Log a failed key generation at error level
    pub fn log_generation_failure(source: &str, error: &dyn std::error::Error) {
        error!("Key generation failed: source={source} error={error}");
    }

    /// Log a key source that could not be brought up
    pub fn log_source_unavailable(source: &str, reason: &str) {
        error!("Key source unavailable: source={source} reason={reason}");
    }

    /// Log a configuration value that was ignored
    pub fn log_config_warning(setting: &str, value: &str) {
        warn!("Ignoring invalid configuration value: {setting}={value:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_shape() {
        LoggingTransformer::init_test();

        let fp = fingerprint(b"sensitive_key_123");
        assert!(fp.starts_with('#'));
        assert_eq!(fp.len(), FINGERPRINT_HEX_LEN + 1);
        assert!(fp[1..].chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_is_deterministic_and_distinct() {
        let a = fingerprint(b"key-a");
        let b = fingerprint(b"key-b");

        assert_eq!(a, fingerprint(b"key-a"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fingerprint_of_empty_input() {
        // SHA-256("") = e3b0c442 98fc1c14 ...
        assert_eq!(fingerprint(&[]), "#e3b0c44298fc");
    }
}
