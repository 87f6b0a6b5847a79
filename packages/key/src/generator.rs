//! Validating key generator
//!
//! [`KeyGenerator`] wraps one [`KeySource`] and turns its raw, possibly
//! failing output into validated [`KeyMaterial`]. Two entry points:
//!
//! - [`KeyGenerator::generate`] reports *why* a generation failed
//!   (source unavailable, source failed, invalid output).
//! - [`KeyGenerator::generate_securely`] collapses every failure into
//!   `None`, for callers that only care whether a key was produced.
//!
//! Both are synchronous and log every outcome through
//! [`LoggingTransformer`]. Key bytes are never logged.

use crate::config::DEFAULT_MIN_KEY_LEN;
use crate::{GeneratorConfig, KeyError, KeyMaterial, KeySource, Result};
use safevision_common::LoggingTransformer;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use zeroize::Zeroizing;

/// Validate raw source output against an exclusive minimum length
///
/// `min_key_len` below [`DEFAULT_MIN_KEY_LEN`] is raised to it, so no
/// key of 16 bytes or fewer is ever accepted.
///
/// # Errors
///
/// Returns `EmptyOutput` for `None` and `KeyTooShort` when
/// `bytes.len() <= min_key_len`.
pub fn validate_key(bytes: Option<Vec<u8>>, min_key_len: usize) -> Result<KeyMaterial> {
    let min_key_len = min_key_len.max(DEFAULT_MIN_KEY_LEN);
    let mut bytes = Zeroizing::new(bytes.ok_or(KeyError::EmptyOutput)?);
    if bytes.len() <= min_key_len {
        return Err(KeyError::KeyTooShort {
            minimum: min_key_len,
            actual: bytes.len(),
        });
    }
    Ok(KeyMaterial::new(std::mem::take(&mut *bytes)))
}

/// Key generator over a single source
pub struct KeyGenerator<S = Box<dyn KeySource>> {
    source: S,
    config: GeneratorConfig,
}

impl<S: KeySource> KeyGenerator<S> {
    /// Generator with the default configuration
    pub fn new(source: S) -> Self {
        Self::with_config(source, GeneratorConfig::default())
    }

    /// Generator with an explicit configuration
    pub fn with_config(source: S, config: GeneratorConfig) -> Self {
        Self { source, config }
    }

    /// The wrapped source
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Active configuration
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Apply this generator's length rule to raw bytes
    ///
    /// # Errors
    ///
    /// See [`validate_key`].
    pub fn validate(&self, bytes: Option<Vec<u8>>) -> Result<KeyMaterial> {
        validate_key(bytes, self.config.effective_min_key_len())
    }

    /// Generate a key, reporting the failure reason
    ///
    /// The source is probed, called once, and its output validated. A
    /// panic inside the source is caught and reported as `SourceFailed`.
    ///
    /// # Errors
    ///
    /// - `SourceUnavailable` if the probe fails
    /// - `SourceFailed` if the call errors or panics
    /// - `EmptyOutput` / `KeyTooShort` if the output is rejected
    pub fn generate(&self) -> Result<KeyMaterial> {
        let name = self.source.name();
        let result = self
            .probe()
            .and_then(|()| self.call())
            .and_then(|raw| self.validate(raw));

        match &result {
            Ok(key) => {
                LoggingTransformer::log_key_generated(
                    name,
                    key.as_bytes(),
                    self.config.debug_logging,
                );
            }
            Err(KeyError::SourceUnavailable { reason, .. }) => {
                LoggingTransformer::log_source_unavailable(name, reason);
            }
            Err(err) => LoggingTransformer::log_generation_failure(name, err),
        }

        result
    }

    /// Generate a key, or `None` on any failure
    ///
    /// Failures are logged at error level; nothing propagates to the caller.
    pub fn generate_securely(&self) -> Option<KeyMaterial> {
        self.generate().ok()
    }

    fn probe(&self) -> Result<()> {
        self.source.probe().map_err(|err| match err {
            KeyError::SourceUnavailable { .. } => err,
            other => KeyError::unavailable(self.source.name(), other.to_string()),
        })
    }

    fn call(&self) -> Result<Option<Vec<u8>>> {
        let name = self.source.name();
        match panic::catch_unwind(AssertUnwindSafe(|| self.source.generate_key())) {
            Ok(Ok(raw)) => Ok(raw),
            Ok(Err(err @ (KeyError::SourceUnavailable { .. } | KeyError::SourceFailed { .. }))) => {
                Err(err)
            }
            Ok(Err(other)) => Err(KeyError::source_failed(name, other.to_string())),
            Err(payload) => Err(KeyError::source_failed(name, panic_message(&*payload))),
        }
    }
}

impl KeyGenerator {
    /// Generator over a boxed source chosen at runtime
    pub fn boxed(source: impl KeySource + 'static) -> Self {
        Self::new(Box::new(source))
    }
}

impl<S: KeySource + Default> Default for KeyGenerator<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        format!("panicked: {msg}")
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        format!("panicked: {msg}")
    } else {
        "panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StaticKeySource;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(validate_key(Some(vec![0; 16]), 16).is_err());
        assert_eq!(validate_key(Some(vec![0; 17]), 16).unwrap().len(), 17);
    }

    #[test]
    fn test_lowered_threshold_is_raised_to_floor() {
        for min in [0, 1, 15] {
            assert!(matches!(
                validate_key(Some(vec![0; 1]), min),
                Err(KeyError::KeyTooShort { minimum: 16, actual: 1 })
            ));
            assert!(matches!(
                validate_key(Some(vec![0; 16]), min),
                Err(KeyError::KeyTooShort { minimum: 16, actual: 16 })
            ));
        }
        assert!(validate_key(Some(vec![0; 17]), 0).is_ok());
    }

    #[test]
    fn test_null_is_empty_output() {
        assert!(matches!(validate_key(None, 16), Err(KeyError::EmptyOutput)));
    }

    #[test]
    fn test_non_unavailable_probe_errors_become_unavailable() {
        struct BadProbe;
        impl KeySource for BadProbe {
            fn name(&self) -> &str {
                "bad-probe"
            }
            fn probe(&self) -> Result<()> {
                Err(KeyError::invalid_input("not configured"))
            }
            fn generate_key(&self) -> Result<Option<Vec<u8>>> {
                Ok(Some(vec![1; 32]))
            }
        }

        let err = KeyGenerator::new(BadProbe).generate().unwrap_err();
        assert!(matches!(
            err,
            KeyError::SourceUnavailable { ref source_name, .. } if source_name == "bad-probe"
        ));
    }

    #[test]
    fn test_panic_payloads_are_described() {
        assert_eq!(panic_message(&"boom"), "panicked: boom");
        assert_eq!(panic_message(&String::from("bang")), "panicked: bang");
        assert_eq!(panic_message(&42u8), "panicked");
    }

    #[test]
    fn test_boxed_generator_accepts_any_source() {
        let generator = KeyGenerator::boxed(StaticKeySource::zeroes(20));
        assert_eq!(generator.source().name(), "static");
        assert!(generator.generate_securely().is_some());
    }
}
