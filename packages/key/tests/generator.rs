//! Tests for `KeyGenerator` - pass-through, rejection and failure collapsing

use proptest::prelude::*;
use safevision_key::{
    config::MIN_KEY_LEN_ENV, EntropyKeySource, FailureKind, GeneratorConfig, KemAlgorithm,
    KeyError, KeyGenerator, KeySource, MlKemKeySource, Result, StaticKeySource,
};
use std::sync::Arc;

struct PanickingSource;

impl KeySource for PanickingSource {
    fn name(&self) -> &str {
        "panicking"
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        panic!("native call aborted");
    }
}

#[test]
fn test_32_zero_bytes_pass_through() {
    let generator = KeyGenerator::new(StaticKeySource::zeroes(32));
    let key = generator.generate_securely().expect("32 bytes is a valid key");
    assert_eq!(key.as_bytes(), &[0u8; 32]);
}

#[test]
fn test_8_bytes_rejected() {
    let generator = KeyGenerator::new(StaticKeySource::returning(vec![7u8; 8]));
    assert!(generator.generate_securely().is_none());

    let err = generator.generate().unwrap_err();
    assert!(matches!(err, KeyError::KeyTooShort { minimum: 16, actual: 8 }));
    assert_eq!(err.kind(), FailureKind::InvalidOutput);
}

#[test]
fn test_empty_sequence_rejected() {
    let generator = KeyGenerator::new(StaticKeySource::returning(Vec::new()));
    assert!(generator.generate_securely().is_none());
    assert!(matches!(
        generator.generate(),
        Err(KeyError::KeyTooShort { actual: 0, .. })
    ));
}

#[test]
fn test_exactly_16_bytes_rejected() {
    let generator = KeyGenerator::new(StaticKeySource::zeroes(16));
    assert!(generator.generate_securely().is_none());

    let generator = KeyGenerator::new(StaticKeySource::zeroes(17));
    assert_eq!(generator.generate_securely().map(|k| k.len()), Some(17));
}

#[test]
fn test_null_output_rejected() {
    let generator = KeyGenerator::new(StaticKeySource::null());
    assert!(generator.generate_securely().is_none());

    let err = generator.generate().unwrap_err();
    assert!(matches!(err, KeyError::EmptyOutput));
    assert_eq!(err.kind(), FailureKind::InvalidOutput);
}

#[test]
fn test_unavailable_source_collapses_to_none() {
    let generator = KeyGenerator::new(StaticKeySource::unavailable("libnative-lib.so not found"));
    assert!(generator.generate_securely().is_none());

    let err = generator.generate().unwrap_err();
    assert_eq!(err.kind(), FailureKind::Unavailable);
    assert!(err.to_string().contains("libnative-lib.so not found"));
}

#[test]
fn test_failing_source_collapses_to_none() {
    let generator = KeyGenerator::new(StaticKeySource::failing("keypair generation failed"));
    assert!(generator.generate_securely().is_none());
    assert_eq!(
        generator.generate().unwrap_err().kind(),
        FailureKind::SourceFailed
    );
}

#[test]
fn test_panicking_source_does_not_propagate() {
    let generator = KeyGenerator::new(PanickingSource);
    assert!(generator.generate_securely().is_none());

    match generator.generate() {
        Err(KeyError::SourceFailed {
            source_name,
            reason,
        }) => {
            assert_eq!(source_name, "panicking");
            assert!(reason.contains("native call aborted"));
        }
        other => panic!("expected SourceFailed, got {other:?}"),
    }
}

#[test]
fn test_configured_threshold() {
    let config = GeneratorConfig::release().with_min_key_len(32);
    let generator = KeyGenerator::with_config(StaticKeySource::zeroes(32), config);
    assert!(generator.generate_securely().is_none());

    let generator = KeyGenerator::with_config(StaticKeySource::zeroes(33), config);
    assert!(generator.generate_securely().is_some());
}

#[test]
fn test_configured_threshold_cannot_go_below_16_bytes() {
    let lookup = |name: &str| (name == MIN_KEY_LEN_ENV).then(|| "0".to_string());
    let lowered = [
        GeneratorConfig::from_lookup(lookup),
        GeneratorConfig::release().with_min_key_len(0),
        GeneratorConfig {
            min_key_len: 0,
            ..GeneratorConfig::release()
        },
    ];

    for config in lowered {
        for len in [1, 16] {
            let generator = KeyGenerator::with_config(StaticKeySource::zeroes(len), config);
            assert!(generator.generate_securely().is_none(), "{len} bytes accepted");
            assert!(matches!(
                generator.generate(),
                Err(KeyError::KeyTooShort { minimum: 16, .. })
            ));
        }

        let generator = KeyGenerator::with_config(StaticKeySource::zeroes(17), config);
        assert!(generator.generate_securely().is_some());
    }
}

#[test]
fn test_shared_source_behind_arc() {
    let source: Arc<dyn KeySource> = Arc::new(StaticKeySource::zeroes(24));
    let first = KeyGenerator::new(Arc::clone(&source));
    let second = KeyGenerator::new(source);

    assert_eq!(first.generate_securely(), second.generate_securely());
}

#[test]
fn test_ml_kem_source_yields_public_keys() {
    for alg in KemAlgorithm::supported() {
        let generator = KeyGenerator::new(MlKemKeySource::new(*alg));
        let key = generator.generate_securely().expect("ML-KEM keygen succeeds");
        assert_eq!(key.len(), alg.public_key_size());
    }
}

#[test]
fn test_ml_kem_keys_are_fresh_per_call() {
    let generator: KeyGenerator<MlKemKeySource> = KeyGenerator::default();
    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    assert_ne!(a, b);
}

#[test]
fn test_entropy_source() {
    let generator = KeyGenerator::new(EntropyKeySource::new(32));
    let a = generator.generate().unwrap();
    let b = generator.generate().unwrap();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);
}

#[test]
fn test_entropy_source_of_zero_length_is_unavailable() {
    let generator = KeyGenerator::new(EntropyKeySource::new(0));
    assert_eq!(
        generator.generate().unwrap_err().kind(),
        FailureKind::Unavailable
    );
}

#[test]
fn test_entropy_source_too_short_for_threshold() {
    let generator = KeyGenerator::new(EntropyKeySource::new(16));
    assert!(matches!(
        generator.generate(),
        Err(KeyError::KeyTooShort { actual: 16, .. })
    ));
}

proptest! {
    #[test]
    fn prop_long_output_passes_through_unmodified(bytes in prop::collection::vec(any::<u8>(), 17..512)) {
        let generator = KeyGenerator::new(StaticKeySource::returning(bytes.clone()));
        let key = generator.generate_securely();
        prop_assert!(key.is_some());
        let key = key.unwrap();
        prop_assert_eq!(key.as_bytes(), bytes.as_slice());
    }

    #[test]
    fn prop_short_output_is_rejected(bytes in prop::collection::vec(any::<u8>(), 0..=16)) {
        let generator = KeyGenerator::new(StaticKeySource::returning(bytes));
        prop_assert!(generator.generate_securely().is_none());
    }

    #[test]
    fn prop_any_failure_reason_is_contained(reason in ".*") {
        let failing = KeyGenerator::new(StaticKeySource::failing(reason.clone()));
        prop_assert!(failing.generate_securely().is_none());

        let unavailable = KeyGenerator::new(StaticKeySource::unavailable(reason));
        prop_assert!(unavailable.generate_securely().is_none());
    }
}
