//! Tests for ML-DSA detached signatures

use safevision_key::signature::{sign, verify};
use safevision_key::{KeyError, SignatureAlgorithm, SigningKeyPair};

#[test]
fn test_generated_sizes_match_algorithm() {
    for alg in SignatureAlgorithm::supported() {
        let pair = SigningKeyPair::generate(*alg);
        assert_eq!(pair.algorithm(), *alg);
        assert_eq!(pair.public_key().len(), alg.public_key_size());
        assert_eq!(pair.secret_key().len(), alg.secret_key_size());
    }
}

#[test]
fn test_sign_then_verify() {
    for alg in SignatureAlgorithm::supported() {
        let pair = SigningKeyPair::generate(*alg);
        let signature = pair.sign(b"firmware image v2").unwrap();

        assert_eq!(signature.len(), alg.signature_size());
        assert!(pair.verify(b"firmware image v2", &signature).unwrap());
        assert!(verify(*alg, b"firmware image v2", &signature, pair.public_key()).unwrap());
    }
}

#[test]
fn test_mismatches_verify_false() {
    let alg = SignatureAlgorithm::default();
    let pair = SigningKeyPair::generate(alg);
    let other = SigningKeyPair::generate(alg);
    let signature = sign(alg, b"original", pair.secret_key()).unwrap();

    assert!(!pair.verify(b"altered", &signature).unwrap());
    assert!(!other.verify(b"original", &signature).unwrap());

    let mut flipped = signature.clone();
    flipped[0] ^= 0xff;
    assert!(!pair.verify(b"original", &flipped).unwrap());
}

#[test]
fn test_empty_inputs_rejected() {
    let alg = SignatureAlgorithm::MlDsa44;
    let pair = SigningKeyPair::generate(alg);
    let signature = pair.sign(b"data").unwrap();

    assert!(matches!(pair.sign(b""), Err(KeyError::InvalidInput(_))));
    assert!(matches!(sign(alg, b"data", &[]), Err(KeyError::InvalidKey(_))));
    assert!(matches!(
        pair.verify(b"", &signature),
        Err(KeyError::InvalidInput(_))
    ));
    assert!(matches!(
        pair.verify(b"data", &[]),
        Err(KeyError::InvalidSignature(_))
    ));
    assert!(matches!(
        verify(alg, b"data", &signature, &[]),
        Err(KeyError::InvalidKey(_))
    ));
}

#[test]
fn test_wrong_sizes_rejected() {
    let alg = SignatureAlgorithm::MlDsa44;
    let pair = SigningKeyPair::generate(alg);
    let signature = pair.sign(b"data").unwrap();

    assert!(matches!(
        sign(alg, b"data", &[1u8; 32]),
        Err(KeyError::InvalidKeySize { expected: 2560, actual: 32 })
    ));
    assert!(matches!(
        pair.verify(b"data", &signature[..100]),
        Err(KeyError::InvalidSignature(_))
    ));

    // ML-DSA-44 signature checked as ML-DSA-65
    let bigger = SignatureAlgorithm::MlDsa65;
    assert!(matches!(
        verify(bigger, b"data", &signature, pair.public_key()),
        Err(KeyError::InvalidSignature(_))
    ));
}

#[test]
fn test_key_pair_restores_from_bytes() {
    let alg = SignatureAlgorithm::MlDsa65;
    let pair = SigningKeyPair::generate(alg);
    let restored = SigningKeyPair::from_bytes(alg, pair.public_key(), pair.secret_key()).unwrap();

    let signature = restored.sign(b"restored").unwrap();
    assert!(pair.verify(b"restored", &signature).unwrap());

    assert!(matches!(
        SigningKeyPair::from_bytes(alg, &pair.public_key()[1..], pair.secret_key()),
        Err(KeyError::InvalidKeySize { .. })
    ));
}

#[test]
fn test_debug_redacts_secret_key() {
    let pair = SigningKeyPair::generate(SignatureAlgorithm::MlDsa44);
    let rendered = format!("{pair:?}");
    assert!(rendered.contains("<redacted>"));
    assert!(!rendered.contains(&format!("{:?}", &pair.secret_key()[..4])));
}
