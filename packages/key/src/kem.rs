//! ML-KEM key pairs, serialization and encapsulation
//!
//! Thin, validated wrappers around `pqcrypto-mlkem`. Keys travel as raw
//! bytes; every deserialization path checks emptiness and size before the
//! bytes reach the backend.

use crate::{KemAlgorithm, KeyError, KeyMaterial, Result};
use pqcrypto_traits::kem::{
    Ciphertext as PqCiphertext, PublicKey as PqPublicKey, SecretKey as PqSecretKey,
    SharedSecret as PqSharedSecret,
};
use std::fmt;
use zeroize::Zeroizing;

/// Run `$body` with `$m` bound to the pqcrypto module for `$alg`
macro_rules! with_mlkem {
    ($alg:expr, $m:ident => $body:expr) => {
        match $alg {
            KemAlgorithm::MlKem512 => {
                use pqcrypto_mlkem::mlkem512 as $m;
                $body
            }
            KemAlgorithm::MlKem768 => {
                use pqcrypto_mlkem::mlkem768 as $m;
                $body
            }
            KemAlgorithm::MlKem1024 => {
                use pqcrypto_mlkem::mlkem1024 as $m;
                $body
            }
        }
    };
}

pub(crate) fn check_len(what: &str, bytes: &[u8], expected: usize) -> Result<()> {
    if bytes.is_empty() {
        return Err(KeyError::invalid_key(format!("{what} is empty")));
    }
    if bytes.len() != expected {
        return Err(KeyError::InvalidKeySize {
            expected,
            actual: bytes.len(),
        });
    }
    Ok(())
}

/// ML-KEM key pair
#[derive(Clone)]
pub struct KemKeyPair {
    algorithm: KemAlgorithm,
    public_key: Vec<u8>,
    secret_key: Zeroizing<Vec<u8>>,
}

impl KemKeyPair {
    /// Generate a fresh key pair
    #[must_use]
    pub fn generate(algorithm: KemAlgorithm) -> Self {
        let (public_key, secret_key) = with_mlkem!(algorithm, m => {
            let (pk, sk) = m::keypair();
            (
                PqPublicKey::as_bytes(&pk).to_vec(),
                Zeroizing::new(PqSecretKey::as_bytes(&sk).to_vec()),
            )
        });

        Self {
            algorithm,
            public_key,
            secret_key,
        }
    }

    /// Rebuild a key pair from serialized halves
    ///
    /// # Errors
    ///
    /// Returns `InvalidKey` for empty input, `InvalidKeySize` when a half
    /// does not match the algorithm, `InvalidKeyFormat` if the backend
    /// rejects the bytes.
    pub fn from_bytes(
        algorithm: KemAlgorithm,
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<Self> {
        let public_key = deserialize_public_key(algorithm, public_key)?;
        let secret_key = deserialize_secret_key(algorithm, secret_key)?;

        Ok(Self {
            algorithm,
            public_key,
            secret_key,
        })
    }

    /// Algorithm of this key pair
    #[must_use]
    pub fn algorithm(&self) -> KemAlgorithm {
        self.algorithm
    }

    /// Public key bytes
    #[must_use]
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Secret key bytes
    #[must_use]
    pub fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// Serialized public key, suitable for transmission
    #[must_use]
    pub fn serialize_public_key(&self) -> Vec<u8> {
        self.public_key.clone()
    }

    /// Serialized secret key, wiped when dropped
    #[must_use]
    pub fn serialize_secret_key(&self) -> Zeroizing<Vec<u8>> {
        self.secret_key.clone()
    }

    /// Split into `(public, secret)`
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        (self.public_key, self.secret_key)
    }

    /// Recover the shared secret from a ciphertext
    ///
    /// # Errors
    ///
    /// Returns `InvalidCiphertext` for empty or wrongly sized ciphertexts.
    pub fn decapsulate(&self, ciphertext: &[u8]) -> Result<KeyMaterial> {
        let expected = self.algorithm.ciphertext_size();
        if ciphertext.is_empty() {
            return Err(KeyError::InvalidCiphertext("ciphertext is empty".to_string()));
        }
        if ciphertext.len() != expected {
            return Err(KeyError::InvalidCiphertext(format!(
                "expected {expected} bytes, got {}",
                ciphertext.len()
            )));
        }

        let shared = with_mlkem!(self.algorithm, m => {
            let sk = <m::SecretKey as PqSecretKey>::from_bytes(&self.secret_key)
                .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
            let ct = <m::Ciphertext as PqCiphertext>::from_bytes(ciphertext)
                .map_err(|e| KeyError::InvalidCiphertext(format!("{e:?}")))?;
            let ss = m::decapsulate(&ct, &sk);
            PqSharedSecret::as_bytes(&ss).to_vec()
        });

        Ok(KeyMaterial::new(shared))
    }
}

impl fmt::Debug for KemKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KemKeyPair")
            .field("algorithm", &self.algorithm)
            .field("public_key_len", &self.public_key.len())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Result of encapsulating against a public key
#[derive(Debug, Clone)]
pub struct Encapsulation {
    algorithm: KemAlgorithm,
    ciphertext: Vec<u8>,
    shared_secret: KeyMaterial,
}

impl Encapsulation {
    /// Algorithm used
    #[must_use]
    pub fn algorithm(&self) -> KemAlgorithm {
        self.algorithm
    }

    /// Ciphertext to send to the key pair owner
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// Shared secret kept by the encapsulator
    #[must_use]
    pub fn shared_secret(&self) -> &KeyMaterial {
        &self.shared_secret
    }

    /// Split into `(ciphertext, shared_secret)`
    #[must_use]
    pub fn into_parts(self) -> (Vec<u8>, KeyMaterial) {
        (self.ciphertext, self.shared_secret)
    }
}

/// Encapsulate a fresh shared secret to `public_key`
///
/// # Errors
///
/// Fails the same way as [`deserialize_public_key`].
pub fn encapsulate(algorithm: KemAlgorithm, public_key: &[u8]) -> Result<Encapsulation> {
    check_len("public key", public_key, algorithm.public_key_size())?;

    let (ciphertext, shared) = with_mlkem!(algorithm, m => {
        let pk = <m::PublicKey as PqPublicKey>::from_bytes(public_key)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        let (ss, ct) = m::encapsulate(&pk);
        (
            PqCiphertext::as_bytes(&ct).to_vec(),
            PqSharedSecret::as_bytes(&ss).to_vec(),
        )
    });

    Ok(Encapsulation {
        algorithm,
        ciphertext,
        shared_secret: KeyMaterial::new(shared),
    })
}

/// Generate a key pair and return it serialized as `(public, secret)`
#[must_use]
pub fn generate_and_serialize(algorithm: KemAlgorithm) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
    KemKeyPair::generate(algorithm).into_parts()
}

/// Validate serialized public key bytes for `algorithm`
///
/// # Errors
///
/// Returns `InvalidKey` for empty input, `InvalidKeySize` on a size
/// mismatch, `InvalidKeyFormat` if the backend rejects the bytes.
pub fn deserialize_public_key(algorithm: KemAlgorithm, bytes: &[u8]) -> Result<Vec<u8>> {
    check_len("public key", bytes, algorithm.public_key_size())?;
    with_mlkem!(algorithm, m => {
        let pk = <m::PublicKey as PqPublicKey>::from_bytes(bytes)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        Ok(PqPublicKey::as_bytes(&pk).to_vec())
    })
}

/// Validate serialized secret key bytes for `algorithm`
///
/// # Errors
///
/// Same conditions as [`deserialize_public_key`].
pub fn deserialize_secret_key(
    algorithm: KemAlgorithm,
    bytes: &[u8],
) -> Result<Zeroizing<Vec<u8>>> {
    check_len("secret key", bytes, algorithm.secret_key_size())?;
    with_mlkem!(algorithm, m => {
        let sk = <m::SecretKey as PqSecretKey>::from_bytes(bytes)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        Ok(Zeroizing::new(PqSecretKey::as_bytes(&sk).to_vec()))
    })
}
