//! ML-DSA (Dilithium) detached signatures
//!
//! Signing and verification over raw key bytes. Every input is checked for
//! emptiness and size before it reaches `pqcrypto-mldsa`.

use crate::kem::check_len;
use crate::{KeyError, Result, SignatureAlgorithm};
use pqcrypto_traits::sign::{
    DetachedSignature as PqDetachedSignature, PublicKey as PqPublicKey,
    SecretKey as PqSecretKey,
};
use std::fmt;
use zeroize::Zeroizing;

/// Run `$body` with `$m` bound to the pqcrypto module for `$alg`
macro_rules! with_mldsa {
    ($alg:expr, $m:ident => $body:expr) => {
        match $alg {
            SignatureAlgorithm::MlDsa44 => {
                use pqcrypto_mldsa::mldsa44 as $m;
                $body
            }
            SignatureAlgorithm::MlDsa65 => {
                use pqcrypto_mldsa::mldsa65 as $m;
                $body
            }
            SignatureAlgorithm::MlDsa87 => {
                use pqcrypto_mldsa::mldsa87 as $m;
                $body
            }
        }
    };
}

fn require_data(data: &[u8]) -> Result<()> {
    if data.is_empty() {
        return Err(KeyError::invalid_input("data to sign or verify is empty"));
    }
    Ok(())
}

/// ML-DSA signing key pair
#[derive(Clone)]
pub struct SigningKeyPair {
    algorithm: SignatureAlgorithm,
    public_key: Vec<u8>,
    secret_key: Zeroizing<Vec<u8>>,
}

impl SigningKeyPair {
    /// Generate a fresh key pair
    #[must_use]
    pub fn generate(algorithm: SignatureAlgorithm) -> Self {
        let (public_key, secret_key) = with_mldsa!(algorithm, m => {
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
    /// Returns `InvalidKey` for an empty half, `InvalidKeySize` when a half
    /// does not match the algorithm, `InvalidKeyFormat` if the backend
    /// rejects the bytes.
    pub fn from_bytes(
        algorithm: SignatureAlgorithm,
        public_key: &[u8],
        secret_key: &[u8],
    ) -> Result<Self> {
        check_len("public key", public_key, algorithm.public_key_size())?;
        check_len("secret key", secret_key, algorithm.secret_key_size())?;
        with_mldsa!(algorithm, m => {
            <m::PublicKey as PqPublicKey>::from_bytes(public_key)
                .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
            <m::SecretKey as PqSecretKey>::from_bytes(secret_key)
                .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        });

        Ok(Self {
            algorithm,
            public_key: public_key.to_vec(),
            secret_key: Zeroizing::new(secret_key.to_vec()),
        })
    }

    /// Algorithm of this key pair
    #[must_use]
    pub fn algorithm(&self) -> SignatureAlgorithm {
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

    /// Sign `data` with this key pair's secret key
    ///
    /// # Errors
    ///
    /// See [`sign`].
    pub fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        sign(self.algorithm, data, &self.secret_key)
    }

    /// Verify `signature` over `data` with this key pair's public key
    ///
    /// # Errors
    ///
    /// See [`verify`].
    pub fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        verify(self.algorithm, data, signature, &self.public_key)
    }
}

impl fmt::Debug for SigningKeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKeyPair")
            .field("algorithm", &self.algorithm)
            .field("public_key_len", &self.public_key.len())
            .field("secret_key", &"<redacted>")
            .finish()
    }
}

/// Produce a detached signature over `data`
///
/// # Errors
///
/// Returns `InvalidInput` for empty data and the key errors of
/// [`SigningKeyPair::from_bytes`] for a bad secret key.
pub fn sign(algorithm: SignatureAlgorithm, data: &[u8], secret_key: &[u8]) -> Result<Vec<u8>> {
    require_data(data)?;
    check_len("secret key", secret_key, algorithm.secret_key_size())?;

    with_mldsa!(algorithm, m => {
        let sk = <m::SecretKey as PqSecretKey>::from_bytes(secret_key)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        let sig = m::detached_sign(data, &sk);
        Ok(PqDetachedSignature::as_bytes(&sig).to_vec())
    })
}

/// Check a detached signature over `data`
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
///
/// # Errors
///
/// Returns `InvalidInput` for empty data, `InvalidSignature` for an empty
/// or wrongly sized signature, and the key errors of
/// [`SigningKeyPair::from_bytes`] for a bad public key.
pub fn verify(
    algorithm: SignatureAlgorithm,
    data: &[u8],
    signature: &[u8],
    public_key: &[u8],
) -> Result<bool> {
    require_data(data)?;
    if signature.is_empty() {
        return Err(KeyError::InvalidSignature("signature is empty".to_string()));
    }
    if signature.len() != algorithm.signature_size() {
        return Err(KeyError::InvalidSignature(format!(
            "expected {} bytes, got {}",
            algorithm.signature_size(),
            signature.len()
        )));
    }
    check_len("public key", public_key, algorithm.public_key_size())?;

    with_mldsa!(algorithm, m => {
        let pk = <m::PublicKey as PqPublicKey>::from_bytes(public_key)
            .map_err(|e| KeyError::InvalidKeyFormat(format!("{e:?}")))?;
        let sig = <m::DetachedSignature as PqDetachedSignature>::from_bytes(signature)
            .map_err(|e| KeyError::InvalidSignature(format!("{e:?}")))?;
        Ok(m::verify_detached_signature(&sig, data, &pk).is_ok())
    })
}
