//! ML-KEM backed key source

use super::KeySource;
use crate::{KemAlgorithm, KemKeyPair, Result};

/// Generates a fresh ML-KEM key pair per call and hands out the public key
///
/// The secret half is dropped (and wiped) before the call returns.
#[derive(Debug, Clone, Copy, Default)]
pub struct MlKemKeySource {
    algorithm: KemAlgorithm,
}

impl MlKemKeySource {
    /// Source for the given parameter set
    #[must_use]
    pub fn new(algorithm: KemAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Parameter set in use
    #[must_use]
    pub fn algorithm(&self) -> KemAlgorithm {
        self.algorithm
    }
}

impl KeySource for MlKemKeySource {
    fn name(&self) -> &str {
        match self.algorithm {
            KemAlgorithm::MlKem512 => "ml-kem-512",
            KemAlgorithm::MlKem768 => "ml-kem-768",
            KemAlgorithm::MlKem1024 => "ml-kem-1024",
        }
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        let (public_key, _secret_key) = KemKeyPair::generate(self.algorithm).into_parts();
        Ok(Some(public_key))
    }
}
