//! ML-KEM and ML-DSA algorithm selection

use crate::{KeyError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Key Encapsulation Mechanism (KEM) algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum KemAlgorithm {
    /// ML-KEM-512 (NIST security level 1, ~128-bit security)
    /// Formerly known as Kyber512
    #[serde(rename = "ml-kem-512")]
    #[default]
    MlKem512,

    /// ML-KEM-768 (NIST security level 3, ~192-bit security)
    /// Formerly known as Kyber768
    #[serde(rename = "ml-kem-768")]
    MlKem768,

    /// ML-KEM-1024 (NIST security level 5, ~256-bit security)
    /// Formerly known as Kyber1024
    #[serde(rename = "ml-kem-1024")]
    MlKem1024,
}

impl KemAlgorithm {
    /// Every algorithm this crate can generate keys for
    #[must_use]
    pub const fn supported() -> &'static [KemAlgorithm] {
        &[Self::MlKem512, Self::MlKem768, Self::MlKem1024]
    }

    /// Whether `name` parses to a supported algorithm
    #[must_use]
    pub fn is_supported(name: &str) -> bool {
        name.parse::<Self>().is_ok()
    }

    /// Get the security level of the algorithm
    #[must_use]
    pub fn security_level(&self) -> u8 {
        match self {
            Self::MlKem512 => 1,
            Self::MlKem768 => 3,
            Self::MlKem1024 => 5,
        }
    }

    /// Get the public key size in bytes
    #[must_use]
    pub fn public_key_size(&self) -> usize {
        match self {
            Self::MlKem512 => 800,
            Self::MlKem768 => 1184,
            Self::MlKem1024 => 1568,
        }
    }

    /// Get the secret key size in bytes
    #[must_use]
    pub fn secret_key_size(&self) -> usize {
        match self {
            Self::MlKem512 => 1632,
            Self::MlKem768 => 2400,
            Self::MlKem1024 => 3168,
        }
    }

    /// Get the ciphertext size in bytes
    #[must_use]
    pub fn ciphertext_size(&self) -> usize {
        match self {
            Self::MlKem512 => 768,
            Self::MlKem768 => 1088,
            Self::MlKem1024 => 1568,
        }
    }

    /// Get the shared secret size in bytes (always 32 for ML-KEM)
    #[must_use]
    pub fn shared_secret_size(&self) -> usize {
        32
    }
}

impl fmt::Display for KemAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MlKem512 => write!(f, "ML-KEM-512"),
            Self::MlKem768 => write!(f, "ML-KEM-768"),
            Self::MlKem1024 => write!(f, "ML-KEM-1024"),
        }
    }
}

impl FromStr for KemAlgorithm {
    type Err = KeyError;

    /// Accepts `ML-KEM-512` style names and the legacy Kyber spellings
    /// (`Kyber512`, `KYBER_512`), ignoring case and separators.
    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "mlkem512" | "kyber512" => Ok(Self::MlKem512),
            "mlkem768" | "kyber768" => Ok(Self::MlKem768),
            "mlkem1024" | "kyber1024" => Ok(Self::MlKem1024),
            _ => Err(KeyError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

/// Digital signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SignatureAlgorithm {
    /// ML-DSA-44 (NIST security level 2)
    /// Formerly known as Dilithium2
    #[serde(rename = "ml-dsa-44")]
    #[default]
    MlDsa44,

    /// ML-DSA-65 (NIST security level 3)
    /// Formerly known as Dilithium3
    #[serde(rename = "ml-dsa-65")]
    MlDsa65,

    /// ML-DSA-87 (NIST security level 5)
    /// Formerly known as Dilithium5
    #[serde(rename = "ml-dsa-87")]
    MlDsa87,
}

impl SignatureAlgorithm {
    /// Every signature algorithm this crate implements
    #[must_use]
    pub const fn supported() -> &'static [SignatureAlgorithm] {
        &[Self::MlDsa44, Self::MlDsa65, Self::MlDsa87]
    }

    /// Get the security level of the algorithm
    #[must_use]
    pub fn security_level(&self) -> u8 {
        match self {
            Self::MlDsa44 => 2,
            Self::MlDsa65 => 3,
            Self::MlDsa87 => 5,
        }
    }

    /// Get the public key size in bytes
    #[must_use]
    pub fn public_key_size(&self) -> usize {
        match self {
            Self::MlDsa44 => 1312,
            Self::MlDsa65 => 1952,
            Self::MlDsa87 => 2592,
        }
    }

    /// Get the secret key size in bytes
    #[must_use]
    pub fn secret_key_size(&self) -> usize {
        match self {
            Self::MlDsa44 => 2560,
            Self::MlDsa65 => 4032,
            Self::MlDsa87 => 4896,
        }
    }

    /// Get the detached signature size in bytes
    #[must_use]
    pub fn signature_size(&self) -> usize {
        match self {
            Self::MlDsa44 => 2420,
            Self::MlDsa65 => 3309,
            Self::MlDsa87 => 4627,
        }
    }
}

impl fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MlDsa44 => write!(f, "ML-DSA-44"),
            Self::MlDsa65 => write!(f, "ML-DSA-65"),
            Self::MlDsa87 => write!(f, "ML-DSA-87"),
        }
    }
}

impl FromStr for SignatureAlgorithm {
    type Err = KeyError;

    /// Accepts `ML-DSA-44` style names and the legacy Dilithium spellings
    /// (`Dilithium2`, `DILITHIUM_3`), ignoring case and separators.
    fn from_str(s: &str) -> Result<Self> {
        match normalize(s).as_str() {
            "mldsa44" | "dilithium2" => Ok(Self::MlDsa44),
            "mldsa65" | "dilithium3" => Ok(Self::MlDsa65),
            "mldsa87" | "dilithium5" => Ok(Self::MlDsa87),
            _ => Err(KeyError::UnsupportedAlgorithm(s.to_string())),
        }
    }
}

fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}
