//! # SafeVision Key Generation
//!
//! Validated key generation over pluggable key sources.
//!
//! ## Features
//!
//! - **Key Sources**: ML-KEM public keys, OS entropy, or a scripted fake
//! - **Validation**: keys must be strictly longer than 16 bytes
//! - **Failure Reporting**: tagged errors, or a plain `Option` for callers
//!   that only need to know whether a key was produced
//! - **ML-KEM**: key pairs, serialization, encapsulation
//! - **ML-DSA**: detached signatures (Dilithium2 by default)
//! - **AES-GCM**: message encryption with a prepended random IV
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use safevision_key::{KeyGenerator, LoggingTransformer, MlKemKeySource};
//!
//! LoggingTransformer::init();
//! let generator = KeyGenerator::new(MlKemKeySource::default());
//! match generator.generate_securely() {
//!     Some(key) => println!("Generated public key:\n{}", key.to_display_hex()),
//!     None => eprintln!("Key generation failed"),
//! }
//! ```

#![forbid(unsafe_code)]

pub mod algorithm;
pub mod cipher;
pub mod config;
pub mod digest;
pub mod error;
pub mod generator;
pub mod kem;
pub mod material;
pub mod signature;
pub mod source;

// Re-export core types
pub use algorithm::{KemAlgorithm, SignatureAlgorithm};
pub use config::GeneratorConfig;
pub use error::{FailureKind, KeyError, Result};
pub use generator::{validate_key, KeyGenerator};
pub use kem::{Encapsulation, KemKeyPair};
pub use material::KeyMaterial;
pub use signature::SigningKeyPair;
pub use source::{EntropyKeySource, KeySource, MlKemKeySource, StaticKeySource};

// Logging entry points live in the common crate
pub use safevision_common::LoggingTransformer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        GeneratorConfig, KemAlgorithm, KeyError, KeyGenerator, KeyMaterial, KeySource,
        MlKemKeySource, Result, SignatureAlgorithm, SigningKeyPair,
    };
}
