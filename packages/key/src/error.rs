//! Error handling for key generation

use thiserror::Error;

/// Key-specific errors
#[derive(Debug, Error)]
pub enum KeyError {
    /// The key source could not be brought up (library missing, hardware absent)
    #[error("Key source '{source_name}' unavailable: {reason}")]
    SourceUnavailable {
        /// Name of the source that failed its probe
        source_name: String,
        /// Reason reported by the source
        reason: String,
    },

    /// The key source was reachable but the generation call failed
    #[error("Key source '{source_name}' failed: {reason}")]
    SourceFailed {
        /// Name of the failing source
        source_name: String,
        /// Reason reported by the source
        reason: String,
    },

    /// The key source returned no data
    #[error("Key source returned no key material")]
    EmptyOutput,

    /// The key source returned too few bytes
    #[error("Key too short: more than {minimum} bytes required, got {actual}")]
    KeyTooShort {
        /// Exclusive lower bound on the key length
        minimum: usize,
        /// Actual key length
        actual: usize,
    },

    /// Invalid key provided
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Key bytes rejected by the cryptographic backend
    #[error("Invalid key format: {0}")]
    InvalidKeyFormat(String),

    /// Invalid key size provided
    #[error("Invalid key size: expected {expected}, got {actual}")]
    InvalidKeySize {
        /// Expected key size in bytes
        expected: usize,
        /// Actual key size in bytes
        actual: usize,
    },

    /// Invalid or corrupted ciphertext
    #[error("Invalid ciphertext: {0}")]
    InvalidCiphertext(String),

    /// Malformed detached signature
    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    /// Symmetric encryption failed
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    /// Symmetric decryption or authentication failed
    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    /// Unsupported algorithm
    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Random number generation failed
    #[error("Random number generation failed: {0}")]
    RandomGeneration(String),
}

/// Coarse classification of a failed generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The source could not be brought up
    Unavailable,
    /// The source call itself failed
    SourceFailed,
    /// The source answered with null or too-short output
    InvalidOutput,
    /// Any other error (bad input to key pair, cipher, signature or digest operations)
    Other,
}

impl KeyError {
    /// Create a `SourceUnavailable` error
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a `SourceFailed` error
    pub fn source_failed(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SourceFailed {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    /// Create an `InvalidKey` error
    pub fn invalid_key(msg: impl Into<String>) -> Self {
        Self::InvalidKey(msg.into())
    }

    /// Create an `InvalidInput` error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Classify this error
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::SourceUnavailable { .. } => FailureKind::Unavailable,
            Self::SourceFailed { .. } | Self::RandomGeneration(_) => FailureKind::SourceFailed,
            Self::EmptyOutput | Self::KeyTooShort { .. } => FailureKind::InvalidOutput,
            _ => FailureKind::Other,
        }
    }
}

impl From<getrandom::Error> for KeyError {
    fn from(err: getrandom::Error) -> Self {
        Self::RandomGeneration(err.to_string())
    }
}

impl From<hex::FromHexError> for KeyError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidKeyFormat(format!("Hex decode error: {err}"))
    }
}

/// Result type for key operations
pub type Result<T> = std::result::Result<T, KeyError>;
