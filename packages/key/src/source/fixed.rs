//! Deterministic key source for tests and demos

use super::KeySource;
use crate::{KeyError, Result};

#[derive(Debug, Clone)]
enum Behavior {
    Returns(Vec<u8>),
    Null,
    Fails(String),
    Unavailable(String),
}

/// Key source with a scripted, repeatable answer
#[derive(Debug, Clone)]
pub struct StaticKeySource {
    name: String,
    behavior: Behavior,
}

impl StaticKeySource {
    /// Always return `bytes`
    #[must_use]
    pub fn returning(bytes: impl Into<Vec<u8>>) -> Self {
        Self::with_behavior(Behavior::Returns(bytes.into()))
    }

    /// Always return `len` zero bytes
    #[must_use]
    pub fn zeroes(len: usize) -> Self {
        Self::returning(vec![0u8; len])
    }

    /// Always answer with no data
    #[must_use]
    pub fn null() -> Self {
        Self::with_behavior(Behavior::Null)
    }

    /// Pass the probe but fail every call
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fails(reason.into()))
    }

    /// Fail the probe, as a source whose backing library did not load
    #[must_use]
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Unavailable(reason.into()))
    }

    /// Override the diagnostic name
    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            name: "static".to_string(),
            behavior,
        }
    }
}

impl KeySource for StaticKeySource {
    fn name(&self) -> &str {
        &self.name
    }

    fn probe(&self) -> Result<()> {
        match &self.behavior {
            Behavior::Unavailable(reason) => Err(KeyError::unavailable(&self.name, reason)),
            _ => Ok(()),
        }
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        match &self.behavior {
            Behavior::Returns(bytes) => Ok(Some(bytes.clone())),
            Behavior::Null => Ok(None),
            Behavior::Fails(reason) => Err(KeyError::source_failed(&self.name, reason)),
            Behavior::Unavailable(reason) => Err(KeyError::unavailable(&self.name, reason)),
        }
    }
}
