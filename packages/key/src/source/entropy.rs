//! Operating system entropy key source

use super::KeySource;
use crate::{KeyError, Result};

/// Default output length: 256 bits
const DEFAULT_LENGTH: usize = 32;

/// Reads `length` bytes from the OS random number generator per call
#[derive(Debug, Clone, Copy)]
pub struct EntropyKeySource {
    length: usize,
}

impl EntropyKeySource {
    /// Source producing `length` bytes per call
    #[must_use]
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Bytes produced per call
    #[must_use]
    pub fn length(&self) -> usize {
        self.length
    }
}

impl Default for EntropyKeySource {
    fn default() -> Self {
        Self::new(DEFAULT_LENGTH)
    }
}

impl KeySource for EntropyKeySource {
    fn name(&self) -> &str {
        "os-entropy"
    }

    fn probe(&self) -> Result<()> {
        if self.length == 0 {
            return Err(KeyError::invalid_input("entropy length must be non-zero"));
        }
        let mut scratch = [0u8; 1];
        getrandom::fill(&mut scratch)?;
        Ok(())
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        let mut bytes = vec![0u8; self.length];
        getrandom::fill(&mut bytes)?;
        Ok(Some(bytes))
    }
}
