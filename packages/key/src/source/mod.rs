//! Raw key sources
//!
//! A [`KeySource`] produces unvalidated key bytes on demand. It may be
//! backed by a post-quantum KEM, the operating system RNG, or a fixed
//! fake for tests. Validation happens in [`KeyGenerator`](crate::KeyGenerator).

mod entropy;
mod fixed;
mod mlkem;

pub use entropy::EntropyKeySource;
pub use fixed::StaticKeySource;
pub use mlkem::MlKemKeySource;

use crate::Result;
use std::sync::Arc;

/// Provider of raw key material
pub trait KeySource: Send + Sync {
    /// Stable identifier used in diagnostics
    fn name(&self) -> &str;

    /// Check the source can be used at all
    ///
    /// # Errors
    ///
    /// Returns an error describing why the source is unavailable.
    fn probe(&self) -> Result<()> {
        Ok(())
    }

    /// Produce raw key bytes
    ///
    /// `Ok(None)` means the source answered but returned nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying generator failed.
    fn generate_key(&self) -> Result<Option<Vec<u8>>>;
}

impl<S: KeySource + ?Sized> KeySource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn probe(&self) -> Result<()> {
        (**self).probe()
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        (**self).generate_key()
    }
}

impl<S: KeySource + ?Sized> KeySource for Arc<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn probe(&self) -> Result<()> {
        (**self).probe()
    }

    fn generate_key(&self) -> Result<Option<Vec<u8>>> {
        (**self).generate_key()
    }
}
