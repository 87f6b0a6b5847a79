//! Key material container
//!
//! Raw key bytes as handed out by a [`KeyGenerator`](crate::KeyGenerator).
//! The buffer is wiped when dropped and compared in constant time.

use crate::Result;
use safevision_common::fingerprint;
use std::fmt::{self, Write as _};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

/// Opaque key bytes
#[derive(Clone)]
pub struct KeyMaterial {
    bytes: Zeroizing<Vec<u8>>,
}

impl KeyMaterial {
    /// Wrap raw bytes. No validation is performed.
    #[must_use]
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: Zeroizing::new(bytes.into()),
        }
    }

    /// Parse key material from a hex string (either case)
    ///
    /// # Errors
    ///
    /// Returns `InvalidKeyFormat` if the string is not valid hex.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        Ok(Self::new(hex::decode(encoded.trim())?))
    }

    /// Borrow the key bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True when no bytes are held
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Lowercase contiguous hex
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Uppercase hex pairs, each followed by one space (`"0A 1B "`)
    ///
    /// This is the format the key is shown in to users.
    #[must_use]
    pub fn to_display_hex(&self) -> String {
        let mut out = String::with_capacity(self.len() * 3);
        for byte in self.as_bytes() {
            let _ = write!(out, "{byte:02X} ");
        }
        out
    }

    /// Log-safe fingerprint (`#` + 12 hex chars of SHA-256)
    #[must_use]
    pub fn fingerprint(&self) -> String {
        fingerprint(self.as_bytes())
    }

    /// Take the bytes out, still wrapped for zeroization
    #[must_use]
    pub fn into_bytes(self) -> Zeroizing<Vec<u8>> {
        self.bytes
    }
}

impl PartialEq for KeyMaterial {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Eq for KeyMaterial {}

impl AsRef<[u8]> for KeyMaterial {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl From<Vec<u8>> for KeyMaterial {
    fn from(bytes: Vec<u8>) -> Self {
        Self::new(bytes)
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("len", &self.len())
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_hex_matches_presenter_format() {
        let key = KeyMaterial::new(vec![0x0a, 0xff, 0x00]);
        assert_eq!(key.to_display_hex(), "0A FF 00 ");
        assert_eq!(key.to_hex(), "0aff00");
        assert_eq!(KeyMaterial::new(Vec::new()).to_display_hex(), "");
    }

    #[test]
    fn test_debug_never_prints_bytes() {
        let key = KeyMaterial::new(vec![0xde, 0xad, 0xbe, 0xef]);
        let rendered = format!("{key:?}");
        assert!(!rendered.contains("deadbeef"));
        assert!(rendered.contains("len: 4"));
    }

    #[test]
    fn test_equality_compares_contents() {
        assert_eq!(KeyMaterial::new(vec![1, 2, 3]), KeyMaterial::new(vec![1, 2, 3]));
        assert_ne!(KeyMaterial::new(vec![1, 2, 3]), KeyMaterial::new(vec![1, 2, 4]));
        assert_ne!(KeyMaterial::new(vec![1, 2, 3]), KeyMaterial::new(vec![1, 2]));
    }

    #[test]
    fn test_hex_parsing_accepts_both_cases() {
        let key = KeyMaterial::from_hex("0AfF").unwrap();
        assert_eq!(key.as_bytes(), &[0x0a, 0xff]);
        assert!(KeyMaterial::from_hex("zz").is_err());
    }
}
