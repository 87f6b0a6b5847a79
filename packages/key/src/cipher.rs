//! AES-GCM message encryption
//!
//! Sealed messages are laid out as `[IV (12)][ciphertext][tag (16)]`. A
//! fresh random IV is drawn for every message. Keys are 128, 192 or 256
//! bits and travel as raw bytes.

use crate::{KeyError, KeyMaterial, Result};
use aes_gcm::aead::consts::U12;
use aes_gcm::aead::generic_array::GenericArray;
use aes_gcm::aead::{Aead, AeadCore, KeyInit};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm};
use zeroize::Zeroizing;

type Aes192Gcm = AesGcm<Aes192, U12>;

/// GCM IV length in bytes
pub const GCM_IV_LEN: usize = 12;

/// GCM authentication tag length in bytes (128 bits)
pub const GCM_TAG_LEN: usize = 16;

/// Key size used by [`generate_symmetric_key`] callers that have no preference
pub const DEFAULT_SYMMETRIC_KEY_BITS: usize = 128;

/// Accepted AES key lengths in bytes
pub const AES_KEY_LENS: [usize; 3] = [16, 24, 32];

fn check_key(key: &[u8]) -> Result<()> {
    if key.is_empty() {
        return Err(KeyError::invalid_key("AES key is empty"));
    }
    if !AES_KEY_LENS.contains(&key.len()) {
        return Err(KeyError::invalid_key(format!(
            "AES key must be 16, 24 or 32 bytes, got {}",
            key.len()
        )));
    }
    Ok(())
}

/// Generate a random AES key of `bits` (128, 192 or 256)
///
/// # Errors
///
/// Returns `InvalidInput` for any other size and `RandomGeneration` if the
/// OS entropy source fails.
pub fn generate_symmetric_key(bits: usize) -> Result<KeyMaterial> {
    if bits % 8 != 0 || !AES_KEY_LENS.contains(&(bits / 8)) {
        return Err(KeyError::invalid_input(format!(
            "AES key size must be 128, 192 or 256 bits, got {bits}"
        )));
    }

    let mut key = Zeroizing::new(vec![0u8; bits / 8]);
    getrandom::fill(&mut key)?;
    Ok(KeyMaterial::new(std::mem::take(&mut *key)))
}

/// Encrypt `plaintext`, returning `IV || ciphertext || tag`
///
/// # Errors
///
/// Returns `InvalidInput` for an empty message, `InvalidKey` for a bad key,
/// `RandomGeneration` if no IV can be drawn, `EncryptionFailed` if the
/// cipher rejects the input.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<Vec<u8>> {
    if plaintext.is_empty() {
        return Err(KeyError::invalid_input("message is empty"));
    }
    check_key(key)?;

    let mut iv = [0u8; GCM_IV_LEN];
    getrandom::fill(&mut iv)?;

    let ciphertext = match key.len() {
        16 => seal::<Aes128Gcm>(key, &iv, plaintext),
        24 => seal::<Aes192Gcm>(key, &iv, plaintext),
        _ => seal::<Aes256Gcm>(key, &iv, plaintext),
    }?;

    let mut sealed = Vec::with_capacity(GCM_IV_LEN + ciphertext.len());
    sealed.extend_from_slice(&iv);
    sealed.extend_from_slice(&ciphertext);
    Ok(sealed)
}

/// Decrypt a message produced by [`encrypt`]
///
/// # Errors
///
/// Returns `InvalidInput` for empty input, `InvalidKey` for a bad key,
/// `InvalidCiphertext` when the input is shorter than IV plus tag, and
/// `DecryptionFailed` when authentication fails (wrong key or tampering).
pub fn decrypt(key: &[u8], sealed: &[u8]) -> Result<Zeroizing<Vec<u8>>> {
    if sealed.is_empty() {
        return Err(KeyError::invalid_input("encrypted message is empty"));
    }
    check_key(key)?;
    if sealed.len() < GCM_IV_LEN + GCM_TAG_LEN {
        return Err(KeyError::InvalidCiphertext(format!(
            "expected at least {} bytes, got {}",
            GCM_IV_LEN + GCM_TAG_LEN,
            sealed.len()
        )));
    }

    let (iv, ciphertext) = sealed.split_at(GCM_IV_LEN);
    let plaintext = match key.len() {
        16 => open::<Aes128Gcm>(key, iv, ciphertext),
        24 => open::<Aes192Gcm>(key, iv, ciphertext),
        _ => open::<Aes256Gcm>(key, iv, ciphertext),
    }?;
    Ok(Zeroizing::new(plaintext))
}

/// Raw key bytes for storage or transmission
#[must_use]
pub fn serialize_symmetric_key(key: &KeyMaterial) -> Zeroizing<Vec<u8>> {
    Zeroizing::new(key.as_bytes().to_vec())
}

/// Rebuild an AES key from raw bytes
///
/// # Errors
///
/// Returns `InvalidKey` unless `bytes` is 16, 24 or 32 bytes long.
pub fn deserialize_symmetric_key(bytes: &[u8]) -> Result<KeyMaterial> {
    check_key(bytes)?;
    Ok(KeyMaterial::new(bytes.to_vec()))
}

fn seal<C>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>>
where
    C: KeyInit + Aead + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|e| KeyError::invalid_key(e.to_string()))?;
    cipher
        .encrypt(GenericArray::from_slice(iv), plaintext)
        .map_err(|e| KeyError::EncryptionFailed(e.to_string()))
}

fn open<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: KeyInit + Aead + AeadCore<NonceSize = U12>,
{
    let cipher = C::new_from_slice(key).map_err(|e| KeyError::invalid_key(e.to_string()))?;
    cipher
        .decrypt(GenericArray::from_slice(iv), ciphertext)
        .map_err(|e| KeyError::DecryptionFailed(format!("authentication failed: {e}")))
}
