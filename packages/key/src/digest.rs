//! SHA-256 digests and HMAC-SHA256 tags over messages

use crate::{KeyError, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// SHA-256 of a non-empty message
///
/// # Errors
///
/// Returns `InvalidInput` if `message` is empty.
pub fn sha256(message: &[u8]) -> Result<[u8; 32]> {
    if message.is_empty() {
        return Err(KeyError::invalid_input("message cannot be empty"));
    }
    Ok(Sha256::digest(message).into())
}

/// HMAC-SHA256 tag of `message` under `key`
///
/// # Errors
///
/// Returns `InvalidInput` if the key or the message is empty.
pub fn hmac_sha256(key: &[u8], message: &[u8]) -> Result<[u8; 32]> {
    let mac = keyed(key, message)?;
    Ok(mac.finalize().into_bytes().into())
}

/// Check an HMAC-SHA256 tag in constant time
///
/// # Errors
///
/// Returns `InvalidInput` if the key or the message is empty. A wrong tag
/// is `Ok(false)`, not an error.
pub fn verify_hmac_sha256(key: &[u8], message: &[u8], tag: &[u8]) -> Result<bool> {
    let mac = keyed(key, message)?;
    Ok(mac.verify_slice(tag).is_ok())
}

fn keyed(key: &[u8], message: &[u8]) -> Result<HmacSha256> {
    if message.is_empty() {
        return Err(KeyError::invalid_input("message cannot be empty"));
    }
    if key.is_empty() {
        return Err(KeyError::invalid_input("HMAC key cannot be empty"));
    }
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| KeyError::invalid_input(format!("HMAC key rejected: {e}")))?;
    mac.update(message);
    Ok(mac)
}
