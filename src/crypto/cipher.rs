//! AES-256-GCM authenticated encryption for individual secrets.
//!
//! Each call to `encrypt` generates a fresh random 12-byte nonce
//! internally — callers can never supply one, so nonce reuse under a
//! key cannot happen by mistake.  The nonce is returned alongside the
//! ciphertext and persisted next to it; `decrypt` takes both back.

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};
use rand::rngs::OsRng;
use rand::RngCore;

use crate::errors::{PassVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the GCM authentication tag in bytes.
const TAG_LEN: usize = 16;

/// Output of a single `encrypt` call: the ciphertext (which includes
/// the 16-byte auth tag) and the nonce it was sealed under.
#[derive(Debug, Clone)]
pub struct SealedSecret {
    pub ciphertext: Vec<u8>,
    pub nonce: [u8; NONCE_LEN],
}

/// Encrypt `plaintext` with a 32-byte `key` under a fresh random nonce.
pub fn encrypt(key: &[u8], plaintext: &[u8]) -> Result<SealedSecret> {
    let cipher = Aes256Gcm::new_from_slice(key)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("invalid key length: {e}")))?;

    // Generate a random 12-byte nonce.
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng.fill_bytes(&mut nonce_bytes);

    // Encrypt and authenticate the plaintext.
    let ciphertext = cipher
        .encrypt(Nonce::from_slice(&nonce_bytes), plaintext)
        .map_err(|e| PassVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    Ok(SealedSecret {
        ciphertext,
        nonce: nonce_bytes,
    })
}

/// Decrypt a ciphertext produced by `encrypt`.
///
/// Structurally invalid input (wrong-length nonce, ciphertext shorter
/// than the auth tag) is reported as `MalformedCiphertext`; a tag
/// mismatch — wrong key, corruption, or tampering — as
/// `AuthenticationFailed`.
pub fn decrypt(key: &[u8], ciphertext: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    if nonce.len() != NONCE_LEN {
        return Err(PassVaultError::MalformedCiphertext(format!(
            "nonce must be {NONCE_LEN} bytes, got {}",
            nonce.len()
        )));
    }
    if ciphertext.len() < TAG_LEN {
        return Err(PassVaultError::MalformedCiphertext(format!(
            "ciphertext shorter than the {TAG_LEN}-byte auth tag"
        )));
    }

    let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| PassVaultError::AuthenticationFailed)?;

    // Decrypt and verify the auth tag.
    cipher
        .decrypt(Nonce::from_slice(nonce), ciphertext)
        .map_err(|_| PassVaultError::AuthenticationFailed)
}
