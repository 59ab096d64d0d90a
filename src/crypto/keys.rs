//! Sub-key derivation from the master key.
//!
//! From a single Argon2-derived master key we derive:
//! - A unique **per-entry** encryption key for each service name
//!   (HKDF-SHA256, RFC 5869).
//! - The **master verifier**: HMAC-SHA256 over a fixed context string,
//!   keyed by the master key.  It proves knowledge of the master
//!   password without the stored value ever equaling the key itself.

use hkdf::Hkdf;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use zeroize::Zeroize;

use crate::errors::{PassVaultError, Result};

/// Length of derived sub-keys (256 bits).
const KEY_LEN: usize = 32;

/// Context constant the verifier is computed over.
const VERIFIER_CONTEXT: &[u8] = b"passvault-master-verifier-v1";

/// Derive a per-entry encryption key from the master key.
///
/// Each service name produces a different key so that compromising one
/// encrypted value does not reveal others.
///
/// `info` is set to `"passvault-entry:<service_name>"` to bind the
/// derived key to a specific vault entry.
pub fn derive_entry_key(master_key: &[u8], service_name: &str) -> Result<[u8; KEY_LEN]> {
    let info = format!("passvault-entry:{service_name}");
    hkdf_derive(master_key, info.as_bytes())
}

/// Compute the master verifier for a derived key.
///
/// `HMAC-SHA256(master_key, VERIFIER_CONTEXT)` — a keyed hash of a
/// known constant.  Stored in the master record at setup and recomputed
/// at unlock for a constant-time comparison.
pub fn compute_verifier(master_key: &[u8]) -> Result<Vec<u8>> {
    let mut mac = Hmac::<Sha256>::new_from_slice(master_key)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HMAC init failed: {e}")))?;
    mac.update(VERIFIER_CONTEXT);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Internal helper: run HKDF-SHA256 expand with the given `info`.
///
/// We skip the `extract` step and use the master key directly as the
/// pseudo-random key (PRK), because the master key already has high
/// entropy (it came from Argon2id).
fn hkdf_derive(ikm: &[u8], info: &[u8]) -> Result<[u8; KEY_LEN]> {
    let hk = Hkdf::<Sha256>::new(None, ikm);

    let mut okm = [0u8; KEY_LEN];
    hk.expand(info, &mut okm)
        .map_err(|e| PassVaultError::KeyDerivationFailed(format!("HKDF expand failed: {e}")))?;

    Ok(okm)
}

/// A wrapper around a 32-byte master key that automatically zeroes
/// its memory when dropped.
///
/// Use this to hold the master key in memory so it cannot linger
/// after it is no longer needed.
#[derive(Zeroize)]
#[zeroize(drop)]
pub struct MasterKey {
    bytes: [u8; KEY_LEN],
}

impl MasterKey {
    /// Create a new `MasterKey` from raw bytes.
    pub fn new(bytes: [u8; KEY_LEN]) -> Self {
        Self { bytes }
    }

    /// Derive a per-entry encryption key from this master key.
    pub fn entry_key(&self, service_name: &str) -> Result<[u8; KEY_LEN]> {
        derive_entry_key(&self.bytes, service_name)
    }

    /// Compute the master verifier for this key.
    pub fn verifier(&self) -> Result<Vec<u8>> {
        compute_verifier(&self.bytes)
    }
}
