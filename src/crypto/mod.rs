//! Cryptographic primitives for PassVault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`cipher`)
//! - Argon2id password-based key derivation (`kdf`)
//! - HKDF per-entry keys and the HMAC master verifier (`keys`)

pub mod cipher;
pub mod kdf;
pub mod keys;

// Re-export the most commonly used items so callers can write:
//   use crate::crypto::{encrypt, decrypt, derive_master_key, ...};
pub use cipher::{decrypt, encrypt, SealedSecret};
pub use kdf::{derive_master_key, derive_master_key_with_params, generate_salt, Argon2Params};
pub use keys::{compute_verifier, derive_entry_key, MasterKey};
