//! Master password setup and unlock.
//!
//! `MasterGate` owns the master record file: a random salt plus a
//! verifier proving knowledge of the master password.  The gate moves
//! through three states: uninitialized (no record file), awaiting a
//! password (record exists), and unlocked (a live `Session`).  A
//! `Session` can only be obtained through `unlock`, so holding one is
//! the capability every vault operation requires.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

use crate::crypto::kdf::{derive_master_key_with_params, generate_salt, Argon2Params};
use crate::crypto::keys::MasterKey;
use crate::errors::{PassVaultError, Result};
use crate::storage;

use super::policy::validate_master_password;

/// The single persisted master record: `{ salt, verifier }`, both
/// base64 strings in JSON.  Created once at setup, immutable after.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterRecord {
    #[serde(with = "crate::storage::base64_bytes")]
    pub salt: Vec<u8>,

    #[serde(with = "crate::storage::base64_bytes")]
    pub verifier: Vec<u8>,
}

/// An authenticated session holding the derived master key.
///
/// Constructed only by `MasterGate::unlock`; the key is zeroized when
/// the session drops.
pub struct Session {
    key: MasterKey,
    created_at: DateTime<Utc>,
}

impl Session {
    fn new(key: MasterKey) -> Self {
        Self {
            key,
            created_at: Utc::now(),
        }
    }

    /// Access the derived master key for vault operations.
    pub fn key(&self) -> &MasterKey {
        &self.key
    }

    /// When this session was unlocked.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// End the session, discarding the derived key.
    pub fn logout(self) {}
}

/// Gatekeeper for the master password.
pub struct MasterGate {
    /// Path to the `master.json` record file.
    path: PathBuf,

    /// Argon2 parameters used at both setup and unlock.  Changing them
    /// after setup would derive a different key, so they come from the
    /// same `Settings` on every run.
    params: Argon2Params,
}

impl MasterGate {
    /// Create a gate over the master record at `path` with default
    /// Argon2 parameters.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self::with_params(path, Argon2Params::default())
    }

    /// Create a gate with explicit Argon2 parameters (from `Settings`).
    pub fn with_params(path: impl Into<PathBuf>, params: Argon2Params) -> Self {
        Self {
            path: path.into(),
            params,
        }
    }

    /// Path to the master record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a master record already exists.
    pub fn is_initialized(&self) -> bool {
        self.path.exists()
    }

    /// First-run setup: validate password strength, generate a fresh
    /// salt, derive the verifier, and persist the master record
    /// atomically.
    ///
    /// Fails with `AlreadyInitialized` if a record exists, and with
    /// `WeakPassword` if the password does not meet the policy.
    pub fn setup(&self, password: &str) -> Result<()> {
        if self.is_initialized() {
            return Err(PassVaultError::AlreadyInitialized(self.path.clone()));
        }

        validate_master_password(password)?;

        let salt = generate_salt();
        let key = self.derive_key(password, &salt)?;
        let verifier = key.verifier()?;

        let record = MasterRecord {
            salt: salt.to_vec(),
            verifier,
        };
        storage::write_json_atomic(&self.path, &record)
    }

    /// Unlock the vault with the master password.
    ///
    /// Derives a key from the stored salt, recomputes the verifier, and
    /// compares in constant time.  On mismatch the gate stays locked and
    /// returns `IncorrectPassword` — no lockout or backoff.
    ///
    /// Argon2id makes this deliberately slow (tens to hundreds of
    /// milliseconds); callers should expect a blocking call.
    pub fn unlock(&self, password: &str) -> Result<Session> {
        if !self.is_initialized() {
            return Err(PassVaultError::NotInitialized(self.path.clone()));
        }

        let record: MasterRecord = storage::read_json(&self.path)?;

        let key = self.derive_key(password, &record.salt)?;
        let computed = key.verifier()?;

        if computed.ct_eq(&record.verifier).into() {
            Ok(Session::new(key))
        } else {
            Err(PassVaultError::IncorrectPassword)
        }
    }

    /// Derive the master key for `password` under this gate's params,
    /// wiping the intermediate byte array.
    fn derive_key(&self, password: &str, salt: &[u8]) -> Result<MasterKey> {
        let mut bytes = derive_master_key_with_params(password.as_bytes(), salt, &self.params)?;
        let key = MasterKey::new(bytes);
        bytes.zeroize();
        Ok(key)
    }
}
