//! The durable service-name → encrypted-secret mapping.
//!
//! `VaultStore` wraps the persistence layer and the crypto layer so the
//! shell can work with simple method calls like
//! `store.put(&session, "github", "hunter2")`.  Every operation takes a
//! `&Session` — the capability obtained from `MasterGate::unlock` — so
//! no vault data can be touched without an authenticated caller.
//!
//! Mutations take the write lock around the whole encrypt-insert-persist
//! sequence and only commit the in-memory map after the disk write
//! succeeds, so concurrent `put` calls cannot interleave on disk and a
//! failed write leaves both memory and disk at the prior state.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use zeroize::Zeroize;

use crate::auth::Session;
use crate::crypto::cipher::{decrypt, encrypt};
use crate::errors::{PassVaultError, Result};
use crate::storage;

use super::entry::VaultEntry;

/// Longest accepted service name, in characters.
const MAX_SERVICE_NAME_LEN: usize = 256;

/// The main vault handle.
pub struct VaultStore {
    /// Path to the `vault.json` record on disk.
    path: PathBuf,

    /// In-memory map of service name -> encrypted entry.  `BTreeMap`
    /// keeps the persisted JSON deterministically ordered.
    entries: RwLock<BTreeMap<String, VaultEntry>>,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Open the vault record at `path`.
    ///
    /// A missing file is a valid empty vault (nothing stored yet); a
    /// file that exists but does not parse is corrupt persisted data.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries: BTreeMap<String, VaultEntry> = if path.exists() {
            storage::read_json(&path)?
        } else {
            BTreeMap::new()
        };

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Add or update a secret for `service` (last-write-wins).
    ///
    /// The plaintext is encrypted under a per-entry key derived from the
    /// session's master key, with a fresh nonce for every call — also
    /// on overwrite.  The per-entry key is zeroized immediately after
    /// use.
    pub fn put(&self, session: &Session, service: &str, secret: &str) -> Result<()> {
        Self::validate_service_name(service)?;

        let mut entry_key = session.key().entry_key(service)?;
        let sealed = encrypt(&entry_key, secret.as_bytes());
        entry_key.zeroize();
        let sealed = sealed?;

        let entry = VaultEntry {
            ciphertext: sealed.ciphertext,
            nonce: sealed.nonce.to_vec(),
        };

        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        // Persist first, commit to memory only on success.
        let mut next = entries.clone();
        next.insert(service.to_string(), entry);
        storage::write_json_atomic(&self.path, &next)?;
        *entries = next;

        Ok(())
    }

    /// Decrypt and return the plaintext secret for `service`.
    ///
    /// Decrypts on demand; the plaintext is never cached beyond this
    /// call and the per-entry key is zeroized after decryption.
    pub fn get(&self, session: &Session, service: &str) -> Result<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);

        let entry = entries
            .get(service)
            .ok_or_else(|| PassVaultError::NotFound(service.to_string()))?;

        let mut entry_key = session.key().entry_key(service)?;
        let plaintext = decrypt(&entry_key, &entry.ciphertext, &entry.nonce);
        entry_key.zeroize();
        let plaintext_bytes = plaintext?;

        // Convert to String via from_utf8 which takes ownership.
        // On error, zeroize the bytes inside the error before discarding.
        String::from_utf8(plaintext_bytes).map_err(|e| {
            let mut bad_bytes = e.into_bytes();
            bad_bytes.zeroize();
            PassVaultError::MalformedCiphertext("decrypted secret is not valid UTF-8".to_string())
        })
    }

    /// Remove the entry for `service`.
    ///
    /// Fails with `NotFound` for unknown names rather than silently
    /// succeeding.
    pub fn remove(&self, _session: &Session, service: &str) -> Result<()> {
        let mut entries = self
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if !entries.contains_key(service) {
            return Err(PassVaultError::NotFound(service.to_string()));
        }

        let mut next = entries.clone();
        next.remove(service);
        storage::write_json_atomic(&self.path, &next)?;
        *entries = next;

        Ok(())
    }

    /// All service names, sorted.  Metadata only — no decryption.
    pub fn list_names(&self, _session: &Session) -> BTreeSet<String> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.keys().cloned().collect()
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault record file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of entries in the vault.
    pub fn len(&self) -> usize {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.len()
    }

    /// Returns `true` if the vault holds no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // ------------------------------------------------------------------
    // Validation
    // ------------------------------------------------------------------

    /// Validate that a service name is usable as a vault key.
    ///
    /// Must be non-empty, at most 256 characters, with no control
    /// characters.  Names are case-sensitive.
    fn validate_service_name(service: &str) -> Result<()> {
        if service.is_empty() {
            return Err(PassVaultError::InvalidInput(
                "service name cannot be empty".into(),
            ));
        }
        if service.chars().count() > MAX_SERVICE_NAME_LEN {
            return Err(PassVaultError::InvalidInput(format!(
                "service name cannot exceed {MAX_SERVICE_NAME_LEN} characters"
            )));
        }
        if service.chars().any(char::is_control) {
            return Err(PassVaultError::InvalidInput(
                "service name cannot contain control characters".into(),
            ));
        }
        Ok(())
    }
}
