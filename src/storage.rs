//! JSON record persistence with atomic replacement.
//!
//! Both on-disk records (the master record and the vault record) are
//! plain JSON files that must never be observed half-written.  Writes
//! go to a temp file in the same directory and are then renamed over
//! the target path, so readers see either the old file or the new one,
//! never a mix.  A transient write failure is retried once before the
//! error is surfaced.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::{PassVaultError, Result};

/// Serialize `value` as pretty JSON and write it to `path` atomically.
///
/// 1. Serialize to bytes.
/// 2. Write to `.<name>.tmp` in the same directory.
/// 3. Rename the temp file over the target path.
///
/// The rename is atomic on the same filesystem, so a crash mid-write
/// leaves the previous file intact.
pub fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(value)
        .map_err(|e| PassVaultError::SerializationError(e.to_string()))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }

    // One retry on a transient IO failure, then surface the error.
    match write_and_rename(path, &bytes) {
        Ok(()) => Ok(()),
        Err(_) => write_and_rename(path, &bytes),
    }
}

/// Write `bytes` to a temp file next to `path`, then rename into place.
fn write_and_rename(path: &Path, bytes: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or(Path::new("."));
    let tmp_path = parent.join(format!(
        ".{}.tmp",
        path.file_name().unwrap_or_default().to_string_lossy()
    ));

    fs::write(&tmp_path, bytes)?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

/// Read and deserialize a JSON record from `path`.
///
/// A file that exists but cannot be parsed is corrupt persisted data,
/// reported as `MalformedCiphertext` rather than auto-repaired.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = fs::read(path)?;
    serde_json::from_slice(&bytes).map_err(|e| {
        PassVaultError::MalformedCiphertext(format!("{}: {e}", path.display()))
    })
}

// ---------------------------------------------------------------------------
// Serde helper for base64-encoded byte fields
// ---------------------------------------------------------------------------

/// Serde adapter: serialize `Vec<u8>` as a standard-base64 string.
///
/// Use as `#[serde(with = "crate::storage::base64_bytes")]`.
pub mod base64_bytes {
    use base64::engine::general_purpose::STANDARD as BASE64;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(data: &[u8], serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&BASE64.encode(data))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        BASE64.decode(&s).map_err(serde::de::Error::custom)
    }
}
