//! The encrypted entry type stored inside the vault record.

use serde::{Deserialize, Serialize};

/// A single encrypted vault entry, keyed by service name in the vault
/// record.  Both fields serialize as base64 strings in JSON:
///
/// ```json
/// { "github": { "ciphertext": "<base64>", "nonce": "<base64>" } }
/// ```
///
/// The ciphertext includes the GCM auth tag; the nonce is the fresh
/// random value the entry was sealed under.  No plaintext field exists
/// on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VaultEntry {
    #[serde(with = "crate::storage::base64_bytes")]
    pub ciphertext: Vec<u8>,

    #[serde(with = "crate::storage::base64_bytes")]
    pub nonce: Vec<u8>,
}
