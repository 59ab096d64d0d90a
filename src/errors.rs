use std::path::PathBuf;
use thiserror::Error;

/// All errors that can occur in PassVault.
#[derive(Debug, Error)]
pub enum PassVaultError {
    // --- Crypto errors ---
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Authentication failed — wrong key or tampered data")]
    AuthenticationFailed,

    #[error("Malformed ciphertext: {0}")]
    MalformedCiphertext(String),

    #[error("Key derivation failed: {0}")]
    KeyDerivationFailed(String),

    // --- Master gate errors ---
    #[error("Weak master password: {0}")]
    WeakPassword(String),

    #[error("Vault already initialized at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Vault not initialized — run `passvault init` first")]
    NotInitialized(PathBuf),

    #[error("Incorrect master password")]
    IncorrectPassword,

    // --- Vault errors ---
    #[error("Service '{0}' not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    // --- IO errors ---
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("User cancelled operation")]
    UserCancelled,
}

/// Convenience type alias for PassVault results.
pub type Result<T> = std::result::Result<T, PassVaultError>;
