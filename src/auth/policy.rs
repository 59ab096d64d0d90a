//! Master password strength policy.

use crate::errors::{PassVaultError, Result};

/// Symbols accepted (and required) in a master password.  The same set
/// is used by the secret generator's alphabet.
pub const SYMBOLS: &str = "@#$%^&+=";

/// Minimum master password length.
const MIN_LEN: usize = 8;

/// Validate master password strength.
///
/// Requires at least 8 characters with at least one lowercase letter,
/// one uppercase letter, one digit, and one symbol from `SYMBOLS`.
/// The error names the first rule that failed so the shell can show a
/// useful message without echoing the password.
pub fn validate_master_password(password: &str) -> Result<()> {
    if password.chars().count() < MIN_LEN {
        return Err(PassVaultError::WeakPassword(format!(
            "must be at least {MIN_LEN} characters"
        )));
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Err(PassVaultError::WeakPassword(
            "must contain a lowercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Err(PassVaultError::WeakPassword(
            "must contain an uppercase letter".into(),
        ));
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(PassVaultError::WeakPassword("must contain a digit".into()));
    }
    if !password.chars().any(|c| SYMBOLS.contains(c)) {
        return Err(PassVaultError::WeakPassword(format!(
            "must contain a symbol from {SYMBOLS}"
        )));
    }
    Ok(())
}
