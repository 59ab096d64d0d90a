//! Integration tests for the master password gate.

use std::fs;

use chrono::Utc;
use passvault::auth::MasterGate;
use passvault::crypto::Argon2Params;
use passvault::errors::PassVaultError;
use tempfile::TempDir;

/// Helper: a gate over `master.json` in a fresh temp dir, with cheap
/// Argon2 parameters so tests stay fast.
fn test_gate() -> (TempDir, MasterGate) {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("master.json");
    let params = Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    };
    (dir, MasterGate::with_params(path, params))
}

// ---------------------------------------------------------------------------
// Setup: password policy
// ---------------------------------------------------------------------------

#[test]
fn setup_rejects_weak_passwords() {
    let (_dir, gate) = test_gate();

    // Too short, missing uppercase, missing digit, missing symbol.
    for weak in ["weak", "str0ng@pass", "Strong@Pass", "Str0ngPass"] {
        let result = gate.setup(weak);
        assert!(
            matches!(result, Err(PassVaultError::WeakPassword(_))),
            "'{weak}' should be rejected as weak"
        );
    }

    // No record file may exist after failed setups.
    assert!(!gate.is_initialized());
}

#[test]
fn setup_accepts_strong_password() {
    let (_dir, gate) = test_gate();

    gate.setup("Str0ng@Pass").expect("setup should succeed");
    assert!(gate.is_initialized());
}

#[test]
fn setup_twice_fails() {
    let (_dir, gate) = test_gate();

    gate.setup("Str0ng@Pass").expect("first setup");
    let result = gate.setup("An0ther@Pass");
    assert!(matches!(result, Err(PassVaultError::AlreadyInitialized(_))));
}

// ---------------------------------------------------------------------------
// Unlock
// ---------------------------------------------------------------------------

#[test]
fn unlock_with_correct_password_succeeds() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    let session = gate.unlock("Str0ng@Pass").expect("unlock");
    assert!(session.created_at() <= Utc::now());
}

#[test]
fn unlock_with_wrong_password_fails() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    let result = gate.unlock("WrongPass1@");
    assert!(matches!(result, Err(PassVaultError::IncorrectPassword)));

    // The gate stays usable — the correct password still unlocks.
    assert!(gate.unlock("Str0ng@Pass").is_ok());
}

#[test]
fn unlock_before_setup_fails() {
    let (_dir, gate) = test_gate();

    let result = gate.unlock("Str0ng@Pass");
    assert!(matches!(result, Err(PassVaultError::NotInitialized(_))));
}

#[test]
fn unlock_with_empty_password_is_invalid_input() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    let result = gate.unlock("");
    assert!(matches!(result, Err(PassVaultError::InvalidInput(_))));
}

// ---------------------------------------------------------------------------
// Persisted master record
// ---------------------------------------------------------------------------

#[test]
fn master_record_holds_only_salt_and_verifier() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    let text = fs::read_to_string(gate.path()).expect("read master record");
    let json: serde_json::Value = serde_json::from_str(&text).expect("parse master record");

    let object = json.as_object().expect("record should be a JSON object");
    let mut keys: Vec<_> = object.keys().cloned().collect();
    keys.sort();
    assert_eq!(keys, ["salt", "verifier"]);

    // Neither field may contain the password.
    assert!(!text.contains("Str0ng@Pass"));
}

#[test]
fn tampered_master_record_rejects_the_real_password() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    // Replace the verifier with garbage of the same shape.
    let text = fs::read_to_string(gate.path()).unwrap();
    let mut json: serde_json::Value = serde_json::from_str(&text).unwrap();
    json["verifier"] = serde_json::Value::String("AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA=".into());
    fs::write(gate.path(), serde_json::to_vec(&json).unwrap()).unwrap();

    let result = gate.unlock("Str0ng@Pass");
    assert!(matches!(result, Err(PassVaultError::IncorrectPassword)));
}

#[test]
fn corrupt_master_record_is_malformed() {
    let (_dir, gate) = test_gate();
    gate.setup("Str0ng@Pass").expect("setup");

    fs::write(gate.path(), b"{ not json").unwrap();

    let result = gate.unlock("Str0ng@Pass");
    assert!(matches!(result, Err(PassVaultError::MalformedCiphertext(_))));
}
