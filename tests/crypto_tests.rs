//! Integration tests for the PassVault crypto module.

use std::collections::HashSet;

use passvault::crypto::keys::{compute_verifier, derive_entry_key, MasterKey};
use passvault::crypto::{decrypt, derive_master_key, derive_master_key_with_params, encrypt, generate_salt, Argon2Params};
use passvault::errors::PassVaultError;

/// Cheap Argon2 parameters so KDF tests stay fast.
fn test_params() -> Argon2Params {
    Argon2Params {
        memory_kib: 8_192,
        iterations: 1,
        parallelism: 1,
    }
}

// ---------------------------------------------------------------------------
// Encryption round-trip
// ---------------------------------------------------------------------------

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = [0xABu8; 32];
    let plaintext = b"hunter2-for-github";

    let sealed = encrypt(&key, plaintext).expect("encrypt should succeed");

    // Ciphertext must be longer than plaintext (16-byte tag appended).
    assert!(sealed.ciphertext.len() > plaintext.len());
    assert_eq!(sealed.nonce.len(), 12);

    let recovered = decrypt(&key, &sealed.ciphertext, &sealed.nonce).expect("decrypt");
    assert_eq!(recovered, plaintext);
}

#[test]
fn encrypt_produces_different_ciphertext_each_time() {
    let key = [0xCDu8; 32];
    let plaintext = b"same secret";

    let s1 = encrypt(&key, plaintext).expect("encrypt 1");
    let s2 = encrypt(&key, plaintext).expect("encrypt 2");

    // Because each call generates a new random nonce, the output must differ.
    assert_ne!(s1.nonce, s2.nonce, "nonces must differ across calls");
    assert_ne!(
        s1.ciphertext, s2.ciphertext,
        "two encryptions of the same plaintext must differ"
    );
}

#[test]
fn nonces_are_unique_across_many_encryptions() {
    let key = [0x42u8; 32];
    let mut seen = HashSet::new();

    for _ in 0..10_000 {
        let sealed = encrypt(&key, b"x").expect("encrypt");
        assert!(seen.insert(sealed.nonce), "nonce repeated under the same key");
    }
}

#[test]
fn decrypt_with_wrong_key_fails_authentication() {
    let key = [0x11u8; 32];
    let wrong_key = [0x22u8; 32];

    let sealed = encrypt(&key, b"top secret").expect("encrypt");
    let result = decrypt(&wrong_key, &sealed.ciphertext, &sealed.nonce);

    assert!(
        matches!(result, Err(PassVaultError::AuthenticationFailed)),
        "wrong key must fail authentication, got {result:?}"
    );
}

#[test]
fn flipping_any_ciphertext_bit_fails_authentication() {
    let key = [0xBBu8; 32];
    let sealed = encrypt(&key, b"value").expect("encrypt");

    for i in 0..sealed.ciphertext.len() {
        let mut tampered = sealed.ciphertext.clone();
        tampered[i] ^= 0x01;

        let result = decrypt(&key, &tampered, &sealed.nonce);
        assert!(
            matches!(result, Err(PassVaultError::AuthenticationFailed)),
            "bit flip at byte {i} must fail authentication"
        );
    }
}

#[test]
fn flipping_a_nonce_bit_fails_authentication() {
    let key = [0xBBu8; 32];
    let sealed = encrypt(&key, b"value").expect("encrypt");

    let mut tampered = sealed.nonce;
    tampered[0] ^= 0x01;

    let result = decrypt(&key, &sealed.ciphertext, &tampered);
    assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
}

#[test]
fn truncated_ciphertext_is_malformed() {
    // Anything shorter than the 16-byte tag is structurally invalid.
    let key = [0xAAu8; 32];
    let result = decrypt(&key, &[0u8; 5], &[0u8; 12]);
    assert!(matches!(result, Err(PassVaultError::MalformedCiphertext(_))));
}

#[test]
fn wrong_length_nonce_is_malformed() {
    let key = [0xAAu8; 32];
    let sealed = encrypt(&key, b"value").expect("encrypt");

    let result = decrypt(&key, &sealed.ciphertext, &[0u8; 8]);
    assert!(matches!(result, Err(PassVaultError::MalformedCiphertext(_))));
}

// ---------------------------------------------------------------------------
// Key derivation (Argon2id)
// ---------------------------------------------------------------------------

#[test]
fn derive_master_key_same_inputs_same_output() {
    let password = b"my-secure-passphrase";
    let salt = generate_salt();

    let key1 = derive_master_key_with_params(password, &salt, &test_params()).expect("derive 1");
    let key2 = derive_master_key_with_params(password, &salt, &test_params()).expect("derive 2");

    assert_eq!(key1, key2, "same password + salt must produce the same key");
}

#[test]
fn derive_master_key_different_salts_different_keys() {
    let password = b"same-password";
    let salt1 = generate_salt();
    let salt2 = generate_salt();

    let key1 = derive_master_key_with_params(password, &salt1, &test_params()).expect("derive 1");
    let key2 = derive_master_key_with_params(password, &salt2, &test_params()).expect("derive 2");

    assert_ne!(key1, key2, "different salts must produce different keys");
}

#[test]
fn derive_master_key_different_passwords_different_keys() {
    let salt = generate_salt();

    let key1 = derive_master_key_with_params(b"password-one", &salt, &test_params()).expect("derive 1");
    let key2 = derive_master_key_with_params(b"password-two", &salt, &test_params()).expect("derive 2");

    assert_ne!(key1, key2, "different passwords must produce different keys");
}

#[test]
fn empty_password_is_invalid_input() {
    let salt = generate_salt();
    let result = derive_master_key(b"", &salt);
    assert!(matches!(result, Err(PassVaultError::InvalidInput(_))));
}

#[test]
fn dangerously_weak_kdf_params_rejected() {
    let salt = generate_salt();
    let weak = Argon2Params {
        memory_kib: 16,
        iterations: 1,
        parallelism: 1,
    };
    let result = derive_master_key_with_params(b"pw", &salt, &weak);
    assert!(matches!(result, Err(PassVaultError::KeyDerivationFailed(_))));
}

// ---------------------------------------------------------------------------
// HKDF per-entry key derivation and the master verifier
// ---------------------------------------------------------------------------

#[test]
fn different_service_names_produce_different_keys() {
    let master = [0x99u8; 32];

    let key_a = derive_entry_key(&master, "github").expect("derive A");
    let key_b = derive_entry_key(&master, "gitlab").expect("derive B");

    assert_ne!(
        key_a, key_b,
        "different service names must produce different keys"
    );
}

#[test]
fn same_service_name_produces_same_key() {
    let master = [0x77u8; 32];

    let key1 = derive_entry_key(&master, "email").expect("derive 1");
    let key2 = derive_entry_key(&master, "email").expect("derive 2");

    assert_eq!(key1, key2, "same inputs must produce the same key");
}

#[test]
fn verifier_is_deterministic() {
    let master = [0x55u8; 32];
    assert_eq!(
        compute_verifier(&master).expect("verifier 1"),
        compute_verifier(&master).expect("verifier 2")
    );
}

#[test]
fn verifier_never_equals_the_raw_key() {
    let master = [0x55u8; 32];
    let verifier = compute_verifier(&master).expect("verifier");
    assert_ne!(verifier.as_slice(), master.as_slice());
}

#[test]
fn verifier_differs_from_entry_keys() {
    let master = [0x55u8; 32];

    let verifier = compute_verifier(&master).expect("verifier");
    let entry_key = derive_entry_key(&master, "any-service").expect("entry key");

    assert_ne!(
        verifier.as_slice(),
        entry_key.as_slice(),
        "verifier and entry key must be different"
    );
}

// ---------------------------------------------------------------------------
// End-to-end: password -> master key -> per-entry key -> encrypt/decrypt
// ---------------------------------------------------------------------------

#[test]
fn full_crypto_pipeline() {
    let salt = generate_salt();

    // Step 1: Derive master key from password.
    let master_bytes =
        derive_master_key_with_params(b"Str0ng@Pass", &salt, &test_params()).expect("derive");
    let master = MasterKey::new(master_bytes);

    // Step 2: Derive a per-entry encryption key.
    let entry_key = master.entry_key("github").expect("entry key");

    // Step 3: Encrypt a value.
    let sealed = encrypt(&entry_key, b"hunter2").expect("encrypt");

    // Step 4: Decrypt it back.
    let recovered = decrypt(&entry_key, &sealed.ciphertext, &sealed.nonce).expect("decrypt");
    assert_eq!(recovered, b"hunter2".to_vec());
}

#[test]
fn keys_from_different_passwords_cannot_decrypt_each_other() {
    let salt = generate_salt();

    let k1 = derive_master_key_with_params(b"Str0ng@Pass", &salt, &test_params()).expect("k1");
    let k2 = derive_master_key_with_params(b"WrongPass1@", &salt, &test_params()).expect("k2");

    let entry_key_1 = MasterKey::new(k1).entry_key("github").expect("ek1");
    let entry_key_2 = MasterKey::new(k2).entry_key("github").expect("ek2");

    let sealed = encrypt(&entry_key_1, b"hunter2").expect("encrypt");
    let result = decrypt(&entry_key_2, &sealed.ciphertext, &sealed.nonce);

    assert!(matches!(result, Err(PassVaultError::AuthenticationFailed)));
}
