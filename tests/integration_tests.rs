//! Integration tests for the encrypt → store → load → decrypt workflow.

use seed_vault::envelope;
use seed_vault::{Error, SeedPhraseEncryptor};
use std::collections::HashSet;
use std::fs;
use std::thread;
use tempfile::TempDir;

const SEED_12: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon about";
const PASSWORD: &str = "SecurePassword123!";

fn seed_24() -> String {
    let mut words = vec!["zoo"; 23];
    words.push("wrong");
    words.join(" ")
}

#[test]
fn test_full_workflow_save_load_decrypt() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("seed.enc.json");

    let bytes = seed_vault::encrypt(SEED_12, PASSWORD).expect("Failed to encrypt");
    fs::write(&path, &bytes).expect("Failed to write envelope");

    let loaded = fs::read(&path).expect("Failed to read envelope");
    let secret = seed_vault::decrypt(&loaded, PASSWORD).expect("Failed to decrypt");

    assert_eq!(secret.as_str(), SEED_12);
}

#[test]
fn test_saved_envelope_shape() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("seed.enc.json");

    let encryptor = SeedPhraseEncryptor::new();
    let (token, metadata) = encryptor.encrypt_secret(SEED_12, PASSWORD).unwrap();
    fs::write(&path, envelope::encode(&metadata, &token).unwrap()).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value["metadata"]["version"], "1.0");
    assert_eq!(value["metadata"]["kdf"], "PBKDF2-HMAC-SHA256");
    assert_eq!(value["metadata"]["iterations"], "600000");
    assert_eq!(value["metadata"]["salt"].as_str().unwrap().len(), 44);
    assert!(value["encrypted_data"].is_string());
    assert!(!text.contains("abandon"));

    let loaded = envelope::decode(text.as_bytes()).unwrap();
    assert_eq!(loaded.metadata, metadata);
    assert_eq!(loaded.token, token);
}

#[test]
fn test_24_word_roundtrip() {
    let seed = seed_24();
    let (ok, reason) = seed_vault::validate_format(&seed);
    assert!(ok, "{}", reason);

    let encryptor = SeedPhraseEncryptor::new();
    let (token, metadata) = encryptor.encrypt_secret(&seed, "another-long-password").unwrap();
    let secret = encryptor
        .decrypt_secret(&token, "another-long-password", &metadata)
        .unwrap();

    assert_eq!(secret.as_str(), seed);
}

#[test]
fn test_wrong_password_fails() {
    let bytes = seed_vault::encrypt(SEED_12, PASSWORD).unwrap();

    let err = seed_vault::decrypt(&bytes, "WrongPassword123!").unwrap_err();
    assert!(matches!(err, Error::Authentication));
}

#[test]
fn test_same_inputs_produce_fresh_salt_and_token() {
    let encryptor = SeedPhraseEncryptor::new();

    let (token1, meta1) = encryptor.encrypt_secret(SEED_12, PASSWORD).unwrap();
    let (token2, meta2) = encryptor.encrypt_secret(SEED_12, PASSWORD).unwrap();

    assert_ne!(meta1.salt, meta2.salt);
    assert_ne!(token1, token2);
}

#[test]
fn test_concurrent_encryptions_use_distinct_salts() {
    let handles: Vec<_> = (0..4)
        .map(|_| {
            thread::spawn(|| {
                let encryptor = SeedPhraseEncryptor::new();
                let (token, metadata) = encryptor.encrypt_secret(SEED_12, PASSWORD).unwrap();
                let secret = encryptor
                    .decrypt_secret(&token, PASSWORD, &metadata)
                    .unwrap();
                assert_eq!(secret.as_str(), SEED_12);
                (metadata.salt, token)
            })
        })
        .collect();

    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let salts: HashSet<_> = results.iter().map(|(salt, _)| salt.clone()).collect();
    assert_eq!(salts.len(), results.len());
}

#[test]
fn test_load_invalid_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("broken.json");
    fs::write(&path, "this is not json").unwrap();

    let err = seed_vault::decrypt(&fs::read(&path).unwrap(), PASSWORD).unwrap_err();
    assert!(matches!(err, Error::EnvelopeFormat(_)));
}

#[test]
fn test_input_errors_skip_key_derivation() {
    let encryptor = SeedPhraseEncryptor::new();

    let err = encryptor.encrypt_secret("", PASSWORD).unwrap_err();
    assert!(err.is_input());

    let err = encryptor.encrypt_secret(SEED_12, "1234567").unwrap_err();
    assert!(err.is_input());
}

#[test]
fn test_validation_is_advisory() {
    let phrase = "not a real recovery phrase";
    let (ok, reason) = seed_vault::validate_format(phrase);
    assert!(!ok);
    assert!(reason.contains('5'));

    let bytes = seed_vault::encrypt(phrase, PASSWORD).unwrap();
    assert_eq!(seed_vault::decrypt(&bytes, PASSWORD).unwrap().as_str(), phrase);
}
