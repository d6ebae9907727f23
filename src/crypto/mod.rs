//! Cryptographic operations for seed-vault.
//!
//! This module provides:
//! - PBKDF2-HMAC-SHA256 password-based key derivation
//! - AES-128-CBC encryption authenticated with HMAC-SHA256

mod cipher;
mod kdf;

pub use cipher::{decrypt_with_key, encrypt_with_key, Cipher, Token};
pub use kdf::{derive, derive_with_iterations, generate_salt, DerivedKey, KeyDerivation};
