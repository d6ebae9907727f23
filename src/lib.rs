//! Seed Vault
//!
//! Protects a cryptocurrency recovery phrase at rest by encrypting it under a
//! password into a portable, self-describing envelope.
//!
//! # Features
//!
//! - **PBKDF2-HMAC-SHA256 Key Derivation**: 600,000 iterations over a fresh 32-byte salt
//! - **Authenticated Encryption**: AES-128-CBC with an HMAC-SHA256 tag, verified before decryption
//! - **JSON Envelopes**: metadata and token in one text record
//! - **Format Validation**: advisory check for 12/15/18/21/24-word phrases
//!
//! # Architecture
//!
//! ```text
//! Phrase → Validate → Derive key (PBKDF2) → Encrypt (AES-CBC + HMAC) → Envelope (JSON)
//! ```
//!
//! All operations are synchronous and CPU-bound. Key derivation deliberately
//! takes on the order of hundreds of milliseconds, so interactive callers
//! should run it off their UI thread.
//!
//! # Example
//!
//! ```rust,no_run
//! let phrase = "abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon about";
//!
//! let (ok, reason) = seed_vault::validate_format(phrase);
//! assert!(ok, "{}", reason);
//!
//! let envelope = seed_vault::encrypt(phrase, "SecurePassword123!").unwrap();
//! let recovered = seed_vault::decrypt(&envelope, "SecurePassword123!").unwrap();
//! assert_eq!(recovered.as_str(), phrase);
//! ```

pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod service;
pub mod validation;

pub use config::FormatPolicy;
pub use envelope::{Envelope, Metadata};
pub use error::{Error, Result};
pub use service::{decrypt, encrypt, validate_format, SeedPhraseEncryptor};
