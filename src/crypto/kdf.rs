//! PBKDF2-HMAC-SHA256 key derivation for password-based encryption.

use crate::config::pbkdf2_params;
use crate::error::{Error, Result};
use base64::{engine::general_purpose::URL_SAFE, Engine};
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// A 256-bit key derived from a password.
///
/// Zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct DerivedKey {
    bytes: [u8; pbkdf2_params::KEY_LENGTH],
}

impl DerivedKey {
    pub fn from_bytes(bytes: [u8; pbkdf2_params::KEY_LENGTH]) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8; pbkdf2_params::KEY_LENGTH] {
        &self.bytes
    }

    /// URL-safe base64 rendering of the key.
    pub fn to_urlsafe(&self) -> Zeroizing<String> {
        Zeroizing::new(URL_SAFE.encode(&self.bytes))
    }

    /// Parse a key rendered by [`DerivedKey::to_urlsafe`].
    pub fn from_urlsafe(text: &str) -> Result<Self> {
        let decoded = Zeroizing::new(
            URL_SAFE
                .decode(text)
                .map_err(|e| Error::Input(format!("Invalid key encoding: {}", e)))?,
        );
        let bytes: [u8; pbkdf2_params::KEY_LENGTH] =
            decoded.as_slice().try_into().map_err(|_| {
                Error::Input(format!(
                    "Invalid key length: expected {}, got {}",
                    pbkdf2_params::KEY_LENGTH,
                    decoded.len()
                ))
            })?;
        Ok(Self { bytes })
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Key derivation using PBKDF2-HMAC-SHA256.
#[derive(Debug, Clone)]
pub struct KeyDerivation {
    salt: Vec<u8>,
    iterations: u32,
}

impl KeyDerivation {
    /// Create a new KDF with a random salt.
    pub fn new() -> Self {
        Self {
            salt: generate_salt().to_vec(),
            iterations: pbkdf2_params::ITERATIONS,
        }
    }

    /// Create a KDF from an existing salt (for decryption).
    pub fn from_salt(salt: &[u8]) -> Result<Self> {
        if salt.is_empty() {
            return Err(Error::Input("Salt cannot be empty".to_string()));
        }
        Ok(Self {
            salt: salt.to_vec(),
            iterations: pbkdf2_params::ITERATIONS,
        })
    }

    /// Use a recorded iteration count instead of the current default.
    pub fn with_iterations(mut self, iterations: u32) -> Result<Self> {
        if iterations == 0 {
            return Err(Error::Input(
                "Iteration count must be greater than 0".to_string(),
            ));
        }
        self.iterations = iterations;
        Ok(self)
    }

    /// Get the salt for storage.
    pub fn salt(&self) -> &[u8] {
        &self.salt
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Derive a 256-bit key from a password.
    ///
    /// Deterministic: the same password, salt and iteration count always
    /// yield the same key.
    pub fn derive_key(&self, password: &str) -> DerivedKey {
        let mut key = DerivedKey {
            bytes: [0u8; pbkdf2_params::KEY_LENGTH],
        };
        pbkdf2::pbkdf2_hmac::<Sha256>(
            password.as_bytes(),
            &self.salt,
            self.iterations,
            &mut key.bytes,
        );
        tracing::debug!(iterations = self.iterations, "derived key");
        key
    }
}

impl Default for KeyDerivation {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate a fresh random salt.
pub fn generate_salt() -> [u8; pbkdf2_params::SALT_LENGTH] {
    let mut salt = [0u8; pbkdf2_params::SALT_LENGTH];
    rand::thread_rng().fill_bytes(&mut salt);
    tracing::debug!(len = salt.len(), "generated salt");
    salt
}

/// Derive a key from `password` and `salt` with the default iteration count.
pub fn derive(password: &str, salt: &[u8]) -> Result<DerivedKey> {
    Ok(KeyDerivation::from_salt(salt)?.derive_key(password))
}

/// Derive a key using an iteration count recorded with an older envelope.
pub fn derive_with_iterations(password: &str, salt: &[u8], iterations: u32) -> Result<DerivedKey> {
    Ok(KeyDerivation::from_salt(salt)?
        .with_iterations(iterations)?
        .derive_key(password))
}
