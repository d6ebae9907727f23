//! Encrypt and decrypt recovery phrases under a password.
//!
//! Every call is independent: a fresh salt and IV per encryption, the key
//! derived, used and zeroized within the call.

use crate::config::{FormatPolicy, MIN_PASSWORD_LENGTH};
use crate::crypto::{derive_with_iterations, Cipher, KeyDerivation, Token};
use crate::envelope::{self, Metadata};
use crate::error::{Error, Result};
use crate::validation;
use zeroize::Zeroizing;

/// Stateless recovery phrase encryptor.
#[derive(Debug, Clone, Default)]
pub struct SeedPhraseEncryptor {
    policy: FormatPolicy,
}

impl SeedPhraseEncryptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom format validation policy.
    pub fn with_policy(policy: FormatPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &FormatPolicy {
        &self.policy
    }

    /// Encrypt a secret, returning the token and its metadata.
    pub fn encrypt_secret(&self, secret: &str, password: &str) -> Result<(Token, Metadata)> {
        if secret.trim().is_empty() {
            return Err(Error::Input("Recovery phrase cannot be empty".to_string()));
        }
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(Error::Input(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }

        let kdf = KeyDerivation::new();
        let key = kdf.derive_key(password);
        let token = Cipher::new(&key).encrypt(secret.as_bytes());
        let metadata = Metadata::new(kdf.salt(), kdf.iterations());

        tracing::debug!(
            iterations = kdf.iterations(),
            token_len = token.len(),
            "encrypted secret"
        );
        Ok((token, metadata))
    }

    /// Decrypt a token using the salt and iteration count in `metadata`.
    pub fn decrypt_secret(
        &self,
        token: &Token,
        password: &str,
        metadata: &Metadata,
    ) -> Result<Zeroizing<String>> {
        if token.is_empty() {
            return Err(Error::Input("Encrypted data cannot be empty".to_string()));
        }
        if password.is_empty() {
            return Err(Error::Input("Password cannot be empty".to_string()));
        }
        if !metadata.has_salt() {
            return Err(Error::Input("Metadata is missing the salt".to_string()));
        }

        // A damaged salt must look the same as a wrong password.
        let salt = metadata.salt_bytes().map_err(|e| match e {
            Error::Input(_) => e,
            _ => {
                tracing::debug!("stored salt is malformed");
                Error::Authentication
            }
        })?;
        let iterations = metadata.iteration_count()?;
        let key = derive_with_iterations(password, &salt, iterations)?;
        let plaintext = Cipher::new(&key).decrypt(token)?;

        let secret = std::str::from_utf8(&plaintext)
            .map_err(|e| Error::Format(format!("Decrypted data is not UTF-8: {}", e)))?;

        tracing::debug!(iterations, "decrypted secret");
        Ok(Zeroizing::new(secret.to_string()))
    }

    /// Encrypt a secret straight into envelope bytes.
    pub fn encrypt(&self, secret: &str, password: &str) -> Result<Vec<u8>> {
        let (token, metadata) = self.encrypt_secret(secret, password)?;
        envelope::encode(&metadata, &token)
    }

    /// Decrypt envelope bytes.
    pub fn decrypt(&self, envelope_bytes: &[u8], password: &str) -> Result<Zeroizing<String>> {
        let envelope = envelope::decode(envelope_bytes)?;
        self.decrypt_secret(&envelope.token, password, &envelope.metadata)
    }

    /// Check a secret against this encryptor's format policy.
    pub fn validate_format(&self, secret: &str) -> (bool, String) {
        validation::validate(secret, &self.policy)
    }
}

/// Encrypt a secret into envelope bytes.
pub fn encrypt(secret: &str, password: &str) -> Result<Vec<u8>> {
    SeedPhraseEncryptor::new().encrypt(secret, password)
}

/// Decrypt envelope bytes back into the secret.
pub fn decrypt(envelope_bytes: &[u8], password: &str) -> Result<Zeroizing<String>> {
    SeedPhraseEncryptor::new().decrypt(envelope_bytes, password)
}

/// Check that a secret looks like a recovery phrase.
pub fn validate_format(secret: &str) -> (bool, String) {
    SeedPhraseEncryptor::new().validate_format(secret)
}
