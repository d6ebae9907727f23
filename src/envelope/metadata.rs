//! Envelope metadata: everything needed to re-derive the key, in plain text.
//!
//! Fields are kept as text exactly as stored so that a decoded envelope
//! re-encodes unchanged. Typed views are available through accessors.

use crate::config::{pbkdf2_params, ALGORITHM, FORMAT_VERSION, KDF_NAME};
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Metadata stored next to the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Envelope format version.
    #[serde(default)]
    pub version: String,
    /// Cipher suite identifier.
    #[serde(default)]
    pub algorithm: String,
    /// KDF identifier.
    #[serde(default)]
    pub kdf: String,
    /// KDF iteration count, as decimal text.
    #[serde(default)]
    pub iterations: String,
    /// Standard base64 of the salt.
    #[serde(default)]
    pub salt: String,
    /// ISO-8601 UTC creation time.
    #[serde(default)]
    pub timestamp: String,
}

impl Metadata {
    /// Metadata for a new envelope, stamped with the current time.
    pub fn new(salt: &[u8], iterations: u32) -> Self {
        Self {
            version: FORMAT_VERSION.to_string(),
            algorithm: ALGORITHM.to_string(),
            kdf: KDF_NAME.to_string(),
            iterations: iterations.to_string(),
            salt: STANDARD.encode(salt),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Micros, false),
        }
    }

    pub fn has_salt(&self) -> bool {
        !self.salt.trim().is_empty()
    }

    /// Decode the stored salt.
    pub fn salt_bytes(&self) -> Result<Vec<u8>> {
        if !self.has_salt() {
            return Err(Error::Input("Metadata is missing the salt".to_string()));
        }
        let salt = STANDARD
            .decode(self.salt.trim())
            .map_err(|e| Error::EnvelopeFormat(format!("Invalid salt encoding: {}", e)))?;
        if salt.len() != pbkdf2_params::SALT_LENGTH {
            return Err(Error::EnvelopeFormat(format!(
                "Invalid salt length: expected {}, got {}",
                pbkdf2_params::SALT_LENGTH,
                salt.len()
            )));
        }
        Ok(salt)
    }

    /// Recorded iteration count. Metadata without one predates the field and
    /// used the current default.
    pub fn iteration_count(&self) -> Result<u32> {
        let text = self.iterations.trim();
        if text.is_empty() {
            return Ok(pbkdf2_params::ITERATIONS);
        }
        match text.parse::<u32>() {
            Ok(0) | Err(_) => Err(Error::EnvelopeFormat(format!(
                "Invalid iteration count: '{}'",
                text
            ))),
            Ok(n) => Ok(n),
        }
    }

    /// Parse the creation timestamp.
    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.timestamp)
            .map(|t| t.with_timezone(&Utc))
            .map_err(|e| Error::EnvelopeFormat(format!("Invalid timestamp: {}", e)))
    }
}
