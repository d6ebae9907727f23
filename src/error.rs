//! Error types for seed-vault.

use thiserror::Error;

/// Result type alias for seed-vault operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while protecting or recovering a secret.
#[derive(Error, Debug)]
pub enum Error {
    /// Caller-fixable input problem, reported before any cryptographic work.
    #[error("Invalid input: {0}")]
    Input(String),

    /// The secret does not look like a recovery phrase.
    #[error("Invalid recovery phrase: {0}")]
    Validation(String),

    /// Tag mismatch: wrong password or corrupted data.
    #[error("Decryption failed: wrong password or corrupted data")]
    Authentication,

    /// Authenticated token whose contents are inconsistent.
    #[error("Token format error: {0}")]
    Format(String),

    /// Envelope could not be parsed.
    #[error("Invalid envelope: {0}")]
    EnvelopeFormat(String),
}

impl Error {
    /// Check if this is an authentication failure.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication)
    }

    /// Check if this is an input error.
    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::EnvelopeFormat(e.to_string())
    }
}
