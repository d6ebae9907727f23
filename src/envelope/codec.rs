//! JSON envelope encoding.
//!
//! Parsing never authenticates the token; that happens at decrypt time.

use crate::crypto::Token;
use crate::envelope::Metadata;
use crate::error::{Error, Result};
use base64::{engine::general_purpose::STANDARD, Engine};
use serde::{Deserialize, Serialize};

/// Metadata paired with its token: the unit of storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub metadata: Metadata,
    pub token: Token,
}

impl Envelope {
    pub fn new(metadata: Metadata, token: Token) -> Self {
        Self { metadata, token }
    }

    /// Serialize to pretty-printed JSON.
    pub fn encode(&self) -> Result<Vec<u8>> {
        encode(&self.metadata, &self.token)
    }

    pub fn into_parts(self) -> (Metadata, Token) {
        (self.metadata, self.token)
    }
}

#[derive(Serialize)]
struct EnvelopeOut<'a> {
    metadata: &'a Metadata,
    encrypted_data: String,
}

#[derive(Deserialize)]
struct EnvelopeIn {
    metadata: Option<Metadata>,
    encrypted_data: Option<String>,
}

/// Serialize metadata and token into envelope bytes.
pub fn encode(metadata: &Metadata, token: &Token) -> Result<Vec<u8>> {
    let out = EnvelopeOut {
        metadata,
        encrypted_data: STANDARD.encode(token.as_bytes()),
    };
    Ok(serde_json::to_vec_pretty(&out)?)
}

/// Parse envelope bytes back into metadata and token.
pub fn decode(bytes: &[u8]) -> Result<Envelope> {
    let parsed: EnvelopeIn = serde_json::from_slice(bytes)?;

    let metadata = parsed
        .metadata
        .ok_or_else(|| Error::EnvelopeFormat("missing 'metadata' field".to_string()))?;
    let encrypted_data = parsed
        .encrypted_data
        .ok_or_else(|| Error::EnvelopeFormat("missing 'encrypted_data' field".to_string()))?;

    let token = STANDARD
        .decode(encrypted_data.trim())
        .map_err(|e| Error::EnvelopeFormat(format!("Invalid encrypted_data encoding: {}", e)))?;

    Ok(Envelope::new(metadata, Token::from_bytes(token)))
}
