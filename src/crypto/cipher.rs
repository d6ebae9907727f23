//! AES-128-CBC encryption authenticated with HMAC-SHA256.
//!
//! Token layout, URL-safe base64 encoded as a whole:
//!
//! ```text
//! version (1) || timestamp (8, BE seconds) || iv (16) || ciphertext (16n) || tag (32)
//! ```
//!
//! The tag covers every byte before it and is checked before any decryption
//! or padding removal takes place.

use crate::config::token_params::{HEADER_LENGTH, IV_LENGTH, TAG_LENGTH, TIMESTAMP_LENGTH, VERSION};
use crate::crypto::kdf::DerivedKey;
use crate::error::{Error, Result};
use aes::Aes128;
use base64::{engine::general_purpose::URL_SAFE, Engine};
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};
use chrono::Utc;
use hmac::{Hmac, Mac};
use rand::RngCore;
use sha2::Sha256;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type HmacSha256 = Hmac<Sha256>;

/// Half of a derived key.
const HALF_KEY: usize = 16;

/// Authenticated ciphertext, held as its URL-safe base64 text.
#[derive(Clone, PartialEq, Eq)]
pub struct Token(Vec<u8>);

impl Token {
    /// Wrap token text produced by [`Cipher::encrypt`].
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for Token {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl std::fmt::Debug for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Token").field("len", &self.0.len()).finish()
    }
}

/// AES-128-CBC + HMAC-SHA256 cipher.
///
/// The first half of the derived key signs, the second half encrypts.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Cipher {
    signing_key: [u8; HALF_KEY],
    encryption_key: [u8; HALF_KEY],
}

impl Cipher {
    /// Create a new cipher from a derived key.
    pub fn new(key: &DerivedKey) -> Self {
        let bytes = key.as_bytes();
        let mut signing_key = [0u8; HALF_KEY];
        let mut encryption_key = [0u8; HALF_KEY];
        signing_key.copy_from_slice(&bytes[..HALF_KEY]);
        encryption_key.copy_from_slice(&bytes[HALF_KEY..]);
        Self {
            signing_key,
            encryption_key,
        }
    }

    /// Encrypt data with a fresh random IV and the current time.
    pub fn encrypt(&self, plaintext: &[u8]) -> Token {
        let mut iv = [0u8; IV_LENGTH];
        rand::thread_rng().fill_bytes(&mut iv);
        let timestamp = Utc::now().timestamp().max(0) as u64;
        self.seal(plaintext, timestamp, &iv)
    }

    /// Authenticate and decrypt a token produced by [`Cipher::encrypt`].
    pub fn decrypt(&self, token: &Token) -> Result<Zeroizing<Vec<u8>>> {
        let raw = URL_SAFE
            .decode(token.as_bytes())
            .map_err(|_| Error::Authentication)?;
        if raw.len() < HEADER_LENGTH + TAG_LENGTH || raw[0] != VERSION {
            return Err(Error::Authentication);
        }

        let (signed, tag) = raw.split_at(raw.len() - TAG_LENGTH);
        let mut mac = self.mac();
        mac.update(signed);
        mac.verify_slice(tag).map_err(|_| {
            tracing::debug!("token authentication failed");
            Error::Authentication
        })?;

        let mut iv = [0u8; IV_LENGTH];
        iv.copy_from_slice(&signed[1 + TIMESTAMP_LENGTH..HEADER_LENGTH]);
        let ciphertext = &signed[HEADER_LENGTH..];
        if ciphertext.is_empty() || ciphertext.len() % IV_LENGTH != 0 {
            return Err(Error::Format(format!(
                "ciphertext length {} is not a whole number of blocks",
                ciphertext.len()
            )));
        }

        let plaintext = Aes128CbcDec::new((&self.encryption_key).into(), (&iv).into())
            .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
            .map_err(|_| Error::Format("invalid padding".to_string()))?;

        Ok(Zeroizing::new(plaintext))
    }

    fn seal(&self, plaintext: &[u8], timestamp: u64, iv: &[u8; IV_LENGTH]) -> Token {
        let ciphertext = Aes128CbcEnc::new((&self.encryption_key).into(), iv.into())
            .encrypt_padded_vec_mut::<Pkcs7>(plaintext);

        let mut raw = Vec::with_capacity(HEADER_LENGTH + ciphertext.len() + TAG_LENGTH);
        raw.push(VERSION);
        raw.extend_from_slice(&timestamp.to_be_bytes());
        raw.extend_from_slice(iv);
        raw.extend_from_slice(&ciphertext);

        let mut mac = self.mac();
        mac.update(&raw);
        raw.extend_from_slice(&mac.finalize().into_bytes());

        Token(URL_SAFE.encode(&raw).into_bytes())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.signing_key).expect("HMAC accepts any key length")
    }
}

/// Encrypt data with a derived key.
pub fn encrypt_with_key(plaintext: &[u8], key: &DerivedKey) -> Token {
    Cipher::new(key).encrypt(plaintext)
}

/// Decrypt a token with a derived key.
pub fn decrypt_with_key(token: &Token, key: &DerivedKey) -> Result<Zeroizing<Vec<u8>>> {
    Cipher::new(key).decrypt(token)
}
