//! Configuration constants and types for seed-vault.

/// Envelope format version written into metadata.
pub const FORMAT_VERSION: &str = "1.0";

/// Cipher suite identifier written into metadata.
pub const ALGORITHM: &str = "Fernet-AES128-CBC-HMAC";

/// KDF identifier written into metadata.
pub const KDF_NAME: &str = "PBKDF2-HMAC-SHA256";

/// Minimum password length, in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Standard recovery phrase lengths.
pub const VALID_WORD_COUNTS: [usize; 5] = [12, 15, 18, 21, 24];

/// PBKDF2 parameters for key derivation.
pub mod pbkdf2_params {
    /// Iteration count. Each guess must cost ~100ms+ on commodity hardware.
    pub const ITERATIONS: u32 = 600_000;

    /// Output length in bytes (256 bits).
    pub const KEY_LENGTH: usize = 32;

    /// Salt length in bytes.
    pub const SALT_LENGTH: usize = 32;
}

/// Token layout.
pub mod token_params {
    /// Version tag leading every token.
    pub const VERSION: u8 = 0x80;

    /// Big-endian UNIX seconds.
    pub const TIMESTAMP_LENGTH: usize = 8;

    /// AES block / IV size.
    pub const IV_LENGTH: usize = 16;

    /// HMAC-SHA256 output.
    pub const TAG_LENGTH: usize = 32;

    /// Version, timestamp and IV.
    pub const HEADER_LENGTH: usize = 1 + TIMESTAMP_LENGTH + IV_LENGTH;
}

/// Which characters count as letters when validating phrase words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alphabet {
    /// Any character with the Unicode `Alphabetic` property (covers
    /// non-English wordlists). Broader than the letter categories alone: it
    /// also admits letter numbers such as `Ⅻ` and combining vowel signs.
    #[default]
    Unicode,
    /// ASCII a-z and A-Z only.
    Ascii,
}

impl Alphabet {
    /// Whether `c` is a letter under this alphabet.
    pub fn contains(self, c: char) -> bool {
        match self {
            Alphabet::Unicode => c.is_alphabetic(),
            Alphabet::Ascii => c.is_ascii_alphabetic(),
        }
    }
}

/// Policy for recovery phrase format validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatPolicy {
    /// Accepted letters.
    pub alphabet: Alphabet,
}

impl FormatPolicy {
    /// Restrict words to ASCII letters.
    pub fn ascii_only() -> Self {
        Self {
            alphabet: Alphabet::Ascii,
        }
    }
}
