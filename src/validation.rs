//! Recovery phrase format validation.
//!
//! Advisory input hygiene only: a phrase that passes is syntactically
//! plausible, not a checked BIP-39 mnemonic.

use crate::config::{FormatPolicy, VALID_WORD_COUNTS};
use crate::error::{Error, Result};

/// Message returned for a phrase that passes validation.
pub const VALID_MESSAGE: &str = "Valid format";

/// Check a phrase, returning a typed [`Error::Validation`] on failure.
pub fn check_format(secret: &str, policy: &FormatPolicy) -> Result<()> {
    let words: Vec<&str> = secret.split_whitespace().collect();

    if !VALID_WORD_COUNTS.contains(&words.len()) {
        let expected = VALID_WORD_COUNTS
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        return Err(Error::Validation(format!(
            "A recovery phrase must contain {} words. Found {} word(s).",
            expected,
            words.len()
        )));
    }

    if let Some(word) = words
        .iter()
        .find(|w| !w.chars().all(|c| policy.alphabet.contains(c)))
    {
        return Err(Error::Validation(format!(
            "The word '{}' contains invalid characters. Words must contain only letters.",
            word
        )));
    }

    Ok(())
}

/// Validate a phrase, returning a verdict and a human-readable reason.
pub fn validate(secret: &str, policy: &FormatPolicy) -> (bool, String) {
    match check_format(secret, policy) {
        Ok(()) => (true, VALID_MESSAGE.to_string()),
        Err(Error::Validation(reason)) => (false, reason),
        Err(other) => (false, other.to_string()),
    }
}
