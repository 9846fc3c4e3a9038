//! Opaque bearer tokens for gated resource access.

use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use subtle::ConstantTimeEq;

/// Number of random bytes in a freshly issued token (256 bits).
const TOKEN_BYTES: usize = 32;

/// Opaque bearer credential issued on successful payment.
///
/// 64 lowercase hex characters drawn from the OS RNG. Unique per
/// successful transaction and unguessable. Matching against a presented
/// value is exact and constant-time.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Issues a fresh token from the OS RNG.
    pub fn issue() -> Self {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        Self(hex::encode(bytes))
    }

    /// Wraps an already-stored token value (e.g. read back from the
    /// database). Performs no generation.
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Returns the hex token value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares against a presented value in constant time.
    ///
    /// Length mismatch returns false immediately; length is not secret.
    pub fn matches(&self, presented: &str) -> bool {
        let stored = self.0.as_bytes();
        let presented = presented.as_bytes();
        if stored.len() != presented.len() {
            return false;
        }
        stored.ct_eq(presented).into()
    }
}

// Tokens are bearer credentials; keep them out of debug logs.
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessToken(****)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_tokens_are_64_hex_chars() {
        let token = AccessToken::issue();
        assert_eq!(token.as_str().len(), 64);
        assert!(token.as_str().chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn issued_tokens_are_unique() {
        assert_ne!(AccessToken::issue().as_str(), AccessToken::issue().as_str());
    }

    #[test]
    fn matches_exact_value_only() {
        let token = AccessToken::issue();
        assert!(token.matches(token.as_str()));

        // Prefix must not match.
        assert!(!token.matches(&token.as_str()[..63]));
        assert!(!token.matches(""));

        let mut flipped = token.as_str().to_string();
        let last = if flipped.ends_with('0') { '1' } else { '0' };
        flipped.pop();
        flipped.push(last);
        assert!(!token.matches(&flipped));
    }

    #[test]
    fn debug_output_is_redacted() {
        let token = AccessToken::issue();
        let debug = format!("{:?}", token);
        assert!(!debug.contains(token.as_str()));
    }
}
