//! Confirmation signature signing and verification.
//!
//! Redirect-based gateways bounce the browser back with
//! `?txn=<id>&email=<addr>&sig=<hex>`. The signature is HMAC-SHA256 over
//! the transaction id with a server-held secret, so only the server that
//! issued the redirect can mint a valid `sig`. Verification uses a
//! constant-time comparison; a mismatch indicates tampering and is never
//! retried.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, Secret};
use sha2::Sha256;
use subtle::ConstantTimeEq;

use crate::domain::foundation::TransactionId;

use super::ConfirmError;

/// Signs and verifies payment confirmation redirects.
pub struct ConfirmSigner {
    secret: Secret<String>,
}

impl ConfirmSigner {
    /// Creates a signer with the server-held confirmation secret.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Secret::new(secret.into()),
        }
    }

    /// Computes the hex signature for a transaction id.
    pub fn sign(&self, transaction_id: &TransactionId) -> String {
        hex::encode(self.compute_mac(transaction_id))
    }

    /// Verifies a presented hex signature against the expected one.
    ///
    /// # Errors
    ///
    /// Returns `ConfirmError::InvalidSignature` for malformed hex and for
    /// any signature that does not equal `HMAC(secret, txn)`. The byte
    /// comparison is constant-time regardless of where the mismatch
    /// occurs.
    pub fn verify(
        &self,
        transaction_id: &TransactionId,
        presented_hex: &str,
    ) -> Result<(), ConfirmError> {
        let presented =
            hex::decode(presented_hex).map_err(|_| ConfirmError::InvalidSignature)?;
        let expected = self.compute_mac(transaction_id);

        if !constant_time_compare(&expected, &presented) {
            return Err(ConfirmError::InvalidSignature);
        }
        Ok(())
    }

    fn compute_mac(&self, transaction_id: &TransactionId) -> Vec<u8> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .expect("HMAC accepts any key");
        mac.update(transaction_id.to_string().as_bytes());
        mac.finalize().into_bytes().to_vec()
    }
}

/// Performs constant-time comparison of two byte slices.
///
/// This prevents timing attacks that could leak information about the
/// expected signature.
fn constant_time_compare(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.ct_eq(b).into()
}
