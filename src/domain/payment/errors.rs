//! Errors for the payment confirmation path.

use thiserror::Error;

/// Failures of the redirect confirmation endpoint.
///
/// An email that does not match the stored record maps to
/// `TransactionNotFound` so the endpoint cannot be used to probe which
/// email owns a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfirmError {
    /// Signature mismatch: tampering, not a transient failure. Logged as
    /// a security event and never retried.
    #[error("invalid confirmation signature")]
    InvalidSignature,

    /// Unknown transaction id, or the presented email does not match.
    #[error("transaction not found")]
    TransactionNotFound,

    /// Persistence failure while loading the record.
    #[error("confirmation lookup failed: {0}")]
    Infrastructure(String),
}
