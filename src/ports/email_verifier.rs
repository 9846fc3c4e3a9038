//! Email deliverability port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::EmailAddress;

/// Canonical deliverability verdict.
///
/// The upstream heuristic service answers in one of several undocumented
/// response shapes; adapters normalize every recognized shape into this
/// one, and fail explicitly when none matches. There is no silent
/// default verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deliverability {
    pub deliverable: bool,
}

/// Port for the deliverability check service.
#[async_trait]
pub trait EmailVerifier: Send + Sync {
    /// Checks whether an address appears deliverable.
    async fn check(&self, email: &EmailAddress) -> Result<Deliverability, VerifierError>;
}

/// Failures of the deliverability check.
#[derive(Debug, Clone, Error)]
pub enum VerifierError {
    #[error("deliverability request failed: {0}")]
    Transport(String),

    /// The upstream answered with a shape no adapter recognizes.
    #[error("unrecognized deliverability response shape: {0}")]
    UnrecognizedShape(String),
}
