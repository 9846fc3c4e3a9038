//! Uniform access denial.

use thiserror::Error;

/// The single denial outcome of the resource gate.
///
/// Unknown email, wrong token, and expired grant all collapse into this
/// one shape so a caller cannot distinguish "no such account" from
/// "wrong credential" (account-enumeration proofing). The user-facing
/// remedy is always the same: register again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("access denied")]
pub struct AccessDenied;
