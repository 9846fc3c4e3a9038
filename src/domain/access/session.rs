//! Client-held access credentials.

use crate::domain::foundation::EmailAddress;

/// The credential pair a browser holds after a successful payment and
/// presents on every dashboard visit.
///
/// This is an explicit session object rather than ambient storage: the
/// call site constructs it from whatever transport carried the values
/// (Authorization header or the legacy query-parameter shim), and the
/// invalidation rule is defined here: a client must discard its copy
/// whenever the gate answers `AccessDenied`. There is no server-side
/// revocation; expiry of the underlying grant is the only other way a
/// credential dies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessCredentials {
    pub email: EmailAddress,
    pub token: String,
}

impl AccessCredentials {
    /// Builds credentials from transport values.
    pub fn new(email: EmailAddress, token: impl Into<String>) -> Self {
        Self {
            email,
            token: token.into(),
        }
    }
}
