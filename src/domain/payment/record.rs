//! Payment records and their lifecycle.
//!
//! One record per payment attempt, keyed by transaction id. The machine is
//! `pending -> success` (token issued) or `pending -> failed` (terminal).
//! Expiry is not a state transition: a successful record becomes inert
//! once the clock passes `expires_at`, evaluated lazily at read time.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, Timestamp, TransactionId};
use crate::domain::registration::Offering;

use super::AccessToken;

/// How long a successful payment grants access, from the moment of success.
pub const ACCESS_GRANT_HOURS: i64 = 48;

/// Payment attempt status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Created at submission, outcome not yet known.
    Pending,

    /// Gateway accepted the charge; an access token was issued.
    Success,

    /// Gateway declined or errored out. Terminal.
    Failed,
}

/// One payment attempt and its outcome.
///
/// Invariants:
/// - `access_token` and `expires_at` are present if and only if
///   `status == Success`.
/// - Records are never deleted; an expired success is inert, not removed.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    pub transaction_id: TransactionId,
    pub email: EmailAddress,
    pub offering: Offering,
    pub status: PaymentStatus,
    pub access_token: Option<AccessToken>,
    pub expires_at: Option<Timestamp>,
    pub meeting_url: Option<String>,
    pub failure_reason: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl PaymentRecord {
    /// Creates a pending record at registration submission time.
    pub fn new_pending(
        transaction_id: TransactionId,
        email: EmailAddress,
        offering: Offering,
        now: Timestamp,
    ) -> Self {
        Self {
            transaction_id,
            email,
            offering,
            status: PaymentStatus::Pending,
            access_token: None,
            expires_at: None,
            meeting_url: None,
            failure_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Transitions `pending -> success`, attaching the issued token, the
    /// grant expiry, and the offering's meeting link.
    ///
    /// # Errors
    ///
    /// Rejects re-entry: a record that already succeeded or failed cannot
    /// succeed (again).
    pub fn succeed(
        &mut self,
        token: AccessToken,
        expires_at: Timestamp,
        meeting_url: Option<String>,
        now: Timestamp,
    ) -> Result<(), DomainError> {
        if self.status != PaymentStatus::Pending {
            return Err(self.transition_error("success"));
        }
        self.status = PaymentStatus::Success;
        self.access_token = Some(token);
        self.expires_at = Some(expires_at);
        self.meeting_url = meeting_url;
        self.updated_at = now;
        Ok(())
    }

    /// Transitions `pending -> failed` with an internal reason.
    ///
    /// # Errors
    ///
    /// Rejects re-entry from any non-pending state.
    pub fn fail(&mut self, reason: impl Into<String>, now: Timestamp) -> Result<(), DomainError> {
        if self.status != PaymentStatus::Pending {
            return Err(self.transition_error("failed"));
        }
        self.status = PaymentStatus::Failed;
        self.failure_reason = Some(reason.into());
        self.updated_at = now;
        Ok(())
    }

    /// Whether this record grants access at `now`: successful and
    /// unexpired. Grants strictly before `expires_at`, denies at and
    /// after it.
    pub fn is_active(&self, now: Timestamp) -> bool {
        self.status == PaymentStatus::Success
            && self.expires_at.is_some_and(|expiry| expiry.is_after(&now))
    }

    /// Whether the presented token unlocks this record at `now`.
    ///
    /// Exact match, constant-time comparison.
    pub fn grants_access(&self, presented_token: &str, now: Timestamp) -> bool {
        self.is_active(now)
            && self
                .access_token
                .as_ref()
                .is_some_and(|token| token.matches(presented_token))
    }

    fn transition_error(&self, target: &str) -> DomainError {
        DomainError::new(
            ErrorCode::InvalidStateTransition,
            format!("Cannot transition {:?} record to {}", self.status, target),
        )
        .with_detail("transaction_id", self.transaction_id.to_string())
    }
}
