//! Payment record persistence port.
//!
//! Transaction-id uniqueness at this layer is the sole source of truth
//! for payment idempotency: `insert_pending` and `complete` are atomic
//! check-and-set operations, and a writer that loses the race observes
//! the existing record instead of overwriting it.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp, TransactionId};
use crate::domain::payment::{AccessToken, PaymentRecord};

/// Result of an atomic pending insert.
#[derive(Debug, Clone)]
pub enum InsertOutcome {
    /// The record was stored; this writer owns the attempt.
    Created,

    /// A record with this transaction id already exists. The caller must
    /// treat this as a duplicate submission and return the stored
    /// outcome, never re-charge or re-issue.
    Existing(PaymentRecord),
}

/// Fields applied when a pending record transitions to success.
#[derive(Debug, Clone)]
pub struct CompletedPayment {
    pub access_token: AccessToken,
    pub expires_at: Timestamp,
    pub meeting_url: Option<String>,
}

/// Port for payment record storage.
#[async_trait]
pub trait PaymentRecordStore: Send + Sync {
    /// Inserts a pending record, atomically keyed by transaction id.
    async fn insert_pending(&self, record: PaymentRecord) -> Result<InsertOutcome, DomainError>;

    /// Transitions a pending record to success and returns the stored
    /// record.
    ///
    /// Only a pending record transitions; if the record already reached a
    /// terminal state this returns it unchanged, so a repeated call never
    /// issues a second grant.
    async fn complete(
        &self,
        transaction_id: &TransactionId,
        completion: CompletedPayment,
    ) -> Result<PaymentRecord, DomainError>;

    /// Transitions a pending record to failed and returns the stored
    /// record. A record that already reached a terminal state is returned
    /// unchanged.
    async fn mark_failed(
        &self,
        transaction_id: &TransactionId,
        reason: &str,
    ) -> Result<PaymentRecord, DomainError>;

    /// Looks up a record by transaction id.
    async fn find_by_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<PaymentRecord>, DomainError>;

    /// All records bound to an email, newest first.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_record_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn PaymentRecordStore) {}
    }
}
