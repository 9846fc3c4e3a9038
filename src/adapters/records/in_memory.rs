//! In-memory payment record store.
//!
//! Backs development mode and tests. The mutex-guarded map gives the
//! same guarantee the database unique constraint gives in production:
//! insert-if-absent keyed by transaction id, and terminal states are
//! never overwritten.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp, TransactionId};
use crate::domain::payment::{PaymentRecord, PaymentStatus};
use crate::ports::{CompletedPayment, InsertOutcome, PaymentRecordStore};

/// In-memory implementation of the PaymentRecordStore port.
#[derive(Default)]
pub struct InMemoryPaymentRecords {
    records: Mutex<HashMap<TransactionId, PaymentRecord>>,
}

impl InMemoryPaymentRecords {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PaymentRecordStore for InMemoryPaymentRecords {
    async fn insert_pending(&self, record: PaymentRecord) -> Result<InsertOutcome, DomainError> {
        let mut records = self.records.lock().unwrap();
        match records.entry(record.transaction_id) {
            std::collections::hash_map::Entry::Occupied(existing) => {
                Ok(InsertOutcome::Existing(existing.get().clone()))
            }
            std::collections::hash_map::Entry::Vacant(slot) => {
                slot.insert(record);
                Ok(InsertOutcome::Created)
            }
        }
    }

    async fn complete(
        &self,
        transaction_id: &TransactionId,
        completion: CompletedPayment,
    ) -> Result<PaymentRecord, DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(transaction_id)
            .ok_or_else(|| unknown_transaction(transaction_id))?;

        // Only pending transitions; a terminal record is returned as-is.
        if record.status == PaymentStatus::Pending {
            record.succeed(
                completion.access_token,
                completion.expires_at,
                completion.meeting_url,
                Timestamp::now(),
            )?;
        }
        Ok(record.clone())
    }

    async fn mark_failed(
        &self,
        transaction_id: &TransactionId,
        reason: &str,
    ) -> Result<PaymentRecord, DomainError> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .get_mut(transaction_id)
            .ok_or_else(|| unknown_transaction(transaction_id))?;

        if record.status == PaymentStatus::Pending {
            record.fail(reason, Timestamp::now())?;
        }
        Ok(record.clone())
    }

    async fn find_by_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(self.records.lock().unwrap().get(transaction_id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        let records = self.records.lock().unwrap();
        let mut matching: Vec<PaymentRecord> = records
            .values()
            .filter(|record| &record.email == email)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(matching)
    }
}

fn unknown_transaction(transaction_id: &TransactionId) -> DomainError {
    DomainError::new(
        crate::domain::foundation::ErrorCode::TransactionNotFound,
        "No payment record for transaction",
    )
    .with_detail("transaction_id", transaction_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::AccessToken;
    use crate::domain::registration::Offering;

    fn pending(txn: TransactionId, email: &str) -> PaymentRecord {
        PaymentRecord::new_pending(
            txn,
            EmailAddress::parse(email).unwrap(),
            Offering::Workshop,
            Timestamp::now(),
        )
    }

    fn completion() -> CompletedPayment {
        CompletedPayment {
            access_token: AccessToken::issue(),
            expires_at: Timestamp::now().plus_hours(48),
            meeting_url: None,
        }
    }

    #[tokio::test]
    async fn second_insert_observes_existing_record() {
        let store = InMemoryPaymentRecords::new();
        let txn = TransactionId::new();

        let first = store.insert_pending(pending(txn, "a@x.com")).await.unwrap();
        assert!(matches!(first, InsertOutcome::Created));

        let second = store
            .insert_pending(pending(txn, "other@x.com"))
            .await
            .unwrap();
        match second {
            InsertOutcome::Existing(record) => {
                // The winner's record, not the loser's input.
                assert_eq!(record.email.as_str(), "a@x.com");
            }
            InsertOutcome::Created => panic!("duplicate insert must not create"),
        }
    }

    #[tokio::test]
    async fn complete_is_a_one_shot_transition() {
        let store = InMemoryPaymentRecords::new();
        let txn = TransactionId::new();
        store.insert_pending(pending(txn, "a@x.com")).await.unwrap();

        let first = store.complete(&txn, completion()).await.unwrap();
        let first_token = first.access_token.clone().unwrap();

        // A second completion returns the stored record unchanged.
        let second = store.complete(&txn, completion()).await.unwrap();
        assert_eq!(second.access_token.unwrap().as_str(), first_token.as_str());
    }

    #[tokio::test]
    async fn mark_failed_does_not_downgrade_success() {
        let store = InMemoryPaymentRecords::new();
        let txn = TransactionId::new();
        store.insert_pending(pending(txn, "a@x.com")).await.unwrap();
        store.complete(&txn, completion()).await.unwrap();

        let record = store.mark_failed(&txn, "late failure").await.unwrap();
        assert_eq!(record.status, PaymentStatus::Success);
    }

    #[tokio::test]
    async fn complete_unknown_transaction_errors() {
        let store = InMemoryPaymentRecords::new();
        let err = store
            .complete(&TransactionId::new(), completion())
            .await
            .unwrap_err();
        assert_eq!(
            err.code,
            crate::domain::foundation::ErrorCode::TransactionNotFound
        );
    }

    #[tokio::test]
    async fn find_by_email_returns_newest_first() {
        let store = InMemoryPaymentRecords::new();
        let txn_a = TransactionId::new();
        let txn_b = TransactionId::new();

        let mut older = pending(txn_a, "a@x.com");
        older.created_at = Timestamp::now().minus_hours(2);
        store.insert_pending(older).await.unwrap();
        store.insert_pending(pending(txn_b, "a@x.com")).await.unwrap();
        store
            .insert_pending(pending(TransactionId::new(), "other@x.com"))
            .await
            .unwrap();

        let found = store
            .find_by_email(&EmailAddress::parse("a@x.com").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].transaction_id, txn_b);
    }
}
