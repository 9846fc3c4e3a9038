//! ConfirmPaymentHandler - redirect-based payment confirmation.
//!
//! Redirect gateways bounce the browser to
//! `/api/payment/{purpose}/confirm?txn&email&sig`. This handler is an
//! idempotent read: it verifies the signature, loads the record, checks
//! the email binding, and returns the same payload `process` produced.
//! It never issues tokens or mutates records, so calling it any number
//! of times for the same transaction is safe.

use std::sync::Arc;

use crate::domain::foundation::{EmailAddress, TransactionId};
use crate::domain::payment::{ConfirmError, ConfirmSigner};
use crate::ports::PaymentRecordStore;

use super::{outcome_from_record, PaymentOutcome};

/// Query parsed from the confirmation redirect.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentQuery {
    pub transaction_id: TransactionId,
    pub email: EmailAddress,
    pub signature: String,
}

/// Handler for payment confirmation redirects.
pub struct ConfirmPaymentHandler {
    records: Arc<dyn PaymentRecordStore>,
    signer: Arc<ConfirmSigner>,
}

impl ConfirmPaymentHandler {
    pub fn new(records: Arc<dyn PaymentRecordStore>, signer: Arc<ConfirmSigner>) -> Self {
        Self { records, signer }
    }

    pub async fn handle(
        &self,
        query: ConfirmPaymentQuery,
    ) -> Result<PaymentOutcome, ConfirmError> {
        // Signature first: nothing is looked up for a forged request.
        if let Err(err) = self.signer.verify(&query.transaction_id, &query.signature) {
            tracing::warn!(
                transaction_id = %query.transaction_id,
                "confirmation signature mismatch; possible tampering"
            );
            return Err(err);
        }

        let record = self
            .records
            .find_by_transaction(&query.transaction_id)
            .await
            .map_err(|e| ConfirmError::Infrastructure(e.to_string()))?
            .ok_or(ConfirmError::TransactionNotFound)?;

        // Wrong email gets the same answer as an unknown transaction.
        if record.email != query.email {
            tracing::warn!(
                transaction_id = %query.transaction_id,
                "confirmation email does not match record"
            );
            return Err(ConfirmError::TransactionNotFound);
        }

        Ok(outcome_from_record(&record))
    }
}
