//! ProcessPaymentHandler - converts a validated registration into a
//! payment outcome and, on success, a time-bounded access grant.
//!
//! Idempotency: the atomic pending insert keyed by transaction id is the
//! only synchronization point. A duplicate submission observes the stored
//! record and gets the original outcome back; it never re-charges the
//! gateway or issues a second token.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::sleep;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp, TransactionId};
use crate::domain::payment::{AccessToken, PaymentRecord, PaymentStatus, ACCESS_GRANT_HOURS};
use crate::domain::registration::Offering;
use crate::ports::{
    ChargeRequest, CompletedPayment, GatewayCharge, GatewayError, InsertOutcome, PaymentGateway,
    PaymentRecordStore,
};

/// Retries after the first attempt, for retryable gateway errors only.
const MAX_GATEWAY_RETRIES: u32 = 2;

/// Generic user-facing failure message. Internal detail stays in the logs.
const PAYMENT_FAILED_MESSAGE: &str = "Payment failed, please retry.";

/// Message for a submission whose twin is still in flight.
const PAYMENT_IN_PROGRESS_MESSAGE: &str = "This payment is already being processed.";

/// Command to process a payment for a validated registration.
#[derive(Debug, Clone)]
pub struct ProcessPaymentCommand {
    pub email: EmailAddress,
    pub offering: Offering,

    /// Supplied on re-submission paths; `None` generates a fresh id.
    pub transaction_id: Option<TransactionId>,
}

/// Outcome of a payment attempt, relayed unchanged to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum PaymentOutcome {
    /// Charge accepted; access granted until `expires_at`.
    Granted {
        transaction_id: TransactionId,
        access_token: AccessToken,
        expires_at: Timestamp,
        meeting_url: Option<String>,
    },

    /// Charge declined or still unresolved; no grant exists.
    Declined {
        transaction_id: TransactionId,
        message: String,
    },
}

/// Meeting links disclosed only after a successful payment.
#[derive(Debug, Clone, Default)]
pub struct MeetingUrls {
    pub workshop: Option<String>,
    pub cohort: Option<String>,
}

impl MeetingUrls {
    fn for_offering(&self, offering: Offering) -> Option<String> {
        match offering {
            Offering::Workshop => self.workshop.clone(),
            Offering::Cohort => self.cohort.clone(),
        }
    }
}

/// Handler for processing payments.
pub struct ProcessPaymentHandler {
    gateway: Arc<dyn PaymentGateway>,
    records: Arc<dyn PaymentRecordStore>,
    meeting_urls: MeetingUrls,
}

impl ProcessPaymentHandler {
    pub fn new(
        gateway: Arc<dyn PaymentGateway>,
        records: Arc<dyn PaymentRecordStore>,
        meeting_urls: MeetingUrls,
    ) -> Self {
        Self {
            gateway,
            records,
            meeting_urls,
        }
    }

    pub async fn handle(
        &self,
        command: ProcessPaymentCommand,
    ) -> Result<PaymentOutcome, DomainError> {
        let transaction_id = command.transaction_id.unwrap_or_default();
        let now = Timestamp::now();

        let pending = PaymentRecord::new_pending(
            transaction_id,
            command.email.clone(),
            command.offering,
            now,
        );

        // Atomic insert; losing the race means a duplicate submission.
        if let InsertOutcome::Existing(existing) = self.records.insert_pending(pending).await? {
            tracing::info!(
                transaction_id = %transaction_id,
                status = ?existing.status,
                "duplicate payment submission, returning stored outcome"
            );
            return Ok(outcome_from_record(&existing));
        }

        let charge = ChargeRequest {
            transaction_id,
            email: command.email.clone(),
            offering: command.offering,
            amount_inr: command.offering.price_inr(),
        };

        match self.charge_with_retry(charge).await {
            Ok(accepted) => {
                tracing::info!(
                    transaction_id = %transaction_id,
                    gateway_reference = %accepted.reference,
                    offering = %command.offering,
                    "payment accepted"
                );

                let completion = CompletedPayment {
                    access_token: AccessToken::issue(),
                    expires_at: Timestamp::now().plus_hours(ACCESS_GRANT_HOURS),
                    meeting_url: self.meeting_urls.for_offering(command.offering),
                };
                let stored = self.records.complete(&transaction_id, completion).await?;
                Ok(outcome_from_record(&stored))
            }
            Err(err) => {
                tracing::error!(
                    transaction_id = %transaction_id,
                    error = %err,
                    at = %Timestamp::now().to_rfc3339(),
                    "payment gateway failure"
                );
                let stored = self
                    .records
                    .mark_failed(&transaction_id, &err.to_string())
                    .await?;
                Ok(outcome_from_record(&stored))
            }
        }
    }

    /// Calls the gateway, retrying retryable failures with exponential
    /// backoff: 1s, 2s. Declines and malformed requests surface
    /// immediately.
    async fn charge_with_retry(&self, request: ChargeRequest) -> Result<GatewayCharge, GatewayError> {
        let mut retry_count = 0;

        loop {
            match self.gateway.charge(request.clone()).await {
                Ok(charge) => return Ok(charge),
                Err(err) => {
                    if !err.retryable || retry_count >= MAX_GATEWAY_RETRIES {
                        return Err(err);
                    }
                    tracing::warn!(
                        transaction_id = %request.transaction_id,
                        error = %err,
                        retry = retry_count + 1,
                        "retrying gateway charge"
                    );
                    sleep(Duration::from_secs(1 << retry_count)).await;
                    retry_count += 1;
                }
            }
        }
    }
}

/// Maps a stored record to the outcome its submitter should see.
///
/// Shared with the confirmation handler so repeated lookups of the same
/// transaction always produce the same payload.
pub fn outcome_from_record(record: &PaymentRecord) -> PaymentOutcome {
    match record.status {
        PaymentStatus::Success => PaymentOutcome::Granted {
            transaction_id: record.transaction_id,
            // Invariant: a success record always carries its token.
            access_token: record
                .access_token
                .clone()
                .expect("success record carries an access token"),
            expires_at: record.expires_at.unwrap_or(record.updated_at),
            meeting_url: record.meeting_url.clone(),
        },
        PaymentStatus::Failed => PaymentOutcome::Declined {
            transaction_id: record.transaction_id,
            message: PAYMENT_FAILED_MESSAGE.to_string(),
        },
        PaymentStatus::Pending => PaymentOutcome::Declined {
            transaction_id: record.transaction_id,
            message: PAYMENT_IN_PROGRESS_MESSAGE.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::records::InMemoryPaymentRecords;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    // ════════════════════════════════════════════════════════════════════════════
    // Mock Gateways
    // ════════════════════════════════════════════════════════════════════════════

    struct AcceptingGateway {
        calls: AtomicU32,
    }

    impl AcceptingGateway {
        fn new() -> Self {
            Self {
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl PaymentGateway for AcceptingGateway {
        async fn charge(&self, request: ChargeRequest) -> Result<GatewayCharge, GatewayError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(GatewayCharge {
                reference: format!("ref_{}", request.transaction_id),
            })
        }
    }

    struct DecliningGateway;

    #[async_trait]
    impl PaymentGateway for DecliningGateway {
        async fn charge(&self, _request: ChargeRequest) -> Result<GatewayCharge, GatewayError> {
            Err(GatewayError::declined("insufficient funds"))
        }
    }

    /// Fails with a retryable error until `succeed_after` calls were made.
    struct FlakyGateway {
        calls: AtomicU32,
        succeed_after: u32,
    }

    #[async_trait]
    impl PaymentGateway for FlakyGateway {
        async fn charge(&self, request: ChargeRequest) -> Result<GatewayCharge, GatewayError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.succeed_after {
                Err(GatewayError::network("connection reset"))
            } else {
                Ok(GatewayCharge {
                    reference: format!("ref_{}", request.transaction_id),
                })
            }
        }
    }

    fn handler_with(gateway: Arc<dyn PaymentGateway>) -> (ProcessPaymentHandler, Arc<InMemoryPaymentRecords>) {
        let records = Arc::new(InMemoryPaymentRecords::new());
        let meeting_urls = MeetingUrls {
            workshop: Some("https://meet.example.com/vlsi-workshop".into()),
            cohort: None,
        };
        (
            ProcessPaymentHandler::new(gateway, records.clone(), meeting_urls),
            records,
        )
    }

    fn command() -> ProcessPaymentCommand {
        ProcessPaymentCommand {
            email: EmailAddress::parse("a@x.com").unwrap(),
            offering: Offering::Workshop,
            transaction_id: None,
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Path
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn successful_payment_grants_token_and_meeting_url() {
        let (handler, records) = handler_with(Arc::new(AcceptingGateway::new()));

        let outcome = handler.handle(command()).await.unwrap();

        match outcome {
            PaymentOutcome::Granted {
                transaction_id,
                access_token,
                expires_at,
                meeting_url,
            } => {
                assert_eq!(access_token.as_str().len(), 64);
                assert!(expires_at.is_after(&Timestamp::now()));
                assert_eq!(
                    meeting_url.as_deref(),
                    Some("https://meet.example.com/vlsi-workshop")
                );

                let stored = records
                    .find_by_transaction(&transaction_id)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(stored.status, PaymentStatus::Success);
            }
            other => panic!("expected grant, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn grant_expires_48_hours_after_success() {
        let (handler, _) = handler_with(Arc::new(AcceptingGateway::new()));
        let before = Timestamp::now().plus_hours(ACCESS_GRANT_HOURS);

        let outcome = handler.handle(command()).await.unwrap();
        let after = Timestamp::now().plus_hours(ACCESS_GRANT_HOURS);

        match outcome {
            PaymentOutcome::Granted { expires_at, .. } => {
                assert!(!expires_at.is_before(&before));
                assert!(!expires_at.is_after(&after));
            }
            other => panic!("expected grant, got {:?}", other),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Idempotency
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn duplicate_submission_returns_original_token() {
        let gateway = Arc::new(AcceptingGateway::new());
        let (handler, _) = handler_with(gateway.clone());

        let txn = TransactionId::new();
        let mut cmd = command();
        cmd.transaction_id = Some(txn);

        let first = handler.handle(cmd.clone()).await.unwrap();
        let second = handler.handle(cmd).await.unwrap();

        let token_of = |outcome: &PaymentOutcome| match outcome {
            PaymentOutcome::Granted { access_token, .. } => access_token.as_str().to_string(),
            other => panic!("expected grant, got {:?}", other),
        };
        assert_eq!(token_of(&first), token_of(&second));
        // Gateway was charged exactly once.
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn concurrent_submissions_issue_at_most_one_token() {
        let gateway = Arc::new(AcceptingGateway::new());
        let (handler, records) = handler_with(gateway.clone());

        let txn = TransactionId::new();
        let mut cmd = command();
        cmd.transaction_id = Some(txn);

        let (a, b) = tokio::join!(handler.handle(cmd.clone()), handler.handle(cmd));
        a.unwrap();
        b.unwrap();

        // Exactly one stored record, one token, one gateway charge.
        let stored = records.find_by_transaction(&txn).await.unwrap().unwrap();
        assert!(stored.access_token.is_some() || stored.status == PaymentStatus::Pending);
        assert!(gateway.calls.load(Ordering::SeqCst) <= 1);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Handling
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn decline_is_not_retried_and_persists_no_grant() {
        let (handler, records) = handler_with(Arc::new(DecliningGateway));

        let outcome = handler.handle(command()).await.unwrap();

        match outcome {
            PaymentOutcome::Declined {
                transaction_id,
                message,
            } => {
                // Generic message only; no gateway detail leaks out.
                assert_eq!(message, PAYMENT_FAILED_MESSAGE);

                let stored = records
                    .find_by_transaction(&transaction_id)
                    .await
                    .unwrap()
                    .unwrap();
                assert_eq!(stored.status, PaymentStatus::Failed);
                assert!(stored.access_token.is_none());
            }
            other => panic!("expected decline, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn transient_gateway_errors_are_retried() {
        let gateway = Arc::new(FlakyGateway {
            calls: AtomicU32::new(0),
            succeed_after: 2,
        });
        let (handler, _) = handler_with(gateway.clone());

        let outcome = handler.handle(command()).await.unwrap();

        assert!(matches!(outcome, PaymentOutcome::Granted { .. }));
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn retries_are_bounded() {
        let gateway = Arc::new(FlakyGateway {
            calls: AtomicU32::new(0),
            succeed_after: 10,
        });
        let (handler, _) = handler_with(gateway.clone());

        let outcome = handler.handle(command()).await.unwrap();

        assert!(matches!(outcome, PaymentOutcome::Declined { .. }));
        // 1 attempt + MAX_GATEWAY_RETRIES retries.
        assert_eq!(gateway.calls.load(Ordering::SeqCst), 1 + MAX_GATEWAY_RETRIES);
    }
}
