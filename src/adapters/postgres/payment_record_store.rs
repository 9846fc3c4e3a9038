//! PostgreSQL implementation of PaymentRecordStore.
//!
//! The unique constraint on `transaction_id` is the concurrency story:
//! `insert_pending` uses `ON CONFLICT DO NOTHING` and the loser reads
//! back the winner's row; `complete` and `mark_failed` update only rows
//! still in `pending`, so a terminal row is never overwritten.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, EmailAddress, ErrorCode, Timestamp, TransactionId,
};
use crate::domain::payment::{AccessToken, PaymentRecord, PaymentStatus};
use crate::domain::registration::Offering;
use crate::ports::{CompletedPayment, InsertOutcome, PaymentRecordStore};

/// PostgreSQL implementation of the PaymentRecordStore port.
pub struct PgPaymentRecordStore {
    pool: PgPool,
}

impl PgPaymentRecordStore {
    /// Creates a store backed by the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch(&self, transaction_id: &TransactionId) -> Result<Option<PaymentRecord>, DomainError> {
        let row: Option<PaymentRecordRow> = sqlx::query_as(
            r#"
            SELECT transaction_id, email, offering, status, access_token,
                   expires_at, meeting_url, failure_reason, created_at, updated_at
            FROM payment_records
            WHERE transaction_id = $1
            "#,
        )
        .bind(transaction_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_error)?;

        row.map(PaymentRecord::try_from).transpose()
    }

    async fn fetch_required(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<PaymentRecord, DomainError> {
        self.fetch(transaction_id).await?.ok_or_else(|| {
            DomainError::new(ErrorCode::TransactionNotFound, "No payment record for transaction")
                .with_detail("transaction_id", transaction_id.to_string())
        })
    }
}

/// Database row representation of a payment record.
#[derive(Debug, sqlx::FromRow)]
struct PaymentRecordRow {
    transaction_id: Uuid,
    email: String,
    offering: String,
    status: String,
    access_token: Option<String>,
    expires_at: Option<DateTime<Utc>>,
    meeting_url: Option<String>,
    failure_reason: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PaymentRecordRow> for PaymentRecord {
    type Error = DomainError;

    fn try_from(row: PaymentRecordRow) -> Result<Self, Self::Error> {
        Ok(PaymentRecord {
            transaction_id: TransactionId::from_uuid(row.transaction_id),
            email: EmailAddress::parse(&row.email).map_err(|e| {
                DomainError::new(ErrorCode::DatabaseError, format!("Invalid email: {}", e))
            })?,
            offering: parse_offering(&row.offering)?,
            status: parse_status(&row.status)?,
            access_token: row.access_token.map(AccessToken::from_stored),
            expires_at: row.expires_at.map(Timestamp::from_datetime),
            meeting_url: row.meeting_url,
            failure_reason: row.failure_reason,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

fn parse_offering(s: &str) -> Result<Offering, DomainError> {
    match s {
        "workshop" => Ok(Offering::Workshop),
        "cohort" => Ok(Offering::Cohort),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid offering value: {}", s),
        )),
    }
}

fn parse_status(s: &str) -> Result<PaymentStatus, DomainError> {
    match s {
        "pending" => Ok(PaymentStatus::Pending),
        "success" => Ok(PaymentStatus::Success),
        "failed" => Ok(PaymentStatus::Failed),
        _ => Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid status value: {}", s),
        )),
    }
}

fn status_to_string(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Pending => "pending",
        PaymentStatus::Success => "success",
        PaymentStatus::Failed => "failed",
    }
}

fn db_error(err: sqlx::Error) -> DomainError {
    DomainError::database(err.to_string())
}

#[async_trait]
impl PaymentRecordStore for PgPaymentRecordStore {
    async fn insert_pending(&self, record: PaymentRecord) -> Result<InsertOutcome, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO payment_records (
                transaction_id, email, offering, status, created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (transaction_id) DO NOTHING
            "#,
        )
        .bind(record.transaction_id.as_uuid())
        .bind(record.email.as_str())
        .bind(record.offering.as_str())
        .bind(status_to_string(record.status))
        .bind(record.created_at.as_datetime())
        .bind(record.updated_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 1 {
            Ok(InsertOutcome::Created)
        } else {
            // Lost the race: observe the winner's row.
            let existing = self.fetch_required(&record.transaction_id).await?;
            Ok(InsertOutcome::Existing(existing))
        }
    }

    async fn complete(
        &self,
        transaction_id: &TransactionId,
        completion: CompletedPayment,
    ) -> Result<PaymentRecord, DomainError> {
        sqlx::query(
            r#"
            UPDATE payment_records
            SET status = 'success',
                access_token = $2,
                expires_at = $3,
                meeting_url = $4,
                updated_at = $5
            WHERE transaction_id = $1 AND status = 'pending'
            "#,
        )
        .bind(transaction_id.as_uuid())
        .bind(completion.access_token.as_str())
        .bind(completion.expires_at.as_datetime())
        .bind(completion.meeting_url.as_deref())
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        // Whatever is stored now is the authoritative outcome.
        self.fetch_required(transaction_id).await
    }

    async fn mark_failed(
        &self,
        transaction_id: &TransactionId,
        reason: &str,
    ) -> Result<PaymentRecord, DomainError> {
        sqlx::query(
            r#"
            UPDATE payment_records
            SET status = 'failed',
                failure_reason = $2,
                updated_at = $3
            WHERE transaction_id = $1 AND status = 'pending'
            "#,
        )
        .bind(transaction_id.as_uuid())
        .bind(reason)
        .bind(Timestamp::now().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(db_error)?;

        self.fetch_required(transaction_id).await
    }

    async fn find_by_transaction(
        &self,
        transaction_id: &TransactionId,
    ) -> Result<Option<PaymentRecord>, DomainError> {
        self.fetch(transaction_id).await
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        let rows: Vec<PaymentRecordRow> = sqlx::query_as(
            r#"
            SELECT transaction_id, email, offering, status, access_token,
                   expires_at, meeting_url, failure_reason, created_at, updated_at
            FROM payment_records
            WHERE email = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(email.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(PaymentRecord::try_from).collect()
    }
}
