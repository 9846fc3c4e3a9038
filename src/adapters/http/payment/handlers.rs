//! HTTP handlers for payment endpoints.

use std::sync::Arc;

use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    ConfirmPaymentHandler, ConfirmPaymentQuery, EnrollCohortCommand, EnrollCohortHandler,
    RegisterWorkshopCommand, RegisterWorkshopHandler, RegistrationError,
};
use crate::domain::foundation::{EmailAddress, TransactionId, ValidationError};
use crate::domain::payment::ConfirmError;
use crate::domain::registration::Offering;

use super::dto::{
    CohortEnrollmentRequest, ConfirmParams, ErrorResponse, PaymentResponse,
    WorkshopRegistrationRequest,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Payment API error that implements IntoResponse.
pub enum PaymentApiError {
    Validation(Vec<ValidationError>),
    BadRequest(String),
    InvalidSignature,
    NotFound,
    Internal(String),
}

impl IntoResponse for PaymentApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            PaymentApiError::Validation(errors) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::validation(&errors))
            }
            PaymentApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::simple("BAD_REQUEST", msg),
            ),
            PaymentApiError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::simple("INVALID_SIGNATURE", "Confirmation link is not valid."),
            ),
            PaymentApiError::NotFound => (
                StatusCode::NOT_FOUND,
                ErrorResponse::simple("TRANSACTION_NOT_FOUND", "Transaction not found."),
            ),
            PaymentApiError::Internal(msg) => {
                // Internal detail stays server-side.
                tracing::error!(error = %msg, "payment endpoint failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::simple("INTERNAL_ERROR", "Payment failed, please retry."),
                )
            }
        };
        (status, Json(error)).into_response()
    }
}

impl From<RegistrationError> for PaymentApiError {
    fn from(error: RegistrationError) -> Self {
        match error {
            RegistrationError::Validation(errors) => PaymentApiError::Validation(errors),
            RegistrationError::Payment(err) => PaymentApiError::Internal(err.to_string()),
        }
    }
}

impl From<ConfirmError> for PaymentApiError {
    fn from(error: ConfirmError) -> Self {
        match error {
            ConfirmError::InvalidSignature => PaymentApiError::InvalidSignature,
            ConfirmError::TransactionNotFound => PaymentApiError::NotFound,
            ConfirmError::Infrastructure(msg) => PaymentApiError::Internal(msg),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for payment endpoints.
#[derive(Clone)]
pub struct PaymentAppState {
    pub register_workshop: Arc<RegisterWorkshopHandler>,
    pub enroll_cohort: Arc<EnrollCohortHandler>,
    pub confirm: Arc<ConfirmPaymentHandler>,

    /// Whether the development-only dummy-pay routes are mounted.
    pub dummy_pay_enabled: bool,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/payment/workshop/dummy-pay
pub async fn dummy_pay_workshop(
    State(state): State<PaymentAppState>,
    Json(request): Json<WorkshopRegistrationRequest>,
) -> Result<Json<PaymentResponse>, PaymentApiError> {
    let outcome = state
        .register_workshop
        .handle(RegisterWorkshopCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
            domain_interest: request.domain_interest,
            whatsapp_opt_in: request.whatsapp_opt_in,
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// POST /api/payment/cohort/dummy-pay
pub async fn dummy_pay_cohort(
    State(state): State<PaymentAppState>,
    Json(request): Json<CohortEnrollmentRequest>,
) -> Result<Json<PaymentResponse>, PaymentApiError> {
    let outcome = state
        .enroll_cohort
        .handle(EnrollCohortCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
        })
        .await?;

    Ok(Json(outcome.into()))
}

/// GET /api/payment/:purpose/confirm?txn&email&sig
pub async fn confirm_payment(
    State(state): State<PaymentAppState>,
    Path(purpose): Path<String>,
    Query(params): Query<ConfirmParams>,
) -> Result<Json<PaymentResponse>, PaymentApiError> {
    // The purpose segment must name a real offering.
    let _offering: Offering = purpose
        .parse()
        .map_err(|_| PaymentApiError::BadRequest("Unknown payment purpose".to_string()))?;

    let transaction_id: TransactionId = params
        .txn
        .parse()
        .map_err(|_| PaymentApiError::BadRequest("Invalid transaction id".to_string()))?;

    let email = EmailAddress::parse(&params.email)
        .map_err(|e| PaymentApiError::Validation(vec![e]))?;

    let outcome = state
        .confirm
        .handle(ConfirmPaymentQuery {
            transaction_id,
            email,
            signature: params.sig,
        })
        .await?;

    Ok(Json(outcome.into()))
}
