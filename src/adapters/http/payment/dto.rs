//! HTTP DTOs for payment endpoints.
//!
//! Field names are camelCase: they are the published contract the site's
//! frontend already speaks.

use serde::{Deserialize, Serialize};

use crate::application::handlers::PaymentOutcome;
use crate::domain::foundation::ValidationError;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of POST /api/payment/workshop/dummy-pay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkshopRegistrationRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domain_interest: String,
    /// Consent flag; absent means no consent.
    #[serde(default)]
    pub whatsapp_opt_in: bool,
}

/// Body of POST /api/payment/cohort/dummy-pay.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CohortEnrollmentRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Query of GET /api/payment/{purpose}/confirm.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfirmParams {
    pub txn: String,
    pub email: String,
    pub sig: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// `{ success, orderId?, accessToken?, message?, meetingUrl? }`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Always present on success, possibly null; absent on failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_url: Option<Option<String>>,
}

impl From<PaymentOutcome> for PaymentResponse {
    fn from(outcome: PaymentOutcome) -> Self {
        match outcome {
            PaymentOutcome::Granted {
                transaction_id,
                access_token,
                meeting_url,
                ..
            } => Self {
                success: true,
                order_id: Some(transaction_id.to_string()),
                access_token: Some(access_token.as_str().to_string()),
                message: None,
                meeting_url: Some(meeting_url),
            },
            PaymentOutcome::Declined {
                transaction_id,
                message,
            } => Self {
                success: false,
                order_id: Some(transaction_id.to_string()),
                access_token: None,
                message: Some(message),
                meeting_url: None,
            },
        }
    }
}

/// Error body rendered to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn validation(errors: &[ValidationError]) -> Self {
        Self {
            error: ErrorBody {
                code: "VALIDATION_FAILED".to_string(),
                message: "Please correct the highlighted fields.".to_string(),
                fields: errors
                    .iter()
                    .map(|e| FieldError {
                        field: e.field().to_string(),
                        message: e.to_string(),
                    })
                    .collect(),
            },
        }
    }

    pub fn simple(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.to_string(),
                message: message.into(),
                fields: Vec::new(),
            },
        }
    }
}
