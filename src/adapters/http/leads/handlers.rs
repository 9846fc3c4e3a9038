//! HTTP handlers for lead-form endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::{
    LeadError, RequestBrochureCommand, RequestBrochureHandler, SubmitContactCommand,
    SubmitContactHandler,
};

use super::dto::{AckResponse, BrochureFormRequest, ContactFormRequest, ErrorResponse};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Leads API error that implements IntoResponse.
pub enum LeadsApiError {
    Validation(ErrorResponse),
    Upstream(String),
}

impl IntoResponse for LeadsApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            LeadsApiError::Validation(body) => {
                (StatusCode::BAD_REQUEST, Json(body)).into_response()
            }
            LeadsApiError::Upstream(msg) => {
                tracing::error!(error = %msg, "lead form upstream failure");
                (StatusCode::BAD_GATEWAY, Json(ErrorResponse::unavailable())).into_response()
            }
        }
    }
}

impl From<LeadError> for LeadsApiError {
    fn from(error: LeadError) -> Self {
        match error {
            LeadError::Validation(errors) => {
                LeadsApiError::Validation(ErrorResponse::validation(&errors))
            }
            LeadError::Sink(err) => LeadsApiError::Upstream(err.to_string()),
            LeadError::Dispatch(err) => LeadsApiError::Upstream(err.to_string()),
            LeadError::Verifier(err) => LeadsApiError::Upstream(err.to_string()),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state for lead-form endpoints.
#[derive(Clone)]
pub struct LeadsAppState {
    pub submit_contact: Arc<SubmitContactHandler>,
    pub request_brochure: Arc<RequestBrochureHandler>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/forms/contact
pub async fn submit_contact(
    State(state): State<LeadsAppState>,
    Json(request): Json<ContactFormRequest>,
) -> Result<Json<AckResponse>, LeadsApiError> {
    state
        .submit_contact
        .handle(SubmitContactCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
            message: request.message,
        })
        .await?;

    Ok(Json(AckResponse::ok()))
}

/// POST /api/forms/brochure
pub async fn request_brochure(
    State(state): State<LeadsAppState>,
    Json(request): Json<BrochureFormRequest>,
) -> Result<Json<AckResponse>, LeadsApiError> {
    state
        .request_brochure
        .handle(RequestBrochureCommand {
            name: request.name,
            email: request.email,
            phone: request.phone,
        })
        .await?;

    Ok(Json(AckResponse::ok()))
}
