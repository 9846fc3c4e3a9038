//! HTTP DTOs for lead-form endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Body of POST /api/forms/contact.
#[derive(Debug, Clone, Deserialize)]
pub struct ContactFormRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Body of POST /api/forms/brochure.
#[derive(Debug, Clone, Deserialize)]
pub struct BrochureFormRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// `{ok: true}` acknowledgement.
#[derive(Debug, Clone, Serialize)]
pub struct AckResponse {
    pub ok: bool,
}

impl AckResponse {
    pub fn ok() -> Self {
        Self { ok: true }
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

    pub fn unavailable() -> Self {
        Self {
            error: ErrorBody {
                code: "SERVICE_UNAVAILABLE".to_string(),
                message: "Could not record your submission. Please try again.".to_string(),
                fields: Vec::new(),
            },
        }
    }
}
