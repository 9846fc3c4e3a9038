//! HTTP adapter for the email-deliverability heuristic service.
//!
//! The upstream answers with one of several undocumented JSON shapes.
//! Rather than duck-typing into a silent default, a closed ordered set
//! of shape adapters maps each known shape to the canonical verdict; a
//! payload no adapter recognizes is an explicit error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::domain::foundation::EmailAddress;
use crate::ports::{Deliverability, EmailVerifier, VerifierError};

/// One known upstream shape: name for logs, mapper to the verdict.
type ShapeAdapter = (&'static str, fn(&Value) -> Option<Deliverability>);

/// Known upstream response shapes, tried in order.
const SHAPE_ADAPTERS: &[ShapeAdapter] = &[
    ("deliverable_flag", from_deliverable_flag),
    ("status_string", from_status_string),
    ("nested_result", from_nested_result),
    ("bare_bool", from_bare_bool),
];

/// `{"deliverable": true}`
fn from_deliverable_flag(value: &Value) -> Option<Deliverability> {
    let deliverable = value.get("deliverable")?.as_bool()?;
    Some(Deliverability { deliverable })
}

/// `{"status": "valid" | "invalid" | "risky" | "unknown"}`
fn from_status_string(value: &Value) -> Option<Deliverability> {
    let status = value.get("status")?.as_str()?;
    match status {
        "valid" => Some(Deliverability { deliverable: true }),
        "invalid" | "risky" | "unknown" => Some(Deliverability { deliverable: false }),
        _ => None,
    }
}

/// `{"result": {"deliverable": true}}`
fn from_nested_result(value: &Value) -> Option<Deliverability> {
    from_deliverable_flag(value.get("result")?)
}

/// A bare JSON boolean.
fn from_bare_bool(value: &Value) -> Option<Deliverability> {
    Some(Deliverability {
        deliverable: value.as_bool()?,
    })
}

/// Normalizes an upstream payload through the adapter chain.
///
/// # Errors
///
/// Returns `VerifierError::UnrecognizedShape` when no adapter matches;
/// never defaults a verdict.
pub(crate) fn interpret(value: &Value) -> Result<Deliverability, VerifierError> {
    for (name, adapter) in SHAPE_ADAPTERS {
        if let Some(verdict) = adapter(value) {
            tracing::trace!(shape = name, "deliverability shape matched");
            return Ok(verdict);
        }
    }
    Err(VerifierError::UnrecognizedShape(value.to_string()))
}

/// Verifier calling the hosted deliverability service.
pub struct HttpEmailVerifier {
    client: Client,
    endpoint: String,
}

impl HttpEmailVerifier {
    /// Creates a verifier for the given service endpoint.
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl EmailVerifier for HttpEmailVerifier {
    async fn check(&self, email: &EmailAddress) -> Result<Deliverability, VerifierError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("email", email.as_str())])
            .send()
            .await
            .map_err(|e| VerifierError::Transport(e.to_string()))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| VerifierError::Transport(e.to_string()))?;

        interpret(&body)
    }
}
