//! Payment gateway port.
//!
//! Defines the contract for the payment backend. The shipped adapter is
//! the development-mode dummy gateway; the contract is shaped so a real
//! redirect-based gateway can slot in without touching the processor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, TransactionId};
use crate::domain::registration::Offering;

/// Port for charging the payment backend.
///
/// Implementations must be safe to retry: the processor retries
/// retryable failures with the same transaction id, and record-level
/// idempotency upstream guarantees at most one grant per id regardless.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Attempts to charge for one registration.
    async fn charge(&self, request: ChargeRequest) -> Result<GatewayCharge, GatewayError>;
}

/// One charge attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Server-generated transaction id, also the gateway idempotency key.
    pub transaction_id: TransactionId,

    /// Identity the resulting grant is bound to.
    pub email: EmailAddress,

    /// What is being purchased.
    pub offering: Offering,

    /// Charge amount in INR.
    pub amount_inr: u32,
}

/// Successful charge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayCharge {
    /// The gateway's own payment reference.
    pub reference: String,
}

/// Errors from gateway operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayError {
    /// Error code for categorization.
    pub code: GatewayErrorCode,

    /// Internal message; never shown to the browser.
    pub message: String,

    /// Whether the operation can be retried.
    pub retryable: bool,
}

impl GatewayError {
    /// Creates a new gateway error.
    pub fn new(code: GatewayErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            retryable: code.is_retryable(),
        }
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::NetworkError, message)
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Timeout, message)
    }

    /// Create a declined error.
    pub fn declined(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::Declined, message)
    }

    /// Create an invalid request error (e.g. malformed amount).
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(GatewayErrorCode::InvalidRequest, message)
    }
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

impl std::error::Error for GatewayError {}

/// Gateway error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GatewayErrorCode {
    /// Network connectivity issue.
    NetworkError,

    /// Gateway did not answer within the request timeout.
    Timeout,

    /// Gateway declined the charge.
    Declined,

    /// Malformed request (bad amount, missing fields).
    InvalidRequest,

    /// Rate limit exceeded.
    RateLimited,

    /// Gateway-side error.
    ProviderError,
}

impl GatewayErrorCode {
    /// Whether this error type is transient and worth retrying.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayErrorCode::NetworkError
                | GatewayErrorCode::Timeout
                | GatewayErrorCode::RateLimited
        )
    }
}

impl std::fmt::Display for GatewayErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            GatewayErrorCode::NetworkError => "network_error",
            GatewayErrorCode::Timeout => "timeout",
            GatewayErrorCode::Declined => "declined",
            GatewayErrorCode::InvalidRequest => "invalid_request",
            GatewayErrorCode::RateLimited => "rate_limited",
            GatewayErrorCode::ProviderError => "provider_error",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_gateway_is_object_safe() {
        fn _accepts_dyn(_gateway: &dyn PaymentGateway) {}
    }

    #[test]
    fn transient_codes_are_retryable() {
        assert!(GatewayErrorCode::NetworkError.is_retryable());
        assert!(GatewayErrorCode::Timeout.is_retryable());
        assert!(GatewayErrorCode::RateLimited.is_retryable());

        assert!(!GatewayErrorCode::Declined.is_retryable());
        assert!(!GatewayErrorCode::InvalidRequest.is_retryable());
    }

    #[test]
    fn error_display_includes_code_and_message() {
        let err = GatewayError::declined("card declined");
        assert!(err.to_string().contains("declined"));
        assert!(err.to_string().contains("card declined"));
    }
}
