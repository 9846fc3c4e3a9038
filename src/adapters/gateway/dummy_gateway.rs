//! Development-mode payment gateway.
//!
//! Accepts every well-formed charge without contacting any payment
//! backend. This is the "dummy pay" path: it exists so the registration
//! flow can be exercised end to end before a real gateway is wired in,
//! and it is only mounted outside production behind an explicit feature
//! flag.

use async_trait::async_trait;

use crate::ports::{ChargeRequest, GatewayCharge, GatewayError, PaymentGateway};

/// Gateway stand-in that always succeeds for well-formed input.
#[derive(Debug, Default)]
pub struct DummyGateway;

impl DummyGateway {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl PaymentGateway for DummyGateway {
    async fn charge(&self, request: ChargeRequest) -> Result<GatewayCharge, GatewayError> {
        // A zero amount is malformed even here; a real gateway would
        // reject it and so does the stand-in.
        if request.amount_inr == 0 {
            return Err(GatewayError::invalid_request("charge amount must be positive"));
        }

        tracing::info!(
            transaction_id = %request.transaction_id,
            offering = %request.offering,
            amount_inr = request.amount_inr,
            "dummy gateway accepted charge"
        );

        Ok(GatewayCharge {
            reference: format!("dummy_{}", request.transaction_id.as_uuid().simple()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{EmailAddress, TransactionId};
    use crate::domain::registration::Offering;

    fn request(amount_inr: u32) -> ChargeRequest {
        ChargeRequest {
            transaction_id: TransactionId::new(),
            email: EmailAddress::parse("a@x.com").unwrap(),
            offering: Offering::Workshop,
            amount_inr,
        }
    }

    #[tokio::test]
    async fn accepts_well_formed_charge() {
        let gateway = DummyGateway::new();
        let charge = gateway.charge(request(299)).await.unwrap();
        assert!(charge.reference.starts_with("dummy_"));
    }

    #[tokio::test]
    async fn rejects_zero_amount() {
        let gateway = DummyGateway::new();
        let err = gateway.charge(request(0)).await.unwrap_err();
        assert!(!err.retryable);
    }
}
