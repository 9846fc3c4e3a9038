//! RegisterWorkshopHandler - workshop registration intake.
//!
//! Validates the raw form input, records the lead, and forwards the
//! validated request to the payment processor, relaying its outcome
//! unchanged. A request that fails validation never reaches the
//! processor and creates no payment record.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{DomainError, Timestamp, ValidationError};
use crate::domain::leads::FormRow;
use crate::domain::registration::WorkshopRegistration;
use crate::ports::{EmailDispatcher, EmailTemplate, FormSink, TemplatedEmail};

use super::super::payment::{PaymentOutcome, ProcessPaymentCommand, ProcessPaymentHandler};

/// Raw workshop registration input.
#[derive(Debug, Clone)]
pub struct RegisterWorkshopCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub domain_interest: String,
    pub whatsapp_opt_in: bool,
}

/// Intake failures.
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("registration validation failed")]
    Validation(Vec<ValidationError>),

    #[error("payment processing failed: {0}")]
    Payment(#[from] DomainError),
}

/// Handler for workshop registrations.
pub struct RegisterWorkshopHandler {
    payments: Arc<ProcessPaymentHandler>,
    sink: Arc<dyn FormSink>,
    mailer: Arc<dyn EmailDispatcher>,
}

impl RegisterWorkshopHandler {
    pub fn new(
        payments: Arc<ProcessPaymentHandler>,
        sink: Arc<dyn FormSink>,
        mailer: Arc<dyn EmailDispatcher>,
    ) -> Self {
        Self {
            payments,
            sink,
            mailer,
        }
    }

    pub async fn handle(
        &self,
        command: RegisterWorkshopCommand,
    ) -> Result<PaymentOutcome, RegistrationError> {
        let registration = WorkshopRegistration::new(
            &command.name,
            &command.email,
            &command.phone,
            &command.domain_interest,
            command.whatsapp_opt_in,
        )
        .map_err(RegistrationError::Validation)?;

        // Lead capture is best effort; a sink outage must not block payment.
        let row = FormRow::workshop(&registration, Timestamp::now());
        if let Err(err) = self.sink.append(&row).await {
            tracing::warn!(error = %err, "failed to record workshop lead row");
        }

        let outcome = self
            .payments
            .handle(ProcessPaymentCommand {
                email: registration.email.clone(),
                offering: registration.offering(),
                transaction_id: None,
            })
            .await?;

        if let PaymentOutcome::Granted { meeting_url, .. } = &outcome {
            let mut welcome =
                TemplatedEmail::new(EmailTemplate::WorkshopWelcome, registration.email.clone())
                    .with_param("name", registration.name.clone())
                    .with_param("track", registration.domain_track.as_str());
            if let Some(url) = meeting_url {
                welcome = welcome.with_param("meeting_url", url.clone());
            }
            if let Err(err) = self.mailer.send(&welcome).await {
                tracing::warn!(error = %err, "failed to send workshop welcome email");
            }
        }

        Ok(outcome)
    }
}
