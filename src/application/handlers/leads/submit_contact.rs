//! SubmitContactHandler - contact form intake.
//!
//! Unlike registrations, the spreadsheet row is the system of record for
//! a lead, so a sink failure fails the request. When a deliverability
//! verifier is configured, an address the upstream judges undeliverable
//! is a validation failure on `email`; an unrecognized upstream response
//! shape is surfaced as an error, never silently treated as a verdict.

use std::sync::Arc;

use thiserror::Error;

use crate::domain::foundation::{Timestamp, ValidationError};
use crate::domain::leads::{ContactMessage, FormRow};
use crate::ports::{
    DispatchError, EmailDispatcher, EmailTemplate, EmailVerifier, FormSink, SinkError,
    TemplatedEmail, VerifierError,
};

/// Raw contact form input.
#[derive(Debug, Clone)]
pub struct SubmitContactCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Lead intake failures.
#[derive(Debug, Error)]
pub enum LeadError {
    #[error("lead validation failed")]
    Validation(Vec<ValidationError>),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Verifier(#[from] VerifierError),
}

/// Handler for contact submissions.
pub struct SubmitContactHandler {
    sink: Arc<dyn FormSink>,
    mailer: Arc<dyn EmailDispatcher>,
    verifier: Option<Arc<dyn EmailVerifier>>,
}

impl SubmitContactHandler {
    pub fn new(
        sink: Arc<dyn FormSink>,
        mailer: Arc<dyn EmailDispatcher>,
        verifier: Option<Arc<dyn EmailVerifier>>,
    ) -> Self {
        Self {
            sink,
            mailer,
            verifier,
        }
    }

    pub async fn handle(&self, command: SubmitContactCommand) -> Result<(), LeadError> {
        let message = ContactMessage::new(
            &command.name,
            &command.email,
            &command.phone,
            &command.message,
        )
        .map_err(LeadError::Validation)?;

        if let Some(verifier) = &self.verifier {
            let verdict = verifier.check(&message.email).await?;
            if !verdict.deliverable {
                return Err(LeadError::Validation(vec![ValidationError::invalid_format(
                    "email",
                    "address appears undeliverable",
                )]));
            }
        }

        self.sink
            .append(&FormRow::contact(&message, Timestamp::now()))
            .await?;

        // Acknowledgement and internal alert are best effort.
        let ack = TemplatedEmail::new(EmailTemplate::ContactAcknowledgement, message.email.clone())
            .with_param("name", message.name.clone());
        if let Err(err) = self.mailer.send(&ack).await {
            tracing::warn!(error = %err, "failed to send contact acknowledgement");
        }

        Ok(())
    }
}
