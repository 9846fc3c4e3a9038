//! EnrollCohortHandler - cohort enrollment intake.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::leads::FormRow;
use crate::domain::registration::CohortEnrollment;
use crate::ports::{EmailDispatcher, EmailTemplate, FormSink, TemplatedEmail};

use super::super::payment::{PaymentOutcome, ProcessPaymentCommand, ProcessPaymentHandler};
use super::RegistrationError;

/// Raw cohort enrollment input.
#[derive(Debug, Clone)]
pub struct EnrollCohortCommand {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// Handler for cohort enrollments.
///
/// Same shape as workshop intake; only the validated request type, the
/// lead row, and the welcome template differ.
pub struct EnrollCohortHandler {
    payments: Arc<ProcessPaymentHandler>,
    sink: Arc<dyn FormSink>,
    mailer: Arc<dyn EmailDispatcher>,
}

impl EnrollCohortHandler {
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
        command: EnrollCohortCommand,
    ) -> Result<PaymentOutcome, RegistrationError> {
        let enrollment =
            CohortEnrollment::new(&command.name, &command.email, command.phone.as_deref())
                .map_err(RegistrationError::Validation)?;

        let row = FormRow::cohort(&enrollment, Timestamp::now());
        if let Err(err) = self.sink.append(&row).await {
            tracing::warn!(error = %err, "failed to record cohort lead row");
        }

        let outcome = self
            .payments
            .handle(ProcessPaymentCommand {
                email: enrollment.email.clone(),
                offering: enrollment.offering(),
                transaction_id: None,
            })
            .await?;

        if matches!(outcome, PaymentOutcome::Granted { .. }) {
            let welcome =
                TemplatedEmail::new(EmailTemplate::CohortWelcome, enrollment.email.clone())
                    .with_param("name", enrollment.name.clone());
            if let Err(err) = self.mailer.send(&welcome).await {
                tracing::warn!(error = %err, "failed to send cohort welcome email");
            }
        }

        Ok(outcome)
    }
}
