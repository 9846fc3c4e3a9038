//! RequestBrochureHandler - brochure download intake.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::domain::leads::{BrochureRequest, FormRow};
use crate::ports::{EmailDispatcher, EmailTemplate, EmailVerifier, FormSink, TemplatedEmail};

use super::LeadError;

/// Raw brochure request input.
#[derive(Debug, Clone)]
pub struct RequestBrochureCommand {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Handler for brochure requests. The brochure itself is delivered by
/// email, so dispatch failure here fails the request.
pub struct RequestBrochureHandler {
    sink: Arc<dyn FormSink>,
    mailer: Arc<dyn EmailDispatcher>,
    verifier: Option<Arc<dyn EmailVerifier>>,
    brochure_url: String,
}

impl RequestBrochureHandler {
    pub fn new(
        sink: Arc<dyn FormSink>,
        mailer: Arc<dyn EmailDispatcher>,
        verifier: Option<Arc<dyn EmailVerifier>>,
        brochure_url: impl Into<String>,
    ) -> Self {
        Self {
            sink,
            mailer,
            verifier,
            brochure_url: brochure_url.into(),
        }
    }

    pub async fn handle(&self, command: RequestBrochureCommand) -> Result<(), LeadError> {
        let request = BrochureRequest::new(&command.name, &command.email, &command.phone)
            .map_err(LeadError::Validation)?;

        if let Some(verifier) = &self.verifier {
            let verdict = verifier.check(&request.email).await?;
            if !verdict.deliverable {
                return Err(LeadError::Validation(vec![
                    crate::domain::foundation::ValidationError::invalid_format(
                        "email",
                        "address appears undeliverable",
                    ),
                ]));
            }
        }

        self.sink
            .append(&FormRow::brochure(&request, Timestamp::now()))
            .await?;

        let delivery = TemplatedEmail::new(EmailTemplate::BrochureDelivery, request.email.clone())
            .with_param("name", request.name.clone())
            .with_param("brochure_url", self.brochure_url.clone());
        self.mailer.send(&delivery).await?;

        Ok(())
    }
}
