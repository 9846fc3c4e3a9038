//! Email dispatch port - the hosted template service.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

use crate::domain::foundation::EmailAddress;

/// Template ids known to the hosted service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailTemplate {
    /// Post-payment welcome for a workshop, carries the meeting link.
    WorkshopWelcome,

    /// Post-payment welcome for a cohort enrollment.
    CohortWelcome,

    /// Acknowledgement for a contact-form submission.
    ContactAcknowledgement,

    /// Brochure delivery with download link.
    BrochureDelivery,

    /// Internal alert to the admissions team about a new lead.
    InternalLeadAlert,
}

impl EmailTemplate {
    /// The template id as registered with the hosted service.
    pub fn id(&self) -> &'static str {
        match self {
            EmailTemplate::WorkshopWelcome => "workshop-welcome",
            EmailTemplate::CohortWelcome => "cohort-welcome",
            EmailTemplate::ContactAcknowledgement => "contact-ack",
            EmailTemplate::BrochureDelivery => "brochure-delivery",
            EmailTemplate::InternalLeadAlert => "internal-lead-alert",
        }
    }
}

/// One templated message: template id plus parameter map, matching the
/// hosted service's contract.
#[derive(Debug, Clone)]
pub struct TemplatedEmail {
    pub template: EmailTemplate,
    pub to: EmailAddress,
    pub params: HashMap<String, String>,
}

impl TemplatedEmail {
    /// Creates a message with no parameters.
    pub fn new(template: EmailTemplate, to: EmailAddress) -> Self {
        Self {
            template,
            to,
            params: HashMap::new(),
        }
    }

    /// Adds a template parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Port for dispatching templated email.
#[async_trait]
pub trait EmailDispatcher: Send + Sync {
    /// Dispatches one message.
    async fn send(&self, email: &TemplatedEmail) -> Result<(), DispatchError>;
}

/// Failures talking to the template service.
#[derive(Debug, Clone, Error)]
pub enum DispatchError {
    #[error("email dispatch request failed: {0}")]
    Transport(String),

    #[error("template service rejected the message: {0}")]
    Rejected(String),
}
