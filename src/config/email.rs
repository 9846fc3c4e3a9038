//! Email configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Email configuration (hosted template service + deliverability check)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Template service endpoint
    #[serde(default = "default_dispatch_endpoint")]
    pub dispatch_endpoint: String,

    /// Template service API key
    pub api_key: Secret<String>,

    /// From email address
    #[serde(default = "default_from_email")]
    pub from_email: String,

    /// From name
    #[serde(default = "default_from_name")]
    pub from_name: String,

    /// Deliverability check endpoint; checks are skipped when unset
    pub deliverability_endpoint: Option<String>,
}

impl EmailConfig {
    /// Get formatted "From" header value
    pub fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }

    /// Validate email configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.api_key.expose_secret().is_empty() {
            return Err(ValidationError::MissingRequired("EMAIL_API_KEY"));
        }
        if !self.dispatch_endpoint.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("email dispatch endpoint"));
        }
        if !self.from_email.contains('@') {
            return Err(ValidationError::InvalidFromEmail);
        }
        if let Some(endpoint) = &self.deliverability_endpoint {
            if !endpoint.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("deliverability endpoint"));
            }
        }
        Ok(())
    }
}

fn default_dispatch_endpoint() -> String {
    "https://mail.chipwiseacademy.com/send".to_string()
}

fn default_from_email() -> String {
    "noreply@chipwiseacademy.com".to_string()
}

fn default_from_name() -> String {
    "ChipWise Academy".to_string()
}
