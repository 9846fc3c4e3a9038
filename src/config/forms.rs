//! Lead-form configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Lead-form configuration (spreadsheet sink, brochure delivery)
#[derive(Debug, Clone, Deserialize)]
pub struct FormsConfig {
    /// Spreadsheet-append webhook URL
    pub sheet_webhook_url: String,

    /// Public brochure download URL delivered by email
    #[serde(default = "default_brochure_url")]
    pub brochure_url: String,
}

impl FormsConfig {
    /// Validate form configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.sheet_webhook_url.is_empty() {
            return Err(ValidationError::MissingRequired("SHEET_WEBHOOK_URL"));
        }
        if !self.sheet_webhook_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("sheet webhook"));
        }
        if !self.brochure_url.starts_with("https://") {
            return Err(ValidationError::InvalidUrl("brochure"));
        }
        Ok(())
    }
}

fn default_brochure_url() -> String {
    "https://cdn.chipwiseacademy.com/chipwise-brochure.pdf".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_webhook_passes() {
        let cfg = FormsConfig {
            sheet_webhook_url: "https://script.example.com/exec".to_string(),
            brochure_url: default_brochure_url(),
        };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn empty_or_plain_http_webhook_fails() {
        let cfg = FormsConfig {
            sheet_webhook_url: String::new(),
            brochure_url: default_brochure_url(),
        };
        assert!(cfg.validate().is_err());

        let cfg = FormsConfig {
            sheet_webhook_url: "http://script.example.com/exec".to_string(),
            brochure_url: default_brochure_url(),
        };
        assert!(cfg.validate().is_err());
    }
}
