//! Payment configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// Payment configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentConfig {
    /// Server-held secret for confirmation signatures
    pub confirm_signing_secret: Secret<String>,

    /// Meeting link disclosed after a successful workshop payment
    pub workshop_meeting_url: Option<String>,

    /// Meeting link disclosed after a successful cohort payment
    pub cohort_meeting_url: Option<String>,

    /// Gateway call timeout in seconds
    #[serde(default = "default_gateway_timeout")]
    pub gateway_timeout_secs: u64,
}

impl PaymentConfig {
    /// Validate payment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        let secret = self.confirm_signing_secret.expose_secret();
        if secret.is_empty() {
            return Err(ValidationError::MissingRequired("CONFIRM_SIGNING_SECRET"));
        }
        if secret.len() < 16 {
            return Err(ValidationError::WeakSigningSecret);
        }
        for url in [&self.workshop_meeting_url, &self.cohort_meeting_url]
            .into_iter()
            .flatten()
        {
            if !url.starts_with("https://") {
                return Err(ValidationError::InvalidUrl("meeting url"));
            }
        }
        if self.gateway_timeout_secs == 0 || self.gateway_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_gateway_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> PaymentConfig {
        PaymentConfig {
            confirm_signing_secret: Secret::new(secret.to_string()),
            workshop_meeting_url: Some("https://meet.example.com/vlsi".to_string()),
            cohort_meeting_url: None,
            gateway_timeout_secs: default_gateway_timeout(),
        }
    }

    #[test]
    fn accepts_strong_secret() {
        assert!(config("a-long-enough-secret").validate().is_ok());
    }

    #[test]
    fn rejects_missing_or_weak_secret() {
        assert!(config("").validate().is_err());
        assert!(config("short").validate().is_err());
    }

    #[test]
    fn rejects_plain_http_meeting_url() {
        let mut cfg = config("a-long-enough-secret");
        cfg.workshop_meeting_url = Some("http://meet.example.com/vlsi".to_string());
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_zero_gateway_timeout() {
        let mut cfg = config("a-long-enough-secret");
        cfg.gateway_timeout_secs = 0;
        assert!(cfg.validate().is_err());
    }
}
