//! HTTP adapter for the hosted email-template service.
//!
//! The service is keyed by template id plus a flat parameter map; it
//! owns the actual markup and the send.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::Serialize;

use crate::ports::{DispatchError, EmailDispatcher, TemplatedEmail};

/// Dispatcher posting to the hosted template service.
pub struct TemplateEmailDispatcher {
    client: Client,
    endpoint: String,
    api_key: Secret<String>,
    from: String,
}

impl TemplateEmailDispatcher {
    /// Creates a dispatcher for the given service endpoint.
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        from: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
            api_key: Secret::new(api_key.into()),
            from: from.into(),
        }
    }
}

/// Wire payload for one dispatch.
#[derive(Debug, Serialize)]
struct DispatchPayload<'a> {
    template: &'a str,
    to: &'a str,
    from: &'a str,
    params: &'a HashMap<String, String>,
}

#[async_trait]
impl EmailDispatcher for TemplateEmailDispatcher {
    async fn send(&self, email: &TemplatedEmail) -> Result<(), DispatchError> {
        let payload = DispatchPayload {
            template: email.template.id(),
            to: email.to.as_str(),
            from: &self.from,
            params: &email.params,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(&payload)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DispatchError::Rejected(format!("{}: {}", status, body)));
        }

        tracing::debug!(template = email.template.id(), "email dispatched");
        Ok(())
    }
}
