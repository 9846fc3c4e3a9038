//! Webhook form sink.
//!
//! Posts flat lead rows to the hosted spreadsheet-append script. The
//! script routes rows to a sheet by the `form` key and appends the
//! fields in order; it is the system of record for leads.

use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::leads::FormRow;
use crate::ports::{FormSink, SinkError};

/// Form sink that appends rows via an HTTP webhook.
pub struct WebhookFormSink {
    client: Client,
    url: String,
}

impl WebhookFormSink {
    /// Creates a sink posting to the given webhook URL.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            url: url.into(),
        }
    }
}

/// Wire payload for one appended row.
#[derive(Debug, Serialize)]
struct RowPayload<'a> {
    form: &'a str,
    submitted_at: String,
    fields: BTreeMap<&'a str, &'a str>,
}

impl<'a> From<&'a FormRow> for RowPayload<'a> {
    fn from(row: &'a FormRow) -> Self {
        Self {
            form: row.kind.as_str(),
            submitted_at: row.submitted_at.to_rfc3339(),
            fields: row
                .fields
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect(),
        }
    }
}

#[async_trait]
impl FormSink for WebhookFormSink {
    async fn append(&self, row: &FormRow) -> Result<(), SinkError> {
        let response = self
            .client
            .post(&self.url)
            .json(&RowPayload::from(row))
            .send()
            .await
            .map_err(|e| SinkError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SinkError::Rejected(format!("{}: {}", status, body)));
        }

        tracing::debug!(form = row.kind.as_str(), "lead row appended");
        Ok(())
    }
}
