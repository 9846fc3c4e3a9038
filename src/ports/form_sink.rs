//! Form sink port - the spreadsheet-append collaborator.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::leads::FormRow;

/// Port for appending lead rows to the hosted spreadsheet.
///
/// Rows are flat and keyed by form type; the sink decides which sheet a
/// kind lands in.
#[async_trait]
pub trait FormSink: Send + Sync {
    /// Appends one row.
    async fn append(&self, row: &FormRow) -> Result<(), SinkError>;
}

/// Failures talking to the sink.
#[derive(Debug, Clone, Error)]
pub enum SinkError {
    #[error("sink request failed: {0}")]
    Transport(String),

    #[error("sink rejected the row: {0}")]
    Rejected(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_sink_is_object_safe() {
        fn _accepts_dyn(_sink: &dyn FormSink) {}
    }
}
