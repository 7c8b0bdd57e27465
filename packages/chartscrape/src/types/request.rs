//! Extraction request/response types.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::types::chart::ChartKind;

/// Everything the extraction client needs for one LLM call.
///
/// Constructed once per run, immutable afterwards.
#[derive(Debug, Clone)]
pub struct ExtractionRequest {
    /// Bounded corpus assembled from the successful sources
    pub corpus: String,

    /// The user's free-text intent
    pub user_prompt: String,

    /// Target chart kind (drives the schema in the prompt)
    pub chart_kind: ChartKind,

    /// Model identifier to request
    pub model: String,

    /// Deadline for the completion call
    pub timeout: Duration,
}

/// Raw outcome of the LLM call.
///
/// Success carries the response text verbatim; it is not yet guaranteed to
/// be parseable JSON; that is the parser's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ExtractionResponse {
    Success { raw_text: String },
    Error { message: String },
}

impl ExtractionResponse {
    /// Build a success response.
    pub fn success(raw_text: impl Into<String>) -> Self {
        Self::Success {
            raw_text: raw_text.into(),
        }
    }

    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    /// Whether the call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Raw text, if the call succeeded.
    pub fn raw_text(&self) -> Option<&str> {
        match self {
            Self::Success { raw_text } => Some(raw_text),
            Self::Error { .. } => None,
        }
    }

    /// The run's text artifact: the raw response, or the error annotated
    /// as an error string.
    pub fn display_text(&self) -> String {
        match self {
            Self::Success { raw_text } => raw_text.clone(),
            Self::Error { message } => format!("Error: {}", message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_text() {
        let ok = ExtractionResponse::success("{\"labels\":[]}");
        assert_eq!(ok.display_text(), "{\"labels\":[]}");

        let err = ExtractionResponse::error("timed out");
        assert_eq!(err.display_text(), "Error: timed out");
        assert!(err.raw_text().is_none());
    }
}
