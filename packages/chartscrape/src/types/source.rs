//! Per-source fetch results.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A table scraped from a page: rows of cell text, in document order.
pub type Table = Vec<Vec<String>>;

/// A successfully fetched page, before it becomes a `SourceResult`.
///
/// This is what `Fetcher` implementations produce. Text content is the
/// visible heading/paragraph text; tables are captured separately so the
/// aggregator and the status summary can report on them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchedPage {
    /// URL that was fetched
    pub url: String,

    /// Visible heading and paragraph text, whitespace-joined
    pub text_content: String,

    /// Tabular structures found in the markup (may be empty)
    #[serde(default)]
    pub tables: Vec<Table>,

    /// When the page was fetched
    pub fetched_at: DateTime<Utc>,
}

impl FetchedPage {
    /// Create a new fetched page with no tables.
    pub fn new(url: impl Into<String>, text_content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            text_content: text_content.into(),
            tables: Vec::new(),
            fetched_at: Utc::now(),
        }
    }

    /// Attach tables.
    pub fn with_tables(mut self, tables: Vec<Table>) -> Self {
        self.tables = tables;
        self
    }

    /// Set the fetched timestamp.
    pub fn with_fetched_at(mut self, fetched_at: DateTime<Utc>) -> Self {
        self.fetched_at = fetched_at;
        self
    }
}

/// The outcome of fetching one URL, success or failure captured as data.
///
/// One URL's failure never aborts a run; every input URL yields exactly one
/// `SourceResult`, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceResult {
    /// URL this result is for
    pub url: String,

    /// Success or error payload
    #[serde(flatten)]
    pub outcome: FetchOutcome,
}

/// Success or error payload for a single source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchOutcome {
    Success {
        text_content: String,
        #[serde(default)]
        tables: Vec<Table>,
        fetched_at: DateTime<Utc>,
    },
    Error {
        message: String,
    },
}

impl SourceResult {
    /// Build a success result from a fetched page.
    pub fn from_page(page: FetchedPage) -> Self {
        Self {
            url: page.url,
            outcome: FetchOutcome::Success {
                text_content: page.text_content,
                tables: page.tables,
                fetched_at: page.fetched_at,
            },
        }
    }

    /// Build an error result with a human-readable message.
    pub fn from_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: FetchOutcome::Error {
                message: message.into(),
            },
        }
    }

    /// Whether the fetch succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, FetchOutcome::Success { .. })
    }

    /// Text content, if the fetch succeeded.
    pub fn text_content(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Success { text_content, .. } => Some(text_content),
            FetchOutcome::Error { .. } => None,
        }
    }

    /// Scraped tables, if the fetch succeeded.
    pub fn tables(&self) -> Option<&[Table]> {
        match &self.outcome {
            FetchOutcome::Success { tables, .. } => Some(tables),
            FetchOutcome::Error { .. } => None,
        }
    }

    /// Error message, if the fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match &self.outcome {
            FetchOutcome::Error { message } => Some(message),
            FetchOutcome::Success { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_accessors() {
        let page = FetchedPage::new("https://example.com", "Hello")
            .with_tables(vec![vec![vec!["a".to_string(), "b".to_string()]]]);
        let result = SourceResult::from_page(page);

        assert!(result.is_success());
        assert_eq!(result.text_content(), Some("Hello"));
        assert_eq!(result.tables().map(|t| t.len()), Some(1));
        assert!(result.error_message().is_none());
    }

    #[test]
    fn test_error_accessors() {
        let result = SourceResult::from_error("https://example.com", "DNS failure");

        assert!(!result.is_success());
        assert!(result.text_content().is_none());
        assert_eq!(result.error_message(), Some("DNS failure"));
    }

    #[test]
    fn test_serde_tagging() {
        let result = SourceResult::from_error("https://example.com", "boom");
        let json = serde_json::to_string(&result).unwrap();
        assert!(json.contains(r#""status":"error""#));
    }
}
