//! The final run report handed to the presentation layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chart::ChartSpec;
use crate::types::chart::ChartData;
use crate::types::request::ExtractionResponse;
use crate::types::source::SourceResult;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// The full pipeline ran (the LLM call itself may still have failed;
    /// see the extraction field)
    Completed,
    /// The URL list was empty after filtering blank lines
    NoUrls,
    /// Zero sources were scraped successfully; the LLM was never called
    NoData,
    /// The caller cancelled mid-run; sources collected so far are kept
    Cancelled,
}

/// Everything a run produces, read-only once assembled.
///
/// A run always yields all three user-visible artifacts (raw LLM text,
/// a renderable chart, and a per-source status summary) even in total
/// failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Unique id for this run
    pub run_id: Uuid,

    /// How the run ended
    pub status: RunStatus,

    /// One entry per input URL, in input order
    pub sources: Vec<SourceResult>,

    /// Raw outcome of the LLM call (or the short-circuit reason)
    pub extraction: ExtractionResponse,

    /// Validated chart data (canned fallback if extraction failed)
    pub chart_data: ChartData,

    /// The renderable chart object
    pub chart: ChartSpec,
}

impl RunReport {
    /// Number of sources that were scraped successfully.
    pub fn success_count(&self) -> usize {
        self.sources.iter().filter(|s| s.is_success()).count()
    }

    /// The run's text artifact: raw LLM output, or the error annotated as
    /// an error string.
    pub fn llm_text(&self) -> String {
        self.extraction.display_text()
    }

    /// Per-source status summary, one line per URL.
    ///
    /// Successful sources get a check mark and a table count when tables
    /// were found; failures get a cross and the error message.
    pub fn source_summary(&self) -> String {
        let mut summary = String::new();
        for source in &self.sources {
            match source.error_message() {
                None => {
                    summary.push_str(&format!("✓ {}: Successfully scraped\n", source.url));
                    if let Some(tables) = source.tables() {
                        if !tables.is_empty() {
                            summary.push_str(&format!("  - Found {} table(s)\n", tables.len()));
                        }
                    }
                }
                Some(message) => {
                    summary.push_str(&format!("✗ {}: {}\n", source.url, message));
                }
            }
        }
        summary
    }
}
