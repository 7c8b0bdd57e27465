//! Web-to-Chart Extraction Pipeline
//!
//! Fetches content from a list of web pages, asks an LLM to distill it
//! into structured chart data, validates the payload, and builds a
//! renderable chart object, with deterministic fallback at every stage so
//! a run always ends in a chart, never an unrendered failure.
//!
//! # Design Philosophy
//!
//! - Failures are data: one bad URL, a flaky LLM, or unparseable output
//!   degrades the result, never aborts the run
//! - Explicit configuration: credentials, timeouts, caps, and retry policy
//!   are threaded in, not process-wide state
//! - Deterministic where possible: fixed prompt template, zero sampling
//!   temperature, canned fallback data
//!
//! # Usage
//!
//! ```rust,ignore
//! use chartscrape::{
//!     ai::OpenAiClient, fetch::HttpFetcher, security::AiCredentials,
//!     ChartKind, Pipeline, RunRequest,
//! };
//!
//! let fetcher = HttpFetcher::new();
//! let model = OpenAiClient::new(AiCredentials::new("sk-..."));
//! let pipeline = Pipeline::new(fetcher, model);
//!
//! let request = RunRequest::new(
//!     "https://en.wikipedia.org/wiki/World_population",
//!     "Extract population data by year for a bar chart visualization.",
//!     ChartKind::Bar,
//! );
//! let report = pipeline.run(&request).await;
//! println!("{}", report.source_summary());
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for the two external collaborators (Fetcher, CompletionModel)
//! - [`types`] - Pipeline data types
//! - [`fetch`] - HTTP fetcher and courtesy-pacing wrapper
//! - [`ai`] - OpenAI completion client
//! - [`pipeline`] - Aggregation, prompting, parsing, retry, orchestration
//! - [`chart`] - Renderable chart objects
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod ai;
pub mod chart;
pub mod error;
pub mod fetch;
pub mod pipeline;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{CompletionError, FetchError, PipelineError};
pub use traits::{
    completion::{CompletionModel, CompletionParams},
    fetcher::{fetch_all, Fetcher},
};
pub use types::{
    chart::{ChartData, ChartFamily, ChartKind, FALLBACK_TITLE},
    config::{AggregateConfig, PipelineConfig},
    report::{RunReport, RunStatus},
    request::{ExtractionRequest, ExtractionResponse},
    source::{FetchOutcome, FetchedPage, SourceResult, Table},
};

// Re-export pipeline components
pub use pipeline::{
    aggregate, extract_prompt_hash, format_extract_prompt, parse_chart_data, parse_url_list,
    Corpus, Pipeline, RetryPolicy, RunRequest, SYSTEM_PROMPT, TRUNCATION_MARKER,
};

// Re-export chart building
pub use chart::{build_chart, ChartSeries, ChartSpec};

// Re-export fetchers and the AI client
pub use ai::OpenAiClient;
pub use fetch::{FetcherExt, HttpFetcher, PacedFetcher};
pub use security::{AiCredentials, SecretString};

// Re-export testing utilities
pub use testing::{MockCompletion, MockFetcher};
