//! Typed errors for the chartscrape pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Per-source and per-stage
//! failures are captured as data (`SourceResult`, `ExtractionResponse`);
//! these enums exist for the internal boundaries where a typed error is
//! still in flight.

use thiserror::Error;

/// Errors that can occur while fetching a single source.
///
/// These never escape `fetch_all`; they are folded into
/// `SourceResult::Error` so one bad URL cannot abort a run.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level request failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Non-2xx response
    #[error("HTTP status {code} for {url}")]
    Status { url: String, code: u16 },

    /// Connection or response timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },

    /// Invalid URL format
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },
}

impl FetchError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Definitive client-side failures (4xx, malformed URLs) are not
    /// retried; timeouts, network errors, and 5xx responses are.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) | FetchError::Timeout { .. } => true,
            FetchError::Status { code, .. } => *code >= 500,
            FetchError::InvalidUrl { .. } => false,
        }
    }
}

/// Errors from the LLM completion service.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// Network-level request failure
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Service returned a non-2xx status
    #[error("completion API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication or authorization failure
    #[error("authentication failed: {0}")]
    Auth(String),

    /// The call exceeded its deadline
    #[error("completion timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Response contained no choices
    #[error("empty completion response")]
    Empty,
}

impl CompletionError {
    /// Whether a retry could plausibly succeed.
    ///
    /// Auth failures and other 4xx responses are definitive and never
    /// retried.
    pub fn is_retryable(&self) -> bool {
        match self {
            CompletionError::Http(_) | CompletionError::Timeout { .. } => true,
            CompletionError::Api { status, .. } => *status >= 500,
            CompletionError::Auth(_) | CompletionError::Empty => false,
        }
    }
}

/// Run-level errors.
///
/// These are the only "exception-like" failures a caller can observe, and
/// even they are resolved into a best-effort `RunReport` carrying an error
/// chart rather than terminating without output.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The URL list was empty after filtering blank lines
    #[error("no URLs provided")]
    NoUrls,

    /// Zero sources were successfully scraped
    #[error("no data was successfully scraped from the provided URLs")]
    NoData,

    /// The caller cancelled the run
    #[error("run cancelled")]
    Cancelled,
}

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for completion operations.
pub type CompletionResult<T> = std::result::Result<T, CompletionError>;
