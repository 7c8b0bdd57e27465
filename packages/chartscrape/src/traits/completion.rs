//! Completion trait for the LLM service.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::CompletionResult;

/// Per-call parameters for the completion service.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    /// Model identifier
    pub model: String,

    /// Sampling temperature; 0.0 for maximally deterministic output
    pub temperature: f32,

    /// Output-length bound
    pub max_tokens: u32,

    /// Call deadline
    pub timeout: Duration,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            temperature: 0.0,
            max_tokens: 2048,
            timeout: Duration::from_secs(120),
        }
    }
}

/// A black-box chat completion endpoint.
///
/// Implementations wrap a specific provider and must honor the deadline in
/// `params`: on expiry they return `CompletionError::Timeout` rather than
/// hang.
#[async_trait]
pub trait CompletionModel: Send + Sync {
    /// Send a system + user message pair, returning the response text
    /// verbatim.
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &CompletionParams,
    ) -> CompletionResult<String>;

    /// Implementation name for logging.
    fn name(&self) -> &str {
        "completion"
    }
}
