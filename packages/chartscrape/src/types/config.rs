//! Pipeline configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::pipeline::retry::RetryPolicy;
use crate::traits::completion::CompletionParams;

/// Corpus-building limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregateConfig {
    /// Per-source excerpt cap in characters, applied independently of the
    /// total cap. Default: 1000.
    pub per_source_cap: usize,

    /// Total corpus cap in characters. Once an appended excerpt pushes the
    /// corpus past this, a truncation marker is added and aggregation
    /// stops. Default: 15000.
    pub corpus_cap: usize,
}

impl Default for AggregateConfig {
    fn default() -> Self {
        Self {
            per_source_cap: 1000,
            corpus_cap: 15000,
        }
    }
}

impl AggregateConfig {
    /// Set the per-source excerpt cap.
    pub fn with_per_source_cap(mut self, cap: usize) -> Self {
        self.per_source_cap = cap;
        self
    }

    /// Set the total corpus cap.
    pub fn with_corpus_cap(mut self, cap: usize) -> Self {
        self.corpus_cap = cap;
        self
    }
}

/// Configuration for a pipeline run.
///
/// Timeouts, caps, model selection, and retry policy are all explicit here
/// rather than process-wide state, so two pipelines with different settings
/// can coexist.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Model identifier sent to the completion service
    pub model: String,

    /// Deadline for each page fetch
    pub fetch_timeout: Duration,

    /// Deadline for the completion call
    pub llm_timeout: Duration,

    /// Output-length bound for the completion call
    pub max_output_tokens: u32,

    /// Sampling temperature. 0.0 biases toward reproducible structured
    /// output and is the deliberate default.
    pub temperature: f32,

    /// Corpus-building limits
    pub aggregate: AggregateConfig,

    /// Retry policy for page fetches
    pub fetch_retry: RetryPolicy,

    /// Retry policy for the completion call
    pub llm_retry: RetryPolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            model: "gpt-3.5-turbo".to_string(),
            fetch_timeout: Duration::from_secs(30),
            llm_timeout: Duration::from_secs(120),
            max_output_tokens: 2048,
            temperature: 0.0,
            aggregate: AggregateConfig::default(),
            fetch_retry: RetryPolicy::none(),
            llm_retry: RetryPolicy::none(),
        }
    }
}

impl PipelineConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the fetch deadline.
    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    /// Set the completion deadline.
    pub fn with_llm_timeout(mut self, timeout: Duration) -> Self {
        self.llm_timeout = timeout;
        self
    }

    /// Set the completion output bound.
    pub fn with_max_output_tokens(mut self, tokens: u32) -> Self {
        self.max_output_tokens = tokens;
        self
    }

    /// Set corpus-building limits.
    pub fn with_aggregate(mut self, aggregate: AggregateConfig) -> Self {
        self.aggregate = aggregate;
        self
    }

    /// Set the fetch retry policy.
    pub fn with_fetch_retry(mut self, policy: RetryPolicy) -> Self {
        self.fetch_retry = policy;
        self
    }

    /// Set the completion retry policy.
    pub fn with_llm_retry(mut self, policy: RetryPolicy) -> Self {
        self.llm_retry = policy;
        self
    }

    /// Completion parameters derived from this config.
    pub fn completion_params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
            timeout: self.llm_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_documented_values() {
        let config = PipelineConfig::default();
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.aggregate.per_source_cap, 1000);
        assert_eq!(config.aggregate.corpus_cap, 15000);
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_output_tokens, 2048);
    }

    #[test]
    fn test_builder_chaining() {
        let config = PipelineConfig::new()
            .with_model("gpt-4o")
            .with_llm_timeout(Duration::from_secs(60))
            .with_aggregate(AggregateConfig::default().with_corpus_cap(500));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.aggregate.corpus_cap, 500);
        assert_eq!(config.completion_params().timeout, Duration::from_secs(60));
    }
}
