//! Pipeline orchestration: URLs in, RunReport out.
//!
//! A run is a single unit of work with no background state. Every stage
//! failure is captured as data, so the caller always receives the three
//! artifacts: raw LLM text, a renderable chart, and a per-source summary.

use futures::future::join_all;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::chart::{build_chart, ChartSpec};
use crate::error::{CompletionError, FetchError, PipelineError};
use crate::pipeline::aggregate::aggregate;
use crate::pipeline::parse::parse_chart_data;
use crate::pipeline::prompts::{format_extract_prompt, SYSTEM_PROMPT};
use crate::traits::completion::CompletionModel;
use crate::traits::fetcher::Fetcher;
use crate::types::chart::{ChartData, ChartKind};
use crate::types::config::PipelineConfig;
use crate::types::report::{RunReport, RunStatus};
use crate::types::request::{ExtractionRequest, ExtractionResponse};
use crate::types::source::SourceResult;

/// One run's inputs.
#[derive(Debug, Clone)]
pub struct RunRequest {
    /// Newline-separated URL list; blank lines are ignored
    pub url_list: String,

    /// The user's free-text intent
    pub user_prompt: String,

    /// Target chart kind
    pub chart_kind: ChartKind,
}

impl RunRequest {
    /// Create a run request.
    pub fn new(
        url_list: impl Into<String>,
        user_prompt: impl Into<String>,
        chart_kind: ChartKind,
    ) -> Self {
        Self {
            url_list: url_list.into(),
            user_prompt: user_prompt.into(),
            chart_kind,
        }
    }
}

/// Split a newline-separated URL list, trimming and dropping blank lines.
pub fn parse_url_list(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// The extraction pipeline, generic over its two external collaborators.
pub struct Pipeline<F, M> {
    fetcher: F,
    model: M,
    config: PipelineConfig,
}

impl<F, M> Pipeline<F, M>
where
    F: Fetcher,
    M: CompletionModel,
{
    /// Create a pipeline with default configuration.
    pub fn new(fetcher: F, model: M) -> Self {
        Self {
            fetcher,
            model,
            config: PipelineConfig::default(),
        }
    }

    /// Set the configuration.
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run the pipeline to completion.
    pub async fn run(&self, request: &RunRequest) -> RunReport {
        self.run_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Run the pipeline with cooperative cancellation.
    ///
    /// A cancelled run stops issuing fetches and LLM calls; sources
    /// collected before cancellation are preserved in the partial report.
    pub async fn run_with_cancel(
        &self,
        request: &RunRequest,
        cancel: &CancellationToken,
    ) -> RunReport {
        let run_id = Uuid::new_v4();
        let kind = request.chart_kind;

        let urls = parse_url_list(&request.url_list);
        tracing::info!(run_id = %run_id, url_count = urls.len(), kind = ?kind, "run starting");

        if urls.is_empty() {
            tracing::warn!(run_id = %run_id, "no URLs provided");
            let message = PipelineError::NoUrls.to_string();
            return RunReport {
                run_id,
                status: RunStatus::NoUrls,
                sources: vec![],
                extraction: ExtractionResponse::error(&message),
                chart_data: ChartData::fallback(kind.family()),
                chart: ChartSpec::error(message),
            };
        }

        let sources = self.fetch_phase(&urls, cancel).await;

        if cancel.is_cancelled() {
            return self.cancelled_report(run_id, kind, sources);
        }

        let corpus = aggregate(&sources, &self.config.aggregate);
        if !corpus.has_content() {
            tracing::warn!(run_id = %run_id, "no sources scraped, skipping extraction");
            let chart_data = ChartData::fallback(kind.family());
            let chart = build_chart(&chart_data, kind);
            return RunReport {
                run_id,
                status: RunStatus::NoData,
                sources,
                extraction: ExtractionResponse::error(PipelineError::NoData.to_string()),
                chart_data,
                chart,
            };
        }

        // Constructed once, immutable for the rest of the run
        let extraction_request = ExtractionRequest {
            corpus: corpus.text.clone(),
            user_prompt: request.user_prompt.clone(),
            chart_kind: kind,
            model: self.config.model.clone(),
            timeout: self.config.llm_timeout,
        };
        let prompt = format_extract_prompt(
            extraction_request.chart_kind,
            &extraction_request.user_prompt,
            &extraction_request.corpus,
        );
        let params = self.config.completion_params();

        let extraction = tokio::select! {
            _ = cancel.cancelled() => {
                return self.cancelled_report(run_id, kind, sources);
            }
            result = self.config.llm_retry.run(
                || self.model.complete(SYSTEM_PROMPT, &prompt, &params),
                CompletionError::is_retryable,
            ) => match result {
                Ok(raw) => {
                    tracing::info!(
                        run_id = %run_id,
                        response_length = raw.len(),
                        "completion received"
                    );
                    ExtractionResponse::success(raw)
                }
                Err(e) => {
                    tracing::warn!(run_id = %run_id, error = %e, "completion failed");
                    ExtractionResponse::error(e.to_string())
                }
            },
        };

        let chart_data = match extraction.raw_text() {
            Some(raw) => parse_chart_data(raw, kind.family()),
            None => ChartData::fallback(kind.family()),
        };
        let chart = build_chart(&chart_data, kind);

        tracing::info!(
            run_id = %run_id,
            success_count = corpus.success_count,
            points = chart_data.len(),
            "run completed"
        );

        RunReport {
            run_id,
            status: RunStatus::Completed,
            sources,
            extraction,
            chart_data,
            chart,
        }
    }

    /// Fetch every URL concurrently, preserving input order, applying the
    /// retry policy per URL, and racing each fetch against cancellation.
    async fn fetch_phase(&self, urls: &[String], cancel: &CancellationToken) -> Vec<SourceResult> {
        let futures = urls.iter().map(|url| async move {
            if cancel.is_cancelled() {
                return SourceResult::from_error(url, "fetch cancelled");
            }
            tokio::select! {
                _ = cancel.cancelled() => SourceResult::from_error(url, "fetch cancelled"),
                result = self.config.fetch_retry.run(
                    || async {
                        // Deadline applies per attempt, whatever the fetcher is
                        match tokio::time::timeout(
                            self.config.fetch_timeout,
                            self.fetcher.fetch(url),
                        )
                        .await
                        {
                            Ok(result) => result,
                            Err(_) => Err(FetchError::Timeout {
                                url: url.to_string(),
                            }),
                        }
                    },
                    FetchError::is_retryable,
                ) => match result {
                    Ok(page) => SourceResult::from_page(page),
                    Err(e) => {
                        tracing::warn!(url = %url, error = %e, "fetch failed");
                        SourceResult::from_error(url, e.to_string())
                    }
                },
            }
        });

        join_all(futures).await
    }

    fn cancelled_report(
        &self,
        run_id: Uuid,
        kind: ChartKind,
        sources: Vec<SourceResult>,
    ) -> RunReport {
        tracing::info!(run_id = %run_id, sources_collected = sources.len(), "run cancelled");
        let chart_data = ChartData::fallback(kind.family());
        let chart = build_chart(&chart_data, kind);
        RunReport {
            run_id,
            status: RunStatus::Cancelled,
            sources,
            extraction: ExtractionResponse::error(PipelineError::Cancelled.to_string()),
            chart_data,
            chart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_url_list_skips_blanks() {
        let text = "https://a.com\n\n  https://b.com  \n\t\nhttps://c.com";
        assert_eq!(
            parse_url_list(text),
            vec!["https://a.com", "https://b.com", "https://c.com"]
        );
    }

    #[test]
    fn test_parse_url_list_empty() {
        assert!(parse_url_list("").is_empty());
        assert!(parse_url_list("\n\n  \n").is_empty());
    }
}
