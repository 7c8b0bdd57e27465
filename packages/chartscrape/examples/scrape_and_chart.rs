//! End-to-end demo: scrape pages, extract chart data, print the result.
//!
//! Reads `OPENAI_API_KEY` from the environment. URLs and the prompt can be
//! passed as arguments; sensible defaults are used otherwise.
//!
//! ```bash
//! OPENAI_API_KEY=sk-... cargo run --example scrape_and_chart -- \
//!     "https://en.wikipedia.org/wiki/World_population" \
//!     "Extract world population by year for a bar chart."
//! ```

use chartscrape::{
    ChartKind, FetcherExt, HttpFetcher, OpenAiClient, Pipeline, PipelineConfig, RetryPolicy,
    RunRequest, RunStatus,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chartscrape=info".into()),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let url_list = args
        .next()
        .unwrap_or_else(|| "https://en.wikipedia.org/wiki/World_population".to_string());
    let user_prompt = args
        .next()
        .unwrap_or_else(|| "Extract population data by year for a bar chart.".to_string());

    // Pace outbound requests and retry transient failures once
    let fetcher = HttpFetcher::new().paced(2);
    let model = OpenAiClient::from_env()?;
    let config = PipelineConfig::default()
        .with_fetch_retry(RetryPolicy::new(2))
        .with_llm_retry(RetryPolicy::new(2));

    let pipeline = Pipeline::new(fetcher, model).with_config(config);
    let request = RunRequest::new(url_list, user_prompt, ChartKind::Bar);
    let report = pipeline.run(&request).await;

    println!("run {} finished: {:?}", report.run_id, report.status);
    println!();
    println!("Sources:");
    print!("{}", report.source_summary());
    println!();
    println!("LLM output:");
    println!("{}", report.llm_text());
    println!();
    println!("Chart ({}):", report.chart.title);
    println!("{}", serde_json::to_string_pretty(&report.chart)?);

    if report.status != RunStatus::Completed {
        std::process::exit(1);
    }
    Ok(())
}
