//! The extraction pipeline: aggregate, prompt, parse, retry, orchestrate.

pub mod aggregate;
pub mod parse;
pub mod prompts;
pub mod retry;
pub mod run;

pub use aggregate::{aggregate, Corpus, TRUNCATION_MARKER};
pub use parse::parse_chart_data;
pub use prompts::{extract_prompt_hash, format_extract_prompt, SYSTEM_PROMPT};
pub use retry::RetryPolicy;
pub use run::{parse_url_list, Pipeline, RunRequest};
