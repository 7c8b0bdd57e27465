//! LLM prompts for chart-data extraction.
//!
//! The prompt is a fixed template: same inputs always produce the same
//! prompt, so extraction behavior only varies with the corpus itself.

use sha2::{Digest, Sha256};

use crate::types::chart::{ChartFamily, ChartKind};

/// System message sent with every extraction call.
pub const SYSTEM_PROMPT: &str =
    "You extract numerical data from text and format it as JSON. Respond only with JSON.";

/// Template for the extraction prompt.
pub const EXTRACT_PROMPT: &str = r#"Extract numerical data from the following web content for a {chart_kind} visualization.

TASK: {task}

Respond ONLY with valid JSON in this format:
{schema}

WEB CONTENT:
{corpus}"#;

/// Output-schema example for categorical charts (bar, pie).
pub const CATEGORICAL_SCHEMA: &str = r#"{
    "labels": ["Category1", "Category2"],
    "values": [10, 20],
    "title": "Chart Title"
}"#;

/// Output-schema example for continuous charts (line, scatter).
pub const CONTINUOUS_SCHEMA: &str = r#"{
    "x": [1, 2, 3],
    "y": [10, 20, 15],
    "title": "Chart Title"
}"#;

/// Schema example for a chart family.
pub fn schema_for(family: ChartFamily) -> &'static str {
    match family {
        ChartFamily::Categorical => CATEGORICAL_SCHEMA,
        ChartFamily::Continuous => CONTINUOUS_SCHEMA,
    }
}

/// Format the extraction prompt for a chart kind, user task, and corpus.
pub fn format_extract_prompt(kind: ChartKind, user_prompt: &str, corpus: &str) -> String {
    EXTRACT_PROMPT
        .replace("{chart_kind}", kind.name())
        .replace("{task}", user_prompt)
        .replace("{schema}", schema_for(kind.family()))
        .replace("{corpus}", corpus)
}

/// Hash of the extraction template, for prompt versioning.
pub fn extract_prompt_hash() -> String {
    let mut hasher = Sha256::new();
    hasher.update(EXTRACT_PROMPT.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_is_deterministic() {
        let a = format_extract_prompt(ChartKind::Bar, "population by year", "URL: x\n");
        let b = format_extract_prompt(ChartKind::Bar, "population by year", "URL: x\n");
        assert_eq!(a, b);
    }

    #[test]
    fn test_prompt_contains_all_parts() {
        let prompt = format_extract_prompt(ChartKind::Pie, "market share", "CONTENT HERE");
        assert!(prompt.contains("Pie Chart"));
        assert!(prompt.contains("TASK: market share"));
        assert!(prompt.contains("\"labels\""));
        assert!(prompt.contains("CONTENT HERE"));
    }

    #[test]
    fn test_schema_tracks_family() {
        let line = format_extract_prompt(ChartKind::Line, "trend", "c");
        assert!(line.contains("\"x\""));
        assert!(!line.contains("\"labels\""));

        let bar = format_extract_prompt(ChartKind::Bar, "totals", "c");
        assert!(bar.contains("\"labels\""));
        assert!(!bar.contains("\"x\": [1, 2, 3]"));
    }

    #[test]
    fn test_prompt_hash_is_stable() {
        let h1 = extract_prompt_hash();
        let h2 = extract_prompt_hash();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64); // SHA-256 hex
    }
}
