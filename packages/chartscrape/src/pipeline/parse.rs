//! Structured data parser: locate and validate chart JSON in LLM output.
//!
//! The response text is free-form; the payload is recovered through an
//! ordered list of parse strategies, first success wins. Exhaustion yields
//! the deterministic fallback data so the run always has something to plot.

use serde::Deserialize;

use crate::types::chart::{ChartData, ChartFamily};

/// Wire payload for categorical chart JSON.
#[derive(Debug, Deserialize)]
struct CategoricalPayload {
    labels: Vec<String>,
    values: Vec<f64>,
    #[serde(default)]
    title: Option<String>,
}

/// Wire payload for continuous chart JSON.
#[derive(Debug, Deserialize)]
struct ContinuousPayload {
    x: Vec<f64>,
    y: Vec<f64>,
    #[serde(default)]
    title: Option<String>,
}

const DEFAULT_TITLE: &str = "Chart";

/// Find the contents of a fenced code block labeled as JSON.
fn fenced_json_block(raw: &str) -> Option<&str> {
    let pattern = regex::Regex::new(r"(?s)```json\s*(.*?)```").unwrap();
    pattern
        .captures(raw)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}

/// Greedy match between the first `{` and the last `}`.
fn greedy_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse one candidate JSON string against the shape the family requires,
/// then check the invariant: equal-length, non-empty paired sequences.
fn try_payload(json: &str, family: ChartFamily) -> Option<ChartData> {
    let data = match family {
        ChartFamily::Categorical => {
            let payload: CategoricalPayload = serde_json::from_str(json).ok()?;
            ChartData::Categorical {
                labels: payload.labels,
                values: payload.values,
                title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            }
        }
        ChartFamily::Continuous => {
            let payload: ContinuousPayload = serde_json::from_str(json).ok()?;
            ChartData::Continuous {
                x: payload.x,
                y: payload.y,
                title: payload.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            }
        }
    };

    data.is_valid().then_some(data)
}

/// Extract validated chart data from raw LLM output.
///
/// Strategies, in order of precedence:
/// 1. A fenced code block explicitly labeled `json`
/// 2. The greedy first-`{`-to-last-`}` substring
///
/// Each candidate is parsed and shape-validated for the requested family;
/// missing keys and mismatched lengths count as parse failure. If every
/// strategy fails the canned fallback for the family is returned, logged
/// but not surfaced as an error.
pub fn parse_chart_data(raw: &str, family: ChartFamily) -> ChartData {
    let candidates = [fenced_json_block(raw), greedy_object(raw)];

    for candidate in candidates.into_iter().flatten() {
        if let Some(data) = try_payload(candidate, family) {
            return data;
        }
    }

    tracing::warn!(
        response_length = raw.len(),
        family = ?family,
        "no valid chart JSON in response, using fallback data"
    );
    ChartData::fallback(family)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_block_round_trip() {
        let raw = "Here is the data you asked for:\n```json\n{\"labels\":[\"2000\",\"2010\"],\"values\":[100,200],\"title\":\"Population\"}\n```\nLet me know if you need more.";

        let data = parse_chart_data(raw, ChartFamily::Categorical);
        assert_eq!(
            data,
            ChartData::Categorical {
                labels: vec!["2000".to_string(), "2010".to_string()],
                values: vec![100.0, 200.0],
                title: "Population".to_string(),
            }
        );
    }

    #[test]
    fn test_bare_object_fallback_strategy() {
        let raw = "Sure! {\"x\": [1, 2, 3], \"y\": [4, 5, 6], \"title\": \"Trend\"} Hope that helps.";

        let data = parse_chart_data(raw, ChartFamily::Continuous);
        assert_eq!(data.len(), 3);
        assert_eq!(data.title(), "Trend");
    }

    #[test]
    fn test_fenced_block_takes_precedence() {
        // A bare brace appears before the fence; the labeled block wins
        let raw = "ignore {this} text\n```json\n{\"labels\":[\"a\"],\"values\":[1]}\n```";
        let data = parse_chart_data(raw, ChartFamily::Categorical);
        assert_eq!(data.title(), "Chart");
        assert_eq!(data.len(), 1);
    }

    #[test]
    fn test_prose_yields_exact_fallback() {
        let raw = "I'm sorry, I could not find any numerical data in the provided content.";

        let a = parse_chart_data(raw, ChartFamily::Categorical);
        let b = parse_chart_data(raw, ChartFamily::Categorical);
        assert_eq!(a, ChartData::fallback(ChartFamily::Categorical));
        assert_eq!(a, b);

        let c = parse_chart_data(raw, ChartFamily::Continuous);
        assert_eq!(c, ChartData::fallback(ChartFamily::Continuous));
    }

    #[test]
    fn test_mismatched_lengths_are_parse_failure() {
        let raw = r#"{"labels": ["a", "b", "c"], "values": [1, 2], "title": "Bad"}"#;
        let data = parse_chart_data(raw, ChartFamily::Categorical);
        assert_eq!(data, ChartData::fallback(ChartFamily::Categorical));
    }

    #[test]
    fn test_missing_keys_are_parse_failure() {
        // Categorical keys, continuous family requested
        let raw = r#"{"labels": ["a"], "values": [1], "title": "Wrong family"}"#;
        let data = parse_chart_data(raw, ChartFamily::Continuous);
        assert_eq!(data, ChartData::fallback(ChartFamily::Continuous));
    }

    #[test]
    fn test_missing_title_gets_default() {
        let raw = r#"{"labels": ["a"], "values": [1]}"#;
        let data = parse_chart_data(raw, ChartFamily::Categorical);
        assert_eq!(data.title(), "Chart");
    }
}
