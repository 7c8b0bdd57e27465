//! Corpus building from per-source results.

use crate::types::config::AggregateConfig;
use crate::types::source::SourceResult;

/// Marker appended when the corpus hits its total cap.
pub const TRUNCATION_MARKER: &str = "\n[Content truncated due to length limitations]";

/// The bounded text corpus handed to the LLM.
#[derive(Debug, Clone)]
pub struct Corpus {
    /// Concatenated per-source excerpts, in input order
    pub text: String,

    /// Number of successful sources included (including the one whose
    /// excerpt triggered truncation)
    pub success_count: usize,

    /// Whether the total cap was hit
    pub truncated: bool,
}

impl Corpus {
    /// Whether any source contributed content.
    pub fn has_content(&self) -> bool {
        self.success_count > 0
    }
}

/// Combine successful fetch results into a bounded corpus.
///
/// Each success contributes `"URL: <url>\nContent: <excerpt>...\n\n"`,
/// where the excerpt is the first `per_source_cap` characters of its text.
/// Truncation happens at a source boundary: a whole excerpt is appended,
/// then the total is checked, and if it exceeds `corpus_cap` the marker is
/// appended and aggregation stops. The corpus can therefore exceed the cap
/// by at most one excerpt entry plus the marker, deterministically.
pub fn aggregate(results: &[SourceResult], config: &AggregateConfig) -> Corpus {
    let mut text = String::new();
    let mut success_count = 0;
    let mut truncated = false;

    for result in results {
        let content = match result.text_content() {
            Some(content) => content,
            None => continue,
        };

        let excerpt: String = content.chars().take(config.per_source_cap).collect();
        text.push_str(&format!(
            "URL: {}\nContent: {}...\n\n",
            result.url, excerpt
        ));
        success_count += 1;

        if text.len() > config.corpus_cap {
            text.push_str(TRUNCATION_MARKER);
            truncated = true;
            tracing::debug!(
                corpus_length = text.len(),
                sources_included = success_count,
                "corpus truncated at total cap"
            );
            break;
        }
    }

    Corpus {
        text,
        success_count,
        truncated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::source::FetchedPage;
    use proptest::prelude::*;

    fn success(url: &str, content: &str) -> SourceResult {
        SourceResult::from_page(FetchedPage::new(url, content))
    }

    #[test]
    fn test_aggregate_format_and_order() {
        let results = vec![
            success("https://a.com", "alpha content"),
            SourceResult::from_error("https://down.com", "DNS error"),
            success("https://b.com", "beta content"),
        ];

        let corpus = aggregate(&results, &AggregateConfig::default());

        assert_eq!(corpus.success_count, 2);
        assert!(!corpus.truncated);
        let a = corpus.text.find("URL: https://a.com").unwrap();
        let b = corpus.text.find("URL: https://b.com").unwrap();
        assert!(a < b);
        assert!(corpus.text.contains("Content: alpha content...\n\n"));
        assert!(!corpus.text.contains("down.com"));
    }

    #[test]
    fn test_per_source_cap_applies() {
        let long = "x".repeat(5000);
        let results = vec![success("https://a.com", &long)];
        let config = AggregateConfig::default().with_per_source_cap(100);

        let corpus = aggregate(&results, &config);
        assert!(corpus.text.contains(&"x".repeat(100)));
        assert!(!corpus.text.contains(&"x".repeat(101)));
    }

    #[test]
    fn test_truncation_at_source_boundary() {
        let results: Vec<SourceResult> = (0..10)
            .map(|i| success(&format!("https://s{}.com", i), &"y".repeat(1000)))
            .collect();
        let config = AggregateConfig::default().with_corpus_cap(2500);

        let corpus = aggregate(&results, &config);

        assert!(corpus.truncated);
        assert!(corpus.text.ends_with(TRUNCATION_MARKER));
        // Whole excerpts only: the third source tips the total past the cap
        assert_eq!(corpus.success_count, 3);
        assert!(!corpus.text.contains("https://s3.com"));
    }

    #[test]
    fn test_all_failures_yield_empty_corpus() {
        let results = vec![
            SourceResult::from_error("https://a.com", "boom"),
            SourceResult::from_error("https://b.com", "bang"),
        ];

        let corpus = aggregate(&results, &AggregateConfig::default());
        assert_eq!(corpus.success_count, 0);
        assert!(!corpus.has_content());
        assert!(corpus.text.is_empty());
    }

    proptest! {
        /// The corpus never exceeds the cap by more than one excerpt entry
        /// plus the truncation marker.
        #[test]
        fn prop_corpus_bounded(
            contents in prop::collection::vec(".{0,200}", 0..20),
            per_source_cap in 1usize..150,
            corpus_cap in 50usize..2000,
        ) {
            let results: Vec<SourceResult> = contents
                .iter()
                .enumerate()
                .map(|(i, c)| success(&format!("https://s{}.com", i), c))
                .collect();
            let config = AggregateConfig {
                per_source_cap,
                corpus_cap,
            };

            let corpus = aggregate(&results, &config);

            // One entry is the URL line + excerpt + punctuation; URLs here
            // are short, so bound the entry generously.
            let max_entry = per_source_cap * 4 + 64;
            prop_assert!(
                corpus.text.len() <= corpus_cap + max_entry + TRUNCATION_MARKER.len()
            );
        }
    }
}
