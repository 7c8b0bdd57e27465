//! HTTP fetcher implementation.
//!
//! Issues a single GET per URL with a randomized, plausible header set and
//! extracts visible heading/paragraph text plus any `<table>` structures
//! from the returned markup.

use async_trait::async_trait;
use chrono::Utc;
use rand::seq::SliceRandom;

use crate::error::{FetchError, FetchResult};
use crate::traits::fetcher::Fetcher;
use crate::types::source::{FetchedPage, Table};

/// Browser-like User-Agent strings rotated per request to reduce trivial
/// blocking. Not an evasion mechanism; requests are still plain GETs.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/123.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64; rv:125.0) Gecko/20100101 Firefox/125.0",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.4 Safari/605.1.15",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:124.0) Gecko/20100101 Firefox/124.0",
];

/// HTTP fetcher for static pages.
///
/// JavaScript-heavy pages are out of scope; whatever text is present in
/// the served markup is what gets extracted.
///
/// # Example
///
/// ```rust,ignore
/// use chartscrape::fetch::HttpFetcher;
///
/// let fetcher = HttpFetcher::new().with_timeout(Duration::from_secs(30));
/// let page = fetcher.fetch("https://example.com").await?;
/// ```
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpFetcher {
    /// Create a fetcher with a 30-second request timeout.
    pub fn new() -> Self {
        Self::with_timeout(std::time::Duration::from_secs(30))
    }

    /// Create a fetcher with a custom request timeout.
    pub fn with_timeout(timeout: std::time::Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Build the randomized header set for one request.
    fn request_headers(&self) -> Vec<(&'static str, &'static str)> {
        let ua = USER_AGENTS
            .choose(&mut rand::thread_rng())
            .copied()
            .unwrap_or(USER_AGENTS[0]);
        vec![
            ("User-Agent", ua),
            (
                "Accept",
                "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
            ),
            ("Accept-Language", "en-US,en;q=0.5"),
            ("Referer", "https://www.google.com/"),
            ("DNT", "1"),
            ("Connection", "keep-alive"),
            ("Upgrade-Insecure-Requests", "1"),
        ]
    }

    /// Extract visible heading and paragraph text from HTML.
    fn extract_text(&self, html: &str) -> String {
        let mut cleaned = html.to_string();

        // Remove scripts and styles before pulling text
        let script_pattern = regex::Regex::new(r"(?s)<script[^>]*>.*?</script>").unwrap();
        let style_pattern = regex::Regex::new(r"(?s)<style[^>]*>.*?</style>").unwrap();
        cleaned = script_pattern.replace_all(&cleaned, "").to_string();
        cleaned = style_pattern.replace_all(&cleaned, "").to_string();

        let text_pattern =
            regex::Regex::new(r"(?s)<(?:p|h[1-5])[^>]*>(.*?)</(?:p|h[1-5])>").unwrap();

        let chunks: Vec<String> = text_pattern
            .captures_iter(&cleaned)
            .filter_map(|cap| cap.get(1))
            .map(|m| strip_tags(m.as_str()))
            .filter(|t| !t.is_empty())
            .collect();

        chunks.join(" ")
    }

    /// Extract tabular structures: every `<table>` as rows of cell text.
    fn extract_tables(&self, html: &str) -> Vec<Table> {
        let table_pattern = regex::Regex::new(r"(?s)<table[^>]*>(.*?)</table>").unwrap();
        let row_pattern = regex::Regex::new(r"(?s)<tr[^>]*>(.*?)</tr>").unwrap();
        let cell_pattern = regex::Regex::new(r"(?s)<t[dh][^>]*>(.*?)</t[dh]>").unwrap();

        let mut tables = Vec::new();
        for table_cap in table_pattern.captures_iter(html) {
            let table_html = match table_cap.get(1) {
                Some(m) => m.as_str(),
                None => continue,
            };

            let mut rows: Table = Vec::new();
            for row_cap in row_pattern.captures_iter(table_html) {
                let row_html = match row_cap.get(1) {
                    Some(m) => m.as_str(),
                    None => continue,
                };
                let cells: Vec<String> = cell_pattern
                    .captures_iter(row_html)
                    .filter_map(|cap| cap.get(1))
                    .map(|m| strip_tags(m.as_str()))
                    .collect();
                if !cells.is_empty() {
                    rows.push(cells);
                }
            }
            if !rows.is_empty() {
                tables.push(rows);
            }
        }
        tables
    }
}

/// Remove remaining tags, decode common entities, and trim.
fn strip_tags(fragment: &str) -> String {
    let tag_pattern = regex::Regex::new(r"<[^>]+>").unwrap();
    let text = tag_pattern.replace_all(fragment, "").to_string();

    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .trim()
        .to_string()
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        url::Url::parse(url).map_err(|_| FetchError::InvalidUrl {
            url: url.to_string(),
        })?;

        tracing::debug!(url = %url, "HTTP fetch starting");

        let mut request = self.client.get(url);
        for (name, value) in self.request_headers() {
            request = request.header(name, value);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "HTTP request failed");
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(Box::new(e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                code: status.as_u16(),
            });
        }

        let html = response.text().await.map_err(|e| {
            if e.is_timeout() {
                FetchError::Timeout {
                    url: url.to_string(),
                }
            } else {
                FetchError::Http(Box::new(e))
            }
        })?;

        let text_content = self.extract_text(&html);
        let tables = self.extract_tables(&html);

        tracing::debug!(
            url = %url,
            text_length = text_content.len(),
            table_count = tables.len(),
            "page fetched"
        );

        Ok(FetchedPage::new(url, text_content)
            .with_tables(tables)
            .with_fetched_at(Utc::now()))
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_text_headings_and_paragraphs() {
        let fetcher = HttpFetcher::new();
        let html = r#"
            <h1>World Population</h1>
            <p>The population grew to <b>8 billion</b>.</p>
            <script>var x = "ignore me";</script>
            <div>not extracted</div>
        "#;

        let text = fetcher.extract_text(html);
        assert!(text.contains("World Population"));
        assert!(text.contains("The population grew to 8 billion."));
        assert!(!text.contains("ignore me"));
        assert!(!text.contains("not extracted"));
    }

    #[test]
    fn test_extract_tables() {
        let fetcher = HttpFetcher::new();
        let html = r#"
            <table>
                <tr><th>Year</th><th>Population</th></tr>
                <tr><td>2000</td><td>6.1&nbsp;billion</td></tr>
            </table>
        "#;

        let tables = fetcher.extract_tables(html);
        assert_eq!(tables.len(), 1);
        assert_eq!(tables[0].len(), 2);
        assert_eq!(tables[0][0], vec!["Year", "Population"]);
        assert_eq!(tables[0][1], vec!["2000", "6.1 billion"]);
    }

    #[test]
    fn test_extract_tables_skips_empty() {
        let fetcher = HttpFetcher::new();
        let html = "<table></table><p>text</p>";
        assert!(fetcher.extract_tables(html).is_empty());
    }

    #[test]
    fn test_strip_tags_decodes_entities() {
        assert_eq!(strip_tags("<em>A &amp; B</em>  "), "A & B");
    }

    #[tokio::test]
    async fn test_invalid_url_is_rejected() {
        let fetcher = HttpFetcher::new();
        let err = fetcher.fetch("not a url").await.unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl { .. }));
        assert!(!err.is_retryable());
    }
}
