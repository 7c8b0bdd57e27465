//! Fetcher trait for retrieving page content.

use async_trait::async_trait;
use futures::future::join_all;

use crate::error::FetchResult;
use crate::types::source::{FetchedPage, SourceResult};

/// Fetches one URL's visible text and tables.
///
/// Implementations wrap a concrete transport (HTTP, a headless service, a
/// test fixture). Errors are typed so callers can decide retryability; the
/// pipeline folds them into `SourceResult` at the `fetch_all` boundary.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch a single URL.
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage>;

    /// Implementation name for logging.
    fn name(&self) -> &str {
        "fetcher"
    }
}

/// Fetch every URL, capturing each outcome independently.
///
/// One URL's failure never aborts the others, and the output order always
/// matches the input order even though fetches run concurrently.
pub async fn fetch_all<F>(fetcher: &F, urls: &[String]) -> Vec<SourceResult>
where
    F: Fetcher + ?Sized,
{
    let futures = urls.iter().map(|url| async move {
        match fetcher.fetch(url).await {
            Ok(page) => SourceResult::from_page(page),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "fetch failed");
                SourceResult::from_error(url, e.to_string())
            }
        }
    });

    // join_all preserves input order regardless of completion order
    join_all(futures).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;

    #[tokio::test]
    async fn test_fetch_all_preserves_input_order() {
        let fetcher = MockFetcher::new()
            .with_page("https://a.com", "alpha")
            .with_page("https://b.com", "beta")
            .with_page("https://c.com", "gamma");

        let urls = vec![
            "https://c.com".to_string(),
            "https://a.com".to_string(),
            "https://b.com".to_string(),
        ];
        let results = fetch_all(&fetcher, &urls).await;

        let got: Vec<_> = results.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(got, vec!["https://c.com", "https://a.com", "https://b.com"]);
    }

    #[tokio::test]
    async fn test_fetch_all_isolates_failures() {
        let fetcher = MockFetcher::new()
            .with_page("https://ok.com", "fine")
            .with_failure("https://down.com", "connection refused");

        let urls = vec!["https://down.com".to_string(), "https://ok.com".to_string()];
        let results = fetch_all(&fetcher, &urls).await;

        assert_eq!(results.len(), 2);
        assert!(!results[0].is_success());
        assert!(results[1].is_success());
    }
}
