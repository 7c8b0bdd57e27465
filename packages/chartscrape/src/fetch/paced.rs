//! Courtesy-pacing fetcher wrapper.
//!
//! Wraps any Fetcher with rate limiting using the governor crate, so that
//! fetching a list of URLs does not hammer the target hosts even when the
//! pipeline issues fetches concurrently.

use async_trait::async_trait;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use std::num::NonZeroU32;
use std::sync::Arc;

use crate::error::FetchResult;
use crate::traits::fetcher::Fetcher;
use crate::types::source::FetchedPage;

type DefaultRateLimiter = RateLimiter<
    governor::state::NotKeyed,
    governor::state::InMemoryState,
    governor::clock::DefaultClock,
>;

/// A fetcher wrapper that enforces a request rate.
pub struct PacedFetcher<F: Fetcher> {
    inner: F,
    limiter: Arc<DefaultRateLimiter>,
}

impl<F: Fetcher> PacedFetcher<F> {
    /// Create a paced fetcher allowing `requests_per_second` requests.
    pub fn new(fetcher: F, requests_per_second: u32) -> Self {
        let quota = Quota::per_second(
            NonZeroU32::new(requests_per_second).expect("requests_per_second must be > 0"),
        );
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// One request per second, the original courtesy delay.
    pub fn courtesy(fetcher: F) -> Self {
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(Quota::per_second(nonzero!(1u32)))),
        }
    }

    /// Create with a custom quota.
    pub fn with_quota(fetcher: F, quota: Quota) -> Self {
        Self {
            inner: fetcher,
            limiter: Arc::new(RateLimiter::direct(quota)),
        }
    }
}

#[async_trait]
impl<F: Fetcher> Fetcher for PacedFetcher<F> {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.limiter.until_ready().await;
        self.inner.fetch(url).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Extension trait for easy pacing.
pub trait FetcherExt: Fetcher + Sized {
    /// Wrap this fetcher with a requests-per-second limit.
    fn paced(self, requests_per_second: u32) -> PacedFetcher<Self> {
        PacedFetcher::new(self, requests_per_second)
    }
}

impl<F: Fetcher + Sized> FetcherExt for F {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockFetcher;
    use std::time::Instant;

    #[tokio::test]
    async fn test_pacing_delays_requests() {
        let mock = MockFetcher::new()
            .with_page("https://example.com/1", "one")
            .with_page("https://example.com/2", "two")
            .with_page("https://example.com/3", "three");

        let fetcher = mock.paced(2);

        let start = Instant::now();
        for url in [
            "https://example.com/1",
            "https://example.com/2",
            "https://example.com/3",
        ] {
            fetcher.fetch(url).await.unwrap();
        }
        let elapsed = start.elapsed();

        // 3 requests at 2/sec: first immediate, the rest wait
        assert!(elapsed.as_millis() >= 500, "pacing not applied: {:?}", elapsed);
    }

    #[tokio::test]
    async fn test_pacing_passes_through_results() {
        let mock = MockFetcher::new().with_page("https://example.com", "body");
        let fetcher = PacedFetcher::courtesy(mock);

        let page = fetcher.fetch("https://example.com").await.unwrap();
        assert_eq!(page.text_content, "body");
    }
}
