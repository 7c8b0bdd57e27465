//! Testing utilities including mock implementations.
//!
//! These exercise the pipeline end to end without network or LLM calls.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{CompletionError, CompletionResult, FetchError, FetchResult};
use crate::traits::completion::{CompletionModel, CompletionParams};
use crate::traits::fetcher::Fetcher;
use crate::types::source::{FetchedPage, Table};

/// A mock fetcher with scripted per-URL outcomes.
///
/// Unknown URLs fail with an invalid-URL error. Transient-failure counts
/// let retry behavior be tested: a URL fails N times, then serves its page.
#[derive(Clone, Default)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, FetchedPage>>>,
    failures: Arc<RwLock<HashMap<String, String>>>,
    transient_failures: Arc<RwLock<HashMap<String, u32>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    /// Create an empty mock fetcher.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful page for a URL.
    pub fn with_page(self, url: impl Into<String>, text: impl Into<String>) -> Self {
        let url = url.into();
        self.pages
            .write()
            .unwrap()
            .insert(url.clone(), FetchedPage::new(url, text));
        self
    }

    /// Script a successful page with tables.
    pub fn with_page_tables(
        self,
        url: impl Into<String>,
        text: impl Into<String>,
        tables: Vec<Table>,
    ) -> Self {
        let url = url.into();
        self.pages
            .write()
            .unwrap()
            .insert(url.clone(), FetchedPage::new(url, text).with_tables(tables));
        self
    }

    /// Script a permanent failure for a URL.
    pub fn with_failure(self, url: impl Into<String>, message: impl Into<String>) -> Self {
        self.failures
            .write()
            .unwrap()
            .insert(url.into(), message.into());
        self
    }

    /// Script N transient (retryable) failures before the page succeeds.
    pub fn with_transient_failures(self, url: impl Into<String>, count: u32) -> Self {
        self.transient_failures
            .write()
            .unwrap()
            .insert(url.into(), count);
        self
    }

    /// URLs fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Number of fetch calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<FetchedPage> {
        self.calls.write().unwrap().push(url.to_string());

        {
            let mut transient = self.transient_failures.write().unwrap();
            if let Some(remaining) = transient.get_mut(url) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(FetchError::Timeout {
                        url: url.to_string(),
                    });
                }
            }
        }

        if let Some(message) = self.failures.read().unwrap().get(url) {
            return Err(FetchError::Http(message.clone().into()));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::InvalidUrl {
                url: url.to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Record of a call made to the mock completion model.
#[derive(Debug, Clone)]
pub struct MockCompletionCall {
    pub system: String,
    pub user: String,
    pub model: String,
}

/// Scripted completion outcome.
enum ScriptedResponse {
    Text(String),
    Error(String),
    Timeout,
    Auth,
}

/// A mock completion model returning scripted responses in order.
///
/// When the script runs out, the last entry repeats. With no script at
/// all, calls return `CompletionError::Empty`.
#[derive(Clone, Default)]
pub struct MockCompletion {
    script: Arc<RwLock<Vec<ScriptedResponse>>>,
    cursor: Arc<RwLock<usize>>,
    calls: Arc<RwLock<Vec<MockCompletionCall>>>,
}

impl MockCompletion {
    /// Create an empty mock completion model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a successful response.
    pub fn with_response(self, text: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push(ScriptedResponse::Text(text.into()));
        self
    }

    /// Script a service error (5xx, retryable).
    pub fn with_service_error(self, message: impl Into<String>) -> Self {
        self.script
            .write()
            .unwrap()
            .push(ScriptedResponse::Error(message.into()));
        self
    }

    /// Script a timeout (retryable).
    pub fn with_timeout(self) -> Self {
        self.script.write().unwrap().push(ScriptedResponse::Timeout);
        self
    }

    /// Script an authentication failure (not retryable).
    pub fn with_auth_error(self) -> Self {
        self.script.write().unwrap().push(ScriptedResponse::Auth);
        self
    }

    /// All calls made to this mock.
    pub fn calls(&self) -> Vec<MockCompletionCall> {
        self.calls.read().unwrap().clone()
    }

    /// Number of completion calls made.
    pub fn call_count(&self) -> usize {
        self.calls.read().unwrap().len()
    }
}

#[async_trait]
impl CompletionModel for MockCompletion {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &CompletionParams,
    ) -> CompletionResult<String> {
        self.calls.write().unwrap().push(MockCompletionCall {
            system: system.to_string(),
            user: user.to_string(),
            model: params.model.clone(),
        });

        let script = self.script.read().unwrap();
        if script.is_empty() {
            return Err(CompletionError::Empty);
        }

        let index = {
            let mut cursor = self.cursor.write().unwrap();
            let index = (*cursor).min(script.len() - 1);
            *cursor += 1;
            index
        };

        match &script[index] {
            ScriptedResponse::Text(text) => Ok(text.clone()),
            ScriptedResponse::Error(message) => Err(CompletionError::Api {
                status: 500,
                message: message.clone(),
            }),
            ScriptedResponse::Timeout => Err(CompletionError::Timeout {
                seconds: params.timeout.as_secs(),
            }),
            ScriptedResponse::Auth => Err(CompletionError::Auth("invalid api key".to_string())),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
