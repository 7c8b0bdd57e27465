//! OpenAI implementation of the CompletionModel trait.
//!
//! Speaks the chat-completions wire format directly. Credentials are
//! explicit (`AiCredentials`), never process-global state.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{CompletionError, CompletionResult};
use crate::security::AiCredentials;
use crate::traits::completion::{CompletionModel, CompletionParams};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-backed completion client.
///
/// # Example
///
/// ```rust,ignore
/// use chartscrape::{ai::OpenAiClient, security::AiCredentials};
///
/// let client = OpenAiClient::new(AiCredentials::new("sk-..."));
/// ```
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    credentials: AiCredentials,
}

impl OpenAiClient {
    /// Create a client with the given credentials.
    pub fn new(credentials: AiCredentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
        }
    }

    /// Create from the `OPENAI_API_KEY` environment variable.
    pub fn from_env() -> CompletionResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| CompletionError::Auth("OPENAI_API_KEY not set".to_string()))?;
        Ok(Self::new(AiCredentials::new(api_key)))
    }

    /// Use a custom HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    fn base_url(&self) -> &str {
        self.credentials.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }
}

#[async_trait]
impl CompletionModel for OpenAiClient {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &CompletionParams,
    ) -> CompletionResult<String> {
        let request = ChatRequest {
            model: params.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        tracing::info!(
            model = %params.model,
            prompt_length = user.len(),
            "sending completion request"
        );

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url()))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .timeout(params.timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::Timeout {
                        seconds: params.timeout.as_secs(),
                    }
                } else {
                    CompletionError::Http(Box::new(e))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 401 || status.as_u16() == 403 {
                return Err(CompletionError::Auth(body));
            }
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let chat_response: ChatResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                CompletionError::Timeout {
                    seconds: params.timeout.as_secs(),
                }
            } else {
                CompletionError::Http(Box::new(e))
            }
        })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or(CompletionError::Empty)
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Wire types

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_override() {
        let client =
            OpenAiClient::new(AiCredentials::new("sk-test").with_base_url("https://proxy.test/v1"));
        assert_eq!(client.base_url(), "https://proxy.test/v1");

        let default_client = OpenAiClient::new(AiCredentials::new("sk-test"));
        assert_eq!(default_client.base_url(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_request_serializes_deterministic_sampling() {
        let request = ChatRequest {
            model: "gpt-3.5-turbo".to_string(),
            messages: vec![],
            temperature: 0.0,
            max_tokens: 2048,
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"temperature\":0.0"));
        assert!(json.contains("\"max_tokens\":2048"));
    }
}
