use super::ChatPrompt;
use crate::config::ChatConfig;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Text-generation collaborator.
///
/// Returns `Ok(None)` when the service answered without any content.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<CompletionMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct CompletionMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: Option<CompletionContent>,
}

#[derive(Debug, Deserialize)]
struct CompletionContent {
    content: Option<String>,
}

/// HTTP client for an OpenAI-compatible chat completions endpoint.
pub struct OpenAiClient {
    api_key: Option<String>,
    http_client: Client,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiClient {
    /// Create a client from the chat configuration.
    ///
    /// The base URL is taken from the config so tests can point it at a mock server.
    pub fn new(config: &ChatConfig) -> Result<Self> {
        let http_client = Client::builder()
            .user_agent("symbiotek/0.1")
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            api_key: config.api_key.clone(),
            http_client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<Option<String>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("OPENAI_API_KEY is not set"))?;

        let url = format!("{}/chat/completions", self.base_url);
        let body = CompletionRequest {
            model: &self.model,
            messages: vec![
                CompletionMessage {
                    role: "system",
                    content: &prompt.system,
                },
                CompletionMessage {
                    role: "user",
                    content: &prompt.user,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send chat completion request")?;

        check_response_status(response.status())?;
        let completion = response
            .json::<CompletionResponse>()
            .await
            .context("Failed to parse chat completion response")?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content))
    }
}

fn check_response_status(status: StatusCode) -> Result<()> {
    match status {
        s if s.is_success() => Ok(()),
        StatusCode::UNAUTHORIZED => Err(anyhow!("Chat completion rejected the API key (401)")),
        StatusCode::TOO_MANY_REQUESTS => Err(anyhow!("Chat completion rate limited (429)")),
        s => Err(anyhow!("Chat completion returned status {}", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatConfig;

    fn config_for(server: &mockito::Server, api_key: Option<&str>) -> ChatConfig {
        ChatConfig {
            base_url: server.url(),
            api_key: api_key.map(str::to_string),
            ..ChatConfig::default()
        }
    }

    fn prompt() -> ChatPrompt {
        ChatPrompt {
            system: "You are Fernando, a fern plant.".to_string(),
            user: "How are you?".to_string(),
        }
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer test-key")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "model": "gpt-3.5-turbo",
                "max_tokens": 150,
                "messages": [
                    {"role": "system", "content": "You are Fernando, a fern plant."},
                    {"role": "user", "content": "How are you?"}
                ]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"My fronds feel lush! 🌱"}}]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(&config_for(&server, Some("test-key"))).unwrap();
        let reply = client.complete(&prompt()).await.unwrap();

        assert_eq!(reply.as_deref(), Some("My fronds feel lush! 🌱"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_complete_without_choices_is_none() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = OpenAiClient::new(&config_for(&server, Some("k"))).unwrap();
        assert_eq!(client.complete(&prompt()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_complete_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .create_async()
            .await;

        let client = OpenAiClient::new(&config_for(&server, Some("k"))).unwrap();
        let err = client.complete(&prompt()).await.unwrap_err();
        assert!(err.to_string().contains("500"));
    }

    #[tokio::test]
    async fn test_complete_without_api_key_fails_before_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create_async()
            .await;

        let client = OpenAiClient::new(&config_for(&server, None)).unwrap();
        assert!(client.complete(&prompt()).await.is_err());
        mock.assert_async().await;
    }
}
