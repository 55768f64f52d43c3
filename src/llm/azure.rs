//! Azure OpenAI chat-completions client

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

use super::{ChatMessage, ChatModel};
use crate::config::LlmConfig;
use crate::{ItineraryError, Result};

/// Client for one Azure OpenAI chat deployment
///
/// Built once at startup and shared; it holds no per-request state.
pub struct AzureChatClient {
    client: Client,
    endpoint: String,
    deployment: String,
    api_version: String,
    api_key: String,
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    messages: &'a [ChatMessage],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl AzureChatClient {
    /// Create a client from configuration
    ///
    /// Fails when the endpoint or API key is missing.
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let endpoint = config
            .endpoint
            .as_deref()
            .map(|e| e.trim_end_matches('/').to_string())
            .ok_or_else(|| {
                ItineraryError::config(
                    "Missing language model endpoint. Set llm.endpoint or AZURE_OPENAI_ENDPOINT.",
                )
            })?;
        let api_key = config.api_key.clone().ok_or_else(|| {
            ItineraryError::config(
                "Missing language model API key. Set llm.api_key or AZURE_OPENAI_API_KEY.",
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds.into()))
            .user_agent(concat!("nepal-itinerary/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ItineraryError::config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            deployment: config.deployment.clone(),
            api_version: config.api_version.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions?api-version={}",
            self.endpoint,
            urlencoding::encode(&self.deployment),
            urlencoding::encode(&self.api_version)
        )
    }

    fn status_error(&self, status: StatusCode, body: &str) -> ItineraryError {
        match status.as_u16() {
            401 | 403 => {
                error!("Language model authentication failed (HTTP {})", status.as_u16());
                ItineraryError::api("authentication failed, check the API key")
            }
            404 => {
                warn!("Deployment '{}' not found", self.deployment);
                ItineraryError::api(format!("deployment '{}' not found", self.deployment))
            }
            429 => {
                warn!("Language model rate limit hit");
                ItineraryError::api("rate limited by the language model provider")
            }
            _ => {
                error!("Language model returned HTTP {}: {}", status, body);
                ItineraryError::api(format!("HTTP {status}: {body}"))
            }
        }
    }
}

#[async_trait]
impl ChatModel for AzureChatClient {
    #[instrument(skip(self, messages), fields(deployment = %self.deployment, message_count = messages.len()))]
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let start_time = Instant::now();
        let body = ChatCompletionRequest {
            messages,
            temperature: self.temperature,
        };

        debug!("Sending chat completion request");
        let response = self
            .client
            .post(self.completions_url())
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.status_error(status, &error_text));
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let total_duration = start_time.elapsed();

        if let Some(usage) = &completion.usage {
            info!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion finished in {:.3}s",
                total_duration.as_secs_f64()
            );
        } else {
            info!(
                "Chat completion finished in {:.3}s",
                total_duration.as_secs_f64()
            );
        }

        let choice = completion
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ItineraryError::api("response contained no choices"))?;

        Ok(choice.message.content.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer) -> LlmConfig {
        LlmConfig {
            endpoint: Some(format!("{}/", server.uri())),
            api_key: Some("test-key".to_string()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn test_new_requires_endpoint_and_key() {
        let err = AzureChatClient::new(&LlmConfig::default()).err().unwrap();
        assert!(matches!(err, ItineraryError::Config { .. }));

        let config = LlmConfig {
            endpoint: Some("https://example.openai.azure.com".to_string()),
            ..LlmConfig::default()
        };
        let err = AzureChatClient::new(&config).err().unwrap();
        assert!(err.to_string().contains("API key"));
    }

    #[test]
    fn test_completions_url() {
        let config = LlmConfig {
            endpoint: Some("https://example.openai.azure.com/".to_string()),
            api_key: Some("k".to_string()),
            ..LlmConfig::default()
        };
        let client = AzureChatClient::new(&config).unwrap();
        assert_eq!(
            client.completions_url(),
            "https://example.openai.azure.com/openai/deployments/gpt-4o/chat/completions?api-version=2023-03-15-preview"
        );
    }

    #[tokio::test]
    async fn test_complete_returns_first_choice() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/openai/deployments/gpt-4o/chat/completions"))
            .and(query_param("api-version", "2023-03-15-preview"))
            .and(header("api-key", "test-key"))
            .and(body_partial_json(json!({
                "messages": [{"role": "system", "content": "be brief"}, {"role": "user", "content": "hi"}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": "[{\"Day 1\": \"Rest\"}]"}}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();
        let reply = client
            .complete(&[ChatMessage::system("be brief"), ChatMessage::user("hi")])
            .await
            .unwrap();
        assert_eq!(reply, "[{\"Day 1\": \"Rest\"}]");
    }

    #[tokio::test]
    async fn test_missing_content_is_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"role": "assistant", "content": null}}]
            })))
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();
        let reply = client.complete(&[ChatMessage::user("hi")]).await.unwrap();
        assert!(reply.is_empty());
    }

    #[tokio::test]
    async fn test_no_choices_is_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();
        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(err.to_string().contains("no choices"));
    }

    #[tokio::test]
    async fn test_status_codes_map_to_api_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(401))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ItineraryError::Api { .. }));
        assert!(err.to_string().contains("authentication failed"));

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(err.to_string().contains("HTTP 500"));
        assert!(err.to_string().contains("boom"));
    }

    #[tokio::test]
    async fn test_missing_deployment_and_rate_limit() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(404))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ItineraryError::Api { .. }));
        assert!(err.to_string().contains("deployment 'gpt-4o' not found"));

        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ItineraryError::Api { .. }));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn test_non_json_success_body_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
            .mount(&server)
            .await;

        let client = AzureChatClient::new(&config_for(&server)).unwrap();
        let err = client.complete(&[ChatMessage::user("hi")]).await.unwrap_err();
        assert!(matches!(err, ItineraryError::Api { .. }));
        assert!(err.to_string().contains("invalid response body"));
    }

    #[tokio::test]
    async fn test_temperature_is_sent_when_configured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({"temperature": 0.5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{"message": {"content": "ok"}}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut config = config_for(&server);
        config.temperature = Some(0.5);
        let client = AzureChatClient::new(&config).unwrap();
        assert_eq!(client.complete(&[ChatMessage::user("hi")]).await.unwrap(), "ok");
    }
}
