//! Groq Provider - CompletionProvider over Groq's OpenAI-compatible API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GroqConfig::new(api_key)
//!     .with_model("llama-3.3-70b-versatile")
//!     .with_temperature(0.7);
//!
//! let provider = GroqProvider::new(config)?;
//! ```
//!
//! One prompt is sent per call as a single user message. Failures are
//! mapped onto [`AIError`] and returned; nothing is retried.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ports::{
    AIError, CompletionProvider, CompletionRequest, CompletionResponse, FinishReason,
    ProviderInfo, TokenUsage,
};

pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.3-70b-versatile";
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Configuration for the Groq provider.
#[derive(Debug, Clone)]
pub struct GroqConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    /// Used when a request carries no temperature of its own.
    pub temperature: f32,
    pub timeout: Duration,
}

impl GroqConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(60),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Exposes the API key (for making requests).
    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// Groq chat-completions client.
pub struct GroqProvider {
    config: GroqConfig,
    client: Client,
}

impl GroqProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// - `InvalidRequest` if the HTTP client cannot be built
    pub fn new(config: GroqConfig) -> Result<Self, AIError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn to_chat_request(&self, request: &CompletionRequest) -> ChatRequest {
        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: request.prompt.clone(),
            }],
            temperature: Some(request.temperature.unwrap_or(self.config.temperature)),
            max_tokens: request.max_tokens,
        }
    }

    async fn send_request(&self, request: &CompletionRequest) -> Result<Response, AIError> {
        self.client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(&self.to_chat_request(request))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AIError::Timeout {
                        timeout_secs: self.config.timeout.as_secs() as u32,
                    }
                } else if e.is_connect() {
                    AIError::network(format!("Connection failed: {}", e))
                } else {
                    AIError::network(e.to_string())
                }
            })
    }

    async fn parse_response(&self, response: Response) -> Result<CompletionResponse, AIError> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(error_for_status(status, &body));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| AIError::parse(format!("Failed to parse response: {}", e)))?;

        into_completion(chat)
    }
}

/// Maps a non-success HTTP status onto the port's error type.
fn error_for_status(status: StatusCode, body: &str) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::rate_limited(parse_retry_after(body)),
        400 | 404 | 413 | 422 => AIError::InvalidRequest(body.to_string()),
        500..=599 => AIError::unavailable(format!("Server error {}: {}", status, body)),
        _ => AIError::network(format!("Unexpected status {}: {}", status, body)),
    }
}

/// Reads "try again in Ns" out of a rate-limit message, defaulting to 30s.
fn parse_retry_after(body: &str) -> u32 {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|parsed| {
            let message = parsed.get("error")?.get("message")?.as_str()?.to_string();
            let idx = message.find("try again in ")?;
            let digits: String = message[idx + 13..]
                .chars()
                .take_while(|c| c.is_ascii_digit())
                .collect();
            digits.parse().ok()
        })
        .unwrap_or(30)
}

fn into_completion(chat: ChatResponse) -> Result<CompletionResponse, AIError> {
    let choice = chat
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| AIError::parse("No choices in response"))?;

    let finish_reason = FinishReason::from_api(choice.finish_reason.as_deref());
    if finish_reason == FinishReason::ContentFilter {
        return Err(AIError::content_filtered("completion was filtered by the provider"));
    }

    let usage = chat
        .usage
        .map(|u| TokenUsage::new(u.prompt_tokens, u.completion_tokens))
        .unwrap_or_default();

    Ok(CompletionResponse {
        content: choice.message.content,
        model: chat.model,
        usage,
        finish_reason,
    })
}

#[async_trait]
impl CompletionProvider for GroqProvider {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, AIError> {
        tracing::debug!(model = %self.config.model, prompt_chars = request.prompt.len(), "Sending completion request");

        let response = self.send_request(&request).await?;
        let completion = self.parse_response(response).await;

        match &completion {
            Ok(c) => tracing::info!(
                model = %c.model,
                total_tokens = c.usage.total_tokens,
                "Completion received"
            ),
            Err(e) => tracing::error!(error = %e, "Completion request failed"),
        }
        completion
    }

    fn provider_info(&self) -> ProviderInfo {
        ProviderInfo::new("groq", &self.config.model)
    }
}

// ----- OpenAI-compatible API types -----

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider() -> GroqProvider {
        GroqProvider::new(GroqConfig::new("test-key")).unwrap()
    }

    #[test]
    fn config_defaults_target_groq() {
        let config = GroqConfig::new("test-key");
        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.base_url, "https://api.groq.com/openai/v1");
        assert_eq!(config.temperature, 0.7);
        assert_eq!(config.api_key(), "test-key");
    }

    #[test]
    fn config_builder_works() {
        let config = GroqConfig::new("k")
            .with_model("mixtral")
            .with_base_url("http://localhost:9000/v1/")
            .with_temperature(0.2)
            .with_timeout(Duration::from_secs(5));
        assert_eq!(config.model, "mixtral");
        assert_eq!(config.temperature, 0.2);
        assert_eq!(config.timeout, Duration::from_secs(5));

        let provider = GroqProvider::new(config).unwrap();
        assert_eq!(provider.completions_url(), "http://localhost:9000/v1/chat/completions");
    }

    #[test]
    fn request_sends_prompt_as_single_user_message() {
        let chat = provider().to_chat_request(&CompletionRequest::new("Plan a lesson"));
        let json = serde_json::to_value(&chat).unwrap();
        assert_eq!(json["model"], "llama-3.3-70b-versatile");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "Plan a lesson");
        assert!((json["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!(json.get("max_tokens").is_none());
    }

    #[test]
    fn request_temperature_overrides_default() {
        let chat = provider().to_chat_request(&CompletionRequest::new("x").with_temperature(0.1));
        assert_eq!(chat.temperature, Some(0.1));
    }

    #[test]
    fn status_codes_map_to_errors() {
        assert_eq!(
            error_for_status(StatusCode::UNAUTHORIZED, ""),
            AIError::AuthenticationFailed
        );
        assert!(matches!(
            error_for_status(StatusCode::BAD_GATEWAY, "down"),
            AIError::Unavailable { .. }
        ));
        assert!(matches!(
            error_for_status(StatusCode::BAD_REQUEST, "bad"),
            AIError::InvalidRequest(_)
        ));
    }

    #[test]
    fn rate_limit_reads_retry_hint() {
        let body = r#"{"error":{"message":"Rate limit reached. Please try again in 12s."}}"#;
        assert_eq!(
            error_for_status(StatusCode::TOO_MANY_REQUESTS, body),
            AIError::rate_limited(12)
        );
        assert_eq!(parse_retry_after("not json"), 30);
    }

    #[test]
    fn response_parses_first_choice() {
        let chat: ChatResponse = serde_json::from_str(
            r##"{
                "model": "llama-3.3-70b-versatile",
                "choices": [{"message": {"role": "assistant", "content": "# Plan"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
            }"##,
        )
        .unwrap();
        let completion = into_completion(chat).unwrap();
        assert_eq!(completion.content, "# Plan");
        assert_eq!(completion.usage.total_tokens, 15);
        assert_eq!(completion.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn empty_choices_is_parse_error() {
        let chat: ChatResponse =
            serde_json::from_str(r#"{"model": "m", "choices": []}"#).unwrap();
        assert!(matches!(into_completion(chat), Err(AIError::Parse(_))));
    }

    #[test]
    fn filtered_completion_is_error() {
        let chat: ChatResponse = serde_json::from_str(
            r#"{"model": "m", "choices": [{"message": {"role": "assistant", "content": ""}, "finish_reason": "content_filter"}]}"#,
        )
        .unwrap();
        assert!(matches!(into_completion(chat), Err(AIError::ContentFiltered { .. })));
    }

    #[test]
    fn provider_info_names_groq() {
        let info = provider().provider_info();
        assert_eq!(info.name, "groq");
        assert_eq!(info.model, "llama-3.3-70b-versatile");
    }
}
