//! HTTP client for OpenAI-compatible completion services

use crate::config::LLMServiceConfig;
use crate::error::{ManualQaError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Trait for LLM completion clients
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Generate chat completion
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String>;

    /// Deterministic JSON-object completion
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Result<serde_json::Value> {
        let messages = vec![
            ChatMessage::system(system_prompt),
            ChatMessage::user(user_prompt),
        ];
        let response = self
            .chat_completion(messages, &CompletionOptions::json())
            .await?;
        parse_json_object(&response)
    }

    /// Free-text completion of a single prompt
    async fn complete_text(&self, prompt: &str) -> Result<String> {
        self.chat_completion(vec![ChatMessage::user(prompt)], &CompletionOptions::text())
            .await
    }

    /// Get model name
    fn model_name(&self) -> &str;
}

/// Chat message for completion requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Sampling options for one completion
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOptions {
    pub temperature: f32,
    /// Overrides the configured cap when set
    pub max_tokens: Option<u32>,
    /// Ask for `response_format = json_object`
    pub json_mode: bool,
}

impl CompletionOptions {
    /// Temperature 0, JSON-object mode
    pub fn json() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: Some(200),
            json_mode: true,
        }
    }

    pub fn text() -> Self {
        Self {
            temperature: 0.2,
            max_tokens: None,
            json_mode: false,
        }
    }
}

/// Extract and parse the outermost JSON object of a model reply
pub fn parse_json_object(response: &str) -> Result<serde_json::Value> {
    // Extract JSON from response (handle markdown code blocks)
    let json_str = match (response.find('{'), response.rfind('}')) {
        (Some(start), Some(end)) if start < end => &response[start..=end],
        _ => response,
    };

    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| ManualQaError::Llm(format!("Failed to parse JSON object: {}", e)))?;

    if value.is_object() {
        Ok(value)
    } else {
        Err(ManualQaError::Llm(
            "Failed to parse JSON object: reply is not an object".to_string(),
        ))
    }
}

/// OpenAI-compatible client (vLLM, OpenAI, llama.cpp server, ...)
pub struct HttpLLMClient {
    http_client: reqwest::Client,
    config: LLMServiceConfig,
}

impl HttpLLMClient {
    /// Create new client from configuration
    pub fn new(config: LLMServiceConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(LLMServiceConfig::default())
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<serde_json::Value>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[async_trait]
impl LLMClient for HttpLLMClient {
    async fn chat_completion(
        &self,
        messages: Vec<ChatMessage>,
        options: &CompletionOptions,
    ) -> Result<String> {
        let start = Instant::now();

        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: options.temperature,
            max_tokens: options.max_tokens.unwrap_or(self.config.max_tokens),
            response_format: options
                .json_mode
                .then(|| serde_json::json!({"type": "json_object"})),
        };

        let url = format!("{}/v1/chat/completions", self.config.url.trim_end_matches('/'));

        let mut req = self.http_client.post(&url).json(&request);

        if let Some(ref api_key) = self.config.api_key {
            req = req.header("Authorization", format!("Bearer {}", api_key));
        }

        let response = req.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ManualQaError::ExternalError(format!(
                "LLM service error (HTTP {}): {}",
                status, body
            )));
        }

        let chat_response: ChatResponse = response.json().await?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ManualQaError::Llm("No response from LLM".to_string()))?
            .message
            .content;

        tracing::debug!(
            "Chat completion from {} in {}ms",
            self.config.model,
            start.elapsed().as_millis()
        );

        Ok(content)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

/// Client that always fails; every LLM-backed step takes its degraded path
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledLLMClient;

#[async_trait]
impl LLMClient for DisabledLLMClient {
    async fn chat_completion(
        &self,
        _messages: Vec<ChatMessage>,
        _options: &CompletionOptions,
    ) -> Result<String> {
        Err(ManualQaError::Llm("LLM service disabled".to_string()))
    }

    fn model_name(&self) -> &str {
        "disabled"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_object_in_code_fence() {
        let reply = "```json\n{\"best_index\": 2, \"reason\": \"mentions psi\"}\n```";
        let value = parse_json_object(reply).unwrap();
        assert_eq!(value["best_index"], 2);
    }

    #[test]
    fn test_parse_json_object_rejects_garbage() {
        assert!(parse_json_object("no json here").is_err());
        assert!(parse_json_object("[1, 2]").is_err());
    }

    #[test]
    fn test_json_request_shape() {
        let request = ChatRequest {
            model: "m",
            messages: vec![ChatMessage::user("hi")],
            temperature: CompletionOptions::json().temperature,
            max_tokens: 200,
            response_format: Some(serde_json::json!({"type": "json_object"})),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["response_format"]["type"], "json_object");

        let text = ChatRequest {
            response_format: None,
            ..request
        };
        assert!(serde_json::to_value(&text).unwrap().get("response_format").is_none());
    }

    #[tokio::test]
    async fn test_disabled_client_fails() {
        let client = DisabledLLMClient;
        assert!(client.complete_text("hello").await.is_err());
        assert!(client.complete_json("sys", "user").await.is_err());
    }
}
