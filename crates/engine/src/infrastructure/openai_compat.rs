//! Chat-completions LLM client (OpenAI-compatible API; Ollama by default)

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, MessageRole,
};

/// Client for any OpenAI-compatible `/v1/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

/// Default base URL (a local Ollama).
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434";

/// Default model.
pub const DEFAULT_LLM_MODEL: &str = "llama3.2";

/// Default request timeout.
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(60);

impl OpenAiCompatClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

impl Default for OpenAiCompatClient {
    fn default() -> Self {
        Self::new(DEFAULT_LLM_BASE_URL, DEFAULT_LLM_MODEL, None, DEFAULT_LLM_TIMEOUT)
    }
}

#[async_trait]
impl LlmPort for OpenAiCompatClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = OpenAIChatRequest {
            model: self.model.clone(),
            messages: build_messages(&request),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let mut builder = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .json(&api_request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(classify_status(status, error_text));
        }

        let api_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn classify_transport_error(e: reqwest::Error) -> LlmError {
    if e.is_timeout() {
        LlmError::Timeout(e.to_string())
    } else if e.is_connect() {
        LlmError::Unavailable(e.to_string())
    } else {
        LlmError::RequestFailed(e.to_string())
    }
}

fn classify_status(status: StatusCode, body: String) -> LlmError {
    let message = format!("{}: {}", status, body);
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LlmError::Unauthorized(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => LlmError::Timeout(message),
        StatusCode::TOO_MANY_REQUESTS => LlmError::Unavailable(message),
        s if s.is_server_error() => LlmError::Unavailable(message),
        _ => LlmError::RequestFailed(message),
    }
}

fn build_messages(request: &LlmRequest) -> Vec<OpenAIMessage> {
    let mut messages = Vec::new();

    if let Some(system) = &request.system_prompt {
        messages.push(OpenAIMessage {
            role: "system".to_string(),
            content: Some(system.clone()),
        });
    }

    for msg in &request.messages {
        messages.push(OpenAIMessage {
            role: match msg.role {
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            }
            .to_string(),
            content: Some(msg.content.clone()),
        });
    }

    messages
}

fn convert_response(response: OpenAIChatResponse) -> Result<LlmResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in LLM response".to_string()))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("stop") => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Unknown,
        None => FinishReason::Stop,
    };

    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
    })
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
}

#[derive(Debug, Deserialize, Default)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;

    #[test]
    fn system_prompt_comes_first() {
        let request = LlmRequest::new(vec![ChatMessage::user("Water + Fire")])
            .with_system_prompt("You combine words.");
        let messages = build_messages(&request);
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, "system");
        assert_eq!(messages[1].role, "user");
        assert_eq!(messages[1].content.as_deref(), Some("Water + Fire"));
    }

    #[test]
    fn assistant_turns_keep_their_role() {
        let request = LlmRequest::new(vec![
            ChatMessage::user("Earth + Water"),
            ChatMessage::assistant("Mud"),
            ChatMessage::user("Water + Fire"),
        ]);
        let roles: Vec<String> = build_messages(&request)
            .into_iter()
            .map(|m| m.role)
            .collect();
        assert_eq!(roles, vec!["user", "assistant", "user"]);
    }

    #[test]
    fn status_codes_are_classified() {
        assert!(matches!(
            classify_status(StatusCode::UNAUTHORIZED, String::new()),
            LlmError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::FORBIDDEN, String::new()),
            LlmError::Unauthorized(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::GATEWAY_TIMEOUT, String::new()),
            LlmError::Timeout(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_GATEWAY, String::new()),
            LlmError::Unavailable(_)
        ));
        assert!(matches!(
            classify_status(StatusCode::BAD_REQUEST, "bad model".to_string()),
            LlmError::RequestFailed(msg) if msg.contains("bad model")
        ));
    }

    #[test]
    fn response_without_choices_is_invalid() {
        let response: OpenAIChatResponse =
            serde_json::from_str(r#"{"choices":[],"usage":null}"#).unwrap();
        assert!(matches!(
            convert_response(response),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn response_content_is_extracted() {
        let response: OpenAIChatResponse = serde_json::from_str(
            r#"{
                "choices": [{"message": {"role": "assistant", "content": "{\"emoji\":\"💨\",\"text\":\"Steam\"}"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 8, "total_tokens": 20}
            }"#,
        )
        .unwrap();
        let converted = convert_response(response).unwrap();
        assert!(converted.content.contains("Steam"));
        assert_eq!(converted.finish_reason, FinishReason::Stop);
    }

    #[test]
    fn blank_api_key_is_ignored() {
        let client = OpenAiCompatClient::new(
            "http://localhost:11434/",
            "llama3.2",
            Some("  ".to_string()),
            DEFAULT_LLM_TIMEOUT,
        );
        assert!(client.api_key.is_none());
        assert_eq!(client.base_url, "http://localhost:11434");
    }
}
