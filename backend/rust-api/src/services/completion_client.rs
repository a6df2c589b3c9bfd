use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::LlmSettings;
use crate::models::ChatMessage;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion backend returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion response could not be decoded: {0}")]
    Decode(String),
    #[error("completion backend returned no text")]
    EmptyReply,
}

/// Capability that turns a list of role-tagged messages into one completion.
///
/// Implementations own transport concerns such as timeouts. Callers must not
/// expect retries from either side of this trait.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;

    fn model_name(&self) -> &str {
        "unknown"
    }
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
pub struct ChatCompletionsClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionsClient {
    pub fn new(settings: &LlmSettings) -> Result<Self, CompletionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        })
    }
}

#[async_trait]
impl CompletionClient for ChatCompletionsClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        tracing::debug!(
            "Sending {} messages to {} (model={})",
            messages.len(),
            self.endpoint,
            self.model
        );

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::Decode(e.to_string()))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CompletionError::EmptyReply)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn settings(base_url: String) -> LlmSettings {
        LlmSettings {
            base_url,
            api_key: "test-key".into(),
            model: "test-model".into(),
            temperature: 0.2,
            max_tokens: 64,
            timeout_secs: 5,
        }
    }

    #[tokio::test]
    async fn test_returns_first_choice_content() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|Json(body): Json<Value>| async move {
                assert_eq!(body["model"], "test-model");
                assert_eq!(body["messages"][0]["role"], "system");
                assert_eq!(body["messages"][1]["content"], "halo");
                Json(json!({
                    "choices": [{"message": {"role": "assistant", "content": "{\"ok\":true}"}}]
                }))
            }),
        );
        let base_url = spawn_backend(router).await;
        let client = ChatCompletionsClient::new(&settings(base_url)).unwrap();

        let reply = client
            .complete(&[ChatMessage::system("sys"), ChatMessage::user("halo")])
            .await
            .unwrap();

        assert_eq!(reply, "{\"ok\":true}");
        assert_eq!(client.model_name(), "test-model");
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { (StatusCode::TOO_MANY_REQUESTS, "slow down") }),
        );
        let base_url = spawn_backend(router).await;
        let client = ChatCompletionsClient::new(&settings(base_url)).unwrap();

        let err = client.complete(&[ChatMessage::user("x")]).await.unwrap_err();
        match err {
            CompletionError::Status { status, body } => {
                assert_eq!(status, 429);
                assert_eq!(body, "slow down");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_blank_content_is_empty_reply() {
        let router = Router::new().route(
            "/v1/chat/completions",
            post(|| async { Json(json!({"choices": [{"message": {"content": "   "}}]})) }),
        );
        let base_url = spawn_backend(router).await;
        let client = ChatCompletionsClient::new(&settings(base_url)).unwrap();

        let err = client.complete(&[ChatMessage::user("x")]).await.unwrap_err();
        assert!(matches!(err, CompletionError::EmptyReply));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        let client =
            ChatCompletionsClient::new(&settings("http://127.0.0.1:1/v1".into())).unwrap();
        let err = client.complete(&[ChatMessage::user("x")]).await.unwrap_err();
        assert!(matches!(err, CompletionError::Transport(_)));
    }
}
