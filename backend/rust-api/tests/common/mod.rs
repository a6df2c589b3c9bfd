#![allow(dead_code)]

use async_trait::async_trait;
use axum::{body::to_bytes, body::Body, http::Request, Router};
use codetutor_api::{
    config::Config,
    create_router,
    models::ChatMessage,
    services::{
        completion_client::{CompletionClient, CompletionError},
        AppState,
    },
};
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;

enum Script {
    Reply(String),
    Fail { status: u16, body: String },
    Panic,
}

/// In-memory completion backend that replays a fixed reply or failure.
pub struct ScriptedCompletion {
    script: Script,
    prompts: Mutex<Vec<Vec<ChatMessage>>>,
}

impl ScriptedCompletion {
    pub fn replying(reply: &str) -> Arc<Self> {
        Self::with_script(Script::Reply(reply.to_string()))
    }

    /// Simulates a backend answering with an error status.
    pub fn failing(status: u16, body: &str) -> Arc<Self> {
        Self::with_script(Script::Fail {
            status,
            body: body.to_string(),
        })
    }

    /// Simulates a bug inside the backend adapter.
    pub fn panicking() -> Arc<Self> {
        Self::with_script(Script::Panic)
    }

    fn with_script(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn last_prompt(&self) -> Option<Vec<ChatMessage>> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(messages.to_vec());
        match &self.script {
            Script::Reply(text) => Ok(text.clone()),
            Script::Fail { status, body } => Err(CompletionError::Status {
                status: *status,
                body: body.clone(),
            }),
            Script::Panic => panic!("scripted completion panic"),
        }
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

pub fn create_test_app(completion: Arc<ScriptedCompletion>) -> Router {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();

    let app_state = Arc::new(AppState::with_client(Config::default(), completion));
    create_router(app_state)
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (u16, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status().as_u16();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}
