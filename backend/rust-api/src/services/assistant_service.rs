use std::sync::Arc;

use crate::metrics;
use crate::models::{OperationBody, OperationKind, OperationResult};
use crate::services::{
    completion_client::{CompletionClient, CompletionError},
    normalizer, prompt_builder,
    result_parser::{self, ParseOutcome},
    validation,
};

/// Stages of one request → result transaction, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Prompting,
    AwaitingCompletion,
    Normalizing,
    Parsing,
    Done,
}

/// Failures that end a transaction. Parse problems are never one of them.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(String),
    #[error("Tidak ada respons dari model")]
    Upstream(#[from] CompletionError),
}

impl PipelineError {
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Validation(_) => Stage::Validating,
            PipelineError::Upstream(_) => Stage::AwaitingCompletion,
        }
    }
}

pub struct AssistantService {
    client: Arc<dyn CompletionClient>,
}

impl AssistantService {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self { client }
    }

    /// Runs one stateless transaction for `body`. The completion call is the
    /// only suspension point; nothing is retried.
    pub async fn execute<B: OperationBody>(&self, body: B) -> Result<OperationResult, PipelineError> {
        let kind = B::KIND;

        enter(kind, Stage::Validating);
        let request = validation::validate_body(body).inspect_err(|e| {
            tracing::warn!("Rejected {} request: {}", kind, e);
            metrics::record_operation(kind, metrics::OUTCOME_VALIDATION_ERROR);
        })?;

        enter(kind, Stage::Prompting);
        let messages = prompt_builder::build_messages(&request);

        enter(kind, Stage::AwaitingCompletion);
        let raw = metrics::track_completion(kind, self.client.complete(&messages))
            .await
            .and_then(|text| {
                if text.trim().is_empty() {
                    Err(CompletionError::EmptyReply)
                } else {
                    Ok(text)
                }
            })
            .inspect_err(|e| {
                tracing::error!(
                    "Completion failed for {} request (model={}): {}",
                    kind,
                    self.client.model_name(),
                    e
                );
                metrics::record_operation(kind, metrics::OUTCOME_UPSTREAM_ERROR);
            })?;

        enter(kind, Stage::Normalizing);
        let normalized = normalizer::normalize(&raw);

        enter(kind, Stage::Parsing);
        let outcome = result_parser::parse(&normalized, &request);
        match &outcome {
            ParseOutcome::Parsed(_) => {
                metrics::record_operation(kind, metrics::OUTCOME_PARSED);
            }
            ParseOutcome::Fallback { reason, .. } => {
                tracing::warn!("Using fallback {} result: {}", kind, reason);
                metrics::record_operation(kind, metrics::OUTCOME_FALLBACK);
            }
        }

        enter(kind, Stage::Done);
        Ok(outcome.into_result())
    }
}

fn enter(kind: OperationKind, stage: Stage) {
    tracing::debug!(operation = %kind, stage = ?stage, "pipeline stage");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ChatMessage, DebugRequest, DebugResult, ExplainResult, GenerateRequest, QuizRequest,
        TranslateRequest,
    };
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays one canned reply and records every prompt it receives.
    struct CannedClient {
        reply: Option<String>,
        calls: Mutex<Vec<Vec<ChatMessage>>>,
    }

    impl CannedClient {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply.to_string()),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: None,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl CompletionClient for CannedClient {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError> {
            self.calls.lock().unwrap().push(messages.to_vec());
            self.reply.clone().ok_or(CompletionError::EmptyReply)
        }
    }

    #[tokio::test]
    async fn test_fenced_reply_is_parsed() {
        let client = CannedClient::replying(
            "```json\n{\"summary\":\"assigns 1 to x\",\"lineNotes\":[],\"keyConcepts\":[\"assignment\"],\"tips\":\"none\"}\n```",
        );
        let service = AssistantService::new(client.clone());

        let result = service
            .execute(TranslateRequest {
                code: "x=1".into(),
                language: "python".into(),
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            OperationResult::Explain(ExplainResult {
                summary: "assigns 1 to x".into(),
                line_notes: vec![],
                key_concepts: vec!["assignment".into()],
                tips: "none".into(),
            })
        );
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_unparseable_reply_falls_back() {
        let client = CannedClient::replying("Tidak ada masalah.");
        let service = AssistantService::new(client);

        let result = service
            .execute(DebugRequest {
                code: "print('hi')".into(),
                language: "python".into(),
                error_message: None,
            })
            .await
            .unwrap();

        assert_eq!(
            result,
            OperationResult::Debug(DebugResult {
                has_error: false,
                errors: vec![],
                fixed_code: "print('hi')".into(),
                prevention_tips: "Tidak ada masalah.".into(),
            })
        );
    }

    #[tokio::test]
    async fn test_validation_failure_skips_completion() {
        let client = CannedClient::replying("{}");
        let service = AssistantService::new(client.clone());

        let err = service
            .execute(GenerateRequest {
                description: "".into(),
                language: "rust".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Validation(_)));
        assert_eq!(err.stage(), Stage::Validating);
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_not_swallowed() {
        let client = CannedClient::failing();
        let service = AssistantService::new(client.clone());

        let err = service
            .execute(QuizRequest {
                code: "x = 1".into(),
                language: "python".into(),
                difficulty: None,
            })
            .await
            .unwrap_err();

        assert!(matches!(err, PipelineError::Upstream(_)));
        assert_eq!(err.stage(), Stage::AwaitingCompletion);
        assert_eq!(client.call_count(), 1);
    }

    #[tokio::test]
    async fn test_blank_completion_is_upstream_error() {
        let client = CannedClient::replying(" \n ");
        let service = AssistantService::new(client);

        let err = service
            .execute(TranslateRequest {
                code: "x=1".into(),
                language: "python".into(),
            })
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            PipelineError::Upstream(CompletionError::EmptyReply)
        ));
    }

    #[tokio::test]
    async fn test_prompt_reaches_client() {
        let client = CannedClient::replying("{}");
        let service = AssistantService::new(client.clone());

        service
            .execute(DebugRequest {
                code: "print(y)".into(),
                language: "python".into(),
                error_message: Some("NameError".into()),
            })
            .await
            .unwrap();

        let calls = client.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), 2);
        assert!(calls[0][1].content.contains("NameError"));
    }
}
