use serde::{Deserialize, Serialize};

pub mod operation;
pub mod result;

pub use operation::{
    DebugRequest, Difficulty, GenerateRequest, OperationBody, OperationKind, OperationRequest,
    QuizRequest, TranslateRequest,
};
pub use result::{
    DebugIssue, DebugResult, ExplainResult, GenerateResult, LineNote, OperationResult,
    QuizChoice, QuizResult, ResultEnvelope,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// Role-tagged message handed to the completion backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}
