use serde::{Deserialize, Serialize};

use super::operation::Difficulty;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineNote {
    pub line: u32,
    pub snippet: String,
    pub note: String,
}

/// Reply shape of the `translate` operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplainResult {
    pub summary: String,
    pub line_notes: Vec<LineNote>,
    pub key_concepts: Vec<String>,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub code: String,
    pub explanation: String,
    pub usage: String,
    pub tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugIssue {
    pub line: u32,
    pub kind: String,
    pub description: String,
    pub fix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugResult {
    pub has_error: bool,
    pub errors: Vec<DebugIssue>,
    pub fixed_code: String,
    pub prevention_tips: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizChoice {
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResult {
    pub question: String,
    pub choices: Vec<QuizChoice>,
    pub correct_label: String,
    pub explanation: String,
    pub difficulty: Difficulty,
}

/// Structured reply of any operation, serialized without a tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OperationResult {
    Explain(ExplainResult),
    Generate(GenerateResult),
    Debug(DebugResult),
    Quiz(QuizResult),
}

#[derive(Debug, Serialize)]
pub struct ResultEnvelope {
    pub result: OperationResult,
}
