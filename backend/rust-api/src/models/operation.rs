use serde::{de, Deserialize, Deserializer, Serialize};
use std::{fmt, str::FromStr};
use validator::{Validate, ValidationError};

/// Selects which prompt, result shape and fallback apply to a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    Translate,
    Generate,
    Debug,
    Quiz,
}

impl OperationKind {
    pub const ALL: [OperationKind; 4] = [
        OperationKind::Translate,
        OperationKind::Generate,
        OperationKind::Debug,
        OperationKind::Quiz,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Translate => "translate",
            OperationKind::Generate => "generate",
            OperationKind::Debug => "debug",
            OperationKind::Quiz => "quiz",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, thiserror::Error)]
#[error("unknown difficulty '{0}', expected easy, medium or hard")]
pub struct UnknownDifficulty(pub String);

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    /// Indonesian label used when talking to the model.
    pub fn label_id(&self) -> &'static str {
        match self {
            Difficulty::Easy => "mudah",
            Difficulty::Medium => "sedang",
            Difficulty::Hard => "sulit",
        }
    }
}

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "easy" | "mudah" => Ok(Difficulty::Easy),
            "medium" | "sedang" => Ok(Difficulty::Medium),
            "hard" | "sulit" => Ok(Difficulty::Hard),
            _ => Err(UnknownDifficulty(value.to_string())),
        }
    }
}

// Models answer with either the English or the Indonesian label.
impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::unknown_variant(&raw, &["easy", "medium", "hard"]))
    }
}

/// Validated input for one pipeline transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub kind: OperationKind,
    pub language: String,
    /// Source code, or the task description for `generate`.
    pub primary_text: String,
    /// Known error message supplied with a debug request.
    pub auxiliary_text: Option<String>,
    pub difficulty: Option<Difficulty>,
}

/// Inbound JSON body of one operation endpoint.
pub trait OperationBody: Validate + Send {
    const KIND: OperationKind;

    /// Converts an already field-validated body. Errors are human-readable.
    fn into_request(self) -> Result<OperationRequest, String>;
}

fn code_present(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Kode diperlukan")
}

fn description_present(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Deskripsi diperlukan")
}

fn language_present(value: &str) -> Result<(), ValidationError> {
    require_text(value, "Bahasa pemrograman diperlukan")
}

fn require_text(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(message.into()));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

// Missing string fields default to "" so that absent and blank inputs are
// reported by the same validation rule.

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct TranslateRequest {
    #[serde(default)]
    #[validate(custom(function = "code_present"))]
    pub code: String,

    #[serde(default)]
    #[validate(custom(function = "language_present"))]
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct GenerateRequest {
    #[serde(default)]
    #[validate(custom(function = "description_present"))]
    pub description: String,

    #[serde(default)]
    #[validate(custom(function = "language_present"))]
    pub language: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct DebugRequest {
    #[serde(default)]
    #[validate(custom(function = "code_present"))]
    pub code: String,

    #[serde(default)]
    #[validate(custom(function = "language_present"))]
    pub language: String,

    #[serde(default, rename = "errorMessage")]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuizRequest {
    #[serde(default)]
    #[validate(custom(function = "code_present"))]
    pub code: String,

    #[serde(default)]
    #[validate(custom(function = "language_present"))]
    pub language: String,

    #[serde(default)]
    pub difficulty: Option<String>,
}

impl OperationBody for TranslateRequest {
    const KIND: OperationKind = OperationKind::Translate;

    fn into_request(self) -> Result<OperationRequest, String> {
        Ok(OperationRequest {
            kind: Self::KIND,
            language: self.language.trim().to_string(),
            primary_text: self.code,
            auxiliary_text: None,
            difficulty: None,
        })
    }
}

impl OperationBody for GenerateRequest {
    const KIND: OperationKind = OperationKind::Generate;

    fn into_request(self) -> Result<OperationRequest, String> {
        Ok(OperationRequest {
            kind: Self::KIND,
            language: self.language.trim().to_string(),
            primary_text: self.description,
            auxiliary_text: None,
            difficulty: None,
        })
    }
}

impl OperationBody for DebugRequest {
    const KIND: OperationKind = OperationKind::Debug;

    fn into_request(self) -> Result<OperationRequest, String> {
        Ok(OperationRequest {
            kind: Self::KIND,
            language: self.language.trim().to_string(),
            primary_text: self.code,
            auxiliary_text: non_blank(self.error_message),
            difficulty: None,
        })
    }
}

impl OperationBody for QuizRequest {
    const KIND: OperationKind = OperationKind::Quiz;

    fn into_request(self) -> Result<OperationRequest, String> {
        let difficulty = match non_blank(self.difficulty) {
            Some(raw) => raw.parse::<Difficulty>().map_err(|e| e.to_string())?,
            None => Difficulty::default(),
        };

        Ok(OperationRequest {
            kind: Self::KIND,
            language: self.language.trim().to_string(),
            primary_text: self.code,
            auxiliary_text: None,
            difficulty: Some(difficulty),
        })
    }
}
