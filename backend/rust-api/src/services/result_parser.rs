use serde::de::DeserializeOwned;

use crate::models::{
    DebugResult, Difficulty, ExplainResult, GenerateResult, OperationKind, OperationRequest,
    OperationResult, QuizChoice, QuizResult,
};

const GENERATE_FALLBACK_EXPLANATION: &str = "Kode dibuat apa adanya dari respons model.";
const GENERATE_FALLBACK_USAGE: &str = "Jalankan kode";
const GENERATE_FALLBACK_TIPS: &str = "Sesuaikan dengan kebutuhan";

const QUIZ_FALLBACK_QUESTION: &str = "Apa output kode di atas?";
const QUIZ_FALLBACK_CHOICES: [(&str, &str); 4] = [
    ("A", "Lihat kode"),
    ("B", "Error"),
    ("C", "Undefined"),
    ("D", "Null"),
];
const QUIZ_FALLBACK_LABEL: &str = "A";

/// Why a normalized reply was not accepted as the operation's result.
#[derive(Debug, thiserror::Error)]
pub enum ShapeViolation {
    #[error("{kind} reply is not a valid result document: {source}")]
    Decode {
        kind: OperationKind,
        #[source]
        source: serde_json::Error,
    },
    #[error("{kind} reply breaks its result invariants: {reason}")]
    Invariant { kind: OperationKind, reason: String },
}

#[derive(Debug)]
pub enum ParseOutcome {
    Parsed(OperationResult),
    Fallback {
        result: OperationResult,
        reason: ShapeViolation,
    },
}

impl ParseOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, ParseOutcome::Fallback { .. })
    }

    pub fn into_result(self) -> OperationResult {
        match self {
            ParseOutcome::Parsed(result) | ParseOutcome::Fallback { result, .. } => result,
        }
    }
}

/// A result record the parser can decode, check and synthesize.
trait ResultShape: DeserializeOwned + Into<OperationResult> {
    const KIND: OperationKind;

    fn check(&self) -> Result<(), String>;

    fn fallback(normalized: &str, request: &OperationRequest) -> Self;
}

/// Decodes a normalized reply into the result shape of `request.kind`.
///
/// Any decode failure, including well-formed JSON with missing keys or wrong
/// types, yields the kind's fallback record instead of an error.
pub fn parse(normalized: &str, request: &OperationRequest) -> ParseOutcome {
    match request.kind {
        OperationKind::Translate => decode::<ExplainResult>(normalized, request),
        OperationKind::Generate => decode::<GenerateResult>(normalized, request),
        OperationKind::Debug => decode::<DebugResult>(normalized, request),
        OperationKind::Quiz => decode::<QuizResult>(normalized, request),
    }
}

fn decode<T: ResultShape>(normalized: &str, request: &OperationRequest) -> ParseOutcome {
    let decoded = serde_json::from_str::<T>(normalized)
        .map_err(|source| ShapeViolation::Decode {
            kind: T::KIND,
            source,
        })
        .and_then(|value| match value.check() {
            Ok(()) => Ok(value),
            Err(reason) => Err(ShapeViolation::Invariant {
                kind: T::KIND,
                reason,
            }),
        });

    match decoded {
        Ok(value) => ParseOutcome::Parsed(value.into()),
        Err(reason) => ParseOutcome::Fallback {
            result: T::fallback(normalized, request).into(),
            reason,
        },
    }
}

fn check_line(line: u32, field: &str) -> Result<(), String> {
    if line == 0 {
        return Err(format!("{} line numbers start at 1", field));
    }
    Ok(())
}

impl ResultShape for ExplainResult {
    const KIND: OperationKind = OperationKind::Translate;

    fn check(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() {
            return Err("summary is empty".to_string());
        }
        self.line_notes
            .iter()
            .try_for_each(|note| check_line(note.line, "lineNotes"))
    }

    fn fallback(normalized: &str, _request: &OperationRequest) -> Self {
        ExplainResult {
            summary: normalized.to_string(),
            line_notes: Vec::new(),
            key_concepts: Vec::new(),
            tips: String::new(),
        }
    }
}

impl ResultShape for GenerateResult {
    const KIND: OperationKind = OperationKind::Generate;

    fn check(&self) -> Result<(), String> {
        Ok(())
    }

    fn fallback(normalized: &str, _request: &OperationRequest) -> Self {
        GenerateResult {
            code: normalized.to_string(),
            explanation: GENERATE_FALLBACK_EXPLANATION.to_string(),
            usage: GENERATE_FALLBACK_USAGE.to_string(),
            tips: GENERATE_FALLBACK_TIPS.to_string(),
        }
    }
}

impl ResultShape for DebugResult {
    const KIND: OperationKind = OperationKind::Debug;

    fn check(&self) -> Result<(), String> {
        if !self.has_error && !self.errors.is_empty() {
            return Err("errors listed while hasError is false".to_string());
        }
        self.errors
            .iter()
            .try_for_each(|issue| check_line(issue.line, "errors"))
    }

    // The submitted code is echoed back unchanged; the model text goes to the tips.
    fn fallback(normalized: &str, request: &OperationRequest) -> Self {
        DebugResult {
            has_error: false,
            errors: Vec::new(),
            fixed_code: request.primary_text.clone(),
            prevention_tips: normalized.to_string(),
        }
    }
}

impl ResultShape for QuizResult {
    const KIND: OperationKind = OperationKind::Quiz;

    fn check(&self) -> Result<(), String> {
        if self.choices.is_empty() {
            return Err("choices is empty".to_string());
        }
        if let Some(choice) = self.choices.iter().find(|choice| !is_choice_label(&choice.label)) {
            return Err(format!("choice label '{}' is not a single letter", choice.label));
        }
        if !self
            .choices
            .iter()
            .any(|choice| choice.label == self.correct_label)
        {
            return Err(format!(
                "correctLabel '{}' matches no choice",
                self.correct_label
            ));
        }
        Ok(())
    }

    fn fallback(normalized: &str, _request: &OperationRequest) -> Self {
        QuizResult {
            question: QUIZ_FALLBACK_QUESTION.to_string(),
            choices: QUIZ_FALLBACK_CHOICES
                .iter()
                .map(|(label, text)| QuizChoice {
                    label: label.to_string(),
                    text: text.to_string(),
                })
                .collect(),
            correct_label: QUIZ_FALLBACK_LABEL.to_string(),
            explanation: normalized.to_string(),
            difficulty: Difficulty::Medium,
        }
    }
}

fn is_choice_label(label: &str) -> bool {
    let mut chars = label.chars();
    matches!((chars.next(), chars.next()), (Some(letter), None) if letter.is_alphabetic())
}

impl From<ExplainResult> for OperationResult {
    fn from(value: ExplainResult) -> Self {
        OperationResult::Explain(value)
    }
}

impl From<GenerateResult> for OperationResult {
    fn from(value: GenerateResult) -> Self {
        OperationResult::Generate(value)
    }
}

impl From<DebugResult> for OperationResult {
    fn from(value: DebugResult) -> Self {
        OperationResult::Debug(value)
    }
}

impl From<QuizResult> for OperationResult {
    fn from(value: QuizResult) -> Self {
        OperationResult::Quiz(value)
    }
}
