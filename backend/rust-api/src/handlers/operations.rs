use axum::{extract::State, Json};
use std::sync::Arc;

use super::ApiError;
use crate::{
    extractors::AppJson,
    models::{
        DebugRequest, GenerateRequest, OperationBody, QuizRequest, ResultEnvelope,
        TranslateRequest,
    },
    services::{assistant_service::AssistantService, AppState},
};

/// POST /api/translate - Explain a piece of code
pub async fn translate(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<TranslateRequest>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    run(&state, body).await
}

/// POST /api/generate - Generate code from a description
pub async fn generate(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<GenerateRequest>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    run(&state, body).await
}

/// POST /api/debug - Find and fix bugs
pub async fn debug(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<DebugRequest>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    run(&state, body).await
}

/// POST /api/quiz - Build a multiple choice question about code
pub async fn quiz(
    State(state): State<Arc<AppState>>,
    AppJson(body): AppJson<QuizRequest>,
) -> Result<Json<ResultEnvelope>, ApiError> {
    run(&state, body).await
}

async fn run<B: OperationBody>(state: &AppState, body: B) -> Result<Json<ResultEnvelope>, ApiError> {
    tracing::info!("Handling {} request", B::KIND);

    let service = AssistantService::new(state.completion.clone());
    let result = service.execute(body).await?;

    Ok(Json(ResultEnvelope { result }))
}
