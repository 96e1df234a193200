use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use lactose_core::domain::lactose_analysis::{
    entities::AnalysisResult, ports::LactoseAnalysisService,
};

use crate::application::http::{
    analysis::validators::AnalyzeRequestBody,
    server::{
        api_entities::{
            api_error::{ApiError, ErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    post,
    path = "/analyze",
    tag = "analysis",
    summary = "Run a lactose analysis",
    description = "Builds the prompt for the requested analysis type, asks the upstream model and returns its normalized answer.",
    responses(
        (status = 200, body = AnalysisResult),
        (status = 400, body = ErrorResponse, description = "Unknown analysis type or malformed data"),
        (status = 405, body = ErrorResponse, description = "Only POST is accepted"),
        (status = 500, body = ErrorResponse, description = "Missing API key or internal failure"),
    ),
    request_body = AnalyzeRequestBody
)]
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequestBody>, JsonRejection>,
) -> Result<Response<AnalysisResult>, ApiError> {
    state.service.ensure_configured().map_err(ApiError::from)?;

    let Json(body) = payload.map_err(|e| {
        tracing::debug!("Rejected analysis body: {}", e);
        ApiError::BadRequest("Invalid analysis data".to_string())
    })?;

    let result = state
        .service
        .analyze(body.into())
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(result))
}
