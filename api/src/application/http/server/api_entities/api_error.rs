use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lactose_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ErrorResponse {
    pub message: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Only POST requests allowed")]
    MethodNotAllowed,

    #[error("{0}")]
    BadRequest(String),

    #[error("Error from Gemini API")]
    UpstreamError(StatusCode),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UpstreamError(status) => *status,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::MissingApiKey => {
                ApiError::InternalServerError("API key not configured".to_string())
            }
            CoreError::InvalidAnalysisType(_) => {
                ApiError::BadRequest("Invalid analysis type".to_string())
            }
            CoreError::InvalidAnalysisData(_) => {
                ApiError::BadRequest("Invalid analysis data".to_string())
            }
            CoreError::UpstreamError { status, .. } => ApiError::UpstreamError(
                StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY),
            ),
            CoreError::ExternalServiceError(_) | CoreError::InvalidResponse(_) => {
                error!("Server-side error: {}", error);
                ApiError::InternalServerError(INTERNAL_SERVER_ERROR_MESSAGE.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.to_string(),
        };

        (self.status(), Json(body)).into_response()
    }
}
