use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Invalid analysis type: {0}")]
    InvalidAnalysisType(String),

    #[error("Invalid analysis data: {0}")]
    InvalidAnalysisData(String),

    #[error("Upstream returned status {status}: {body}")]
    UpstreamError { status: u16, body: String },

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Invalid LLM response: {0}")]
    InvalidResponse(String),
}
