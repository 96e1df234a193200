use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    lactose_analysis::{
        entities::AnalysisResult,
        value_objects::{AnalyzeInput, PromptPayload},
    },
};

/// LLM Client trait for calling the upstream generative model
#[cfg_attr(test, mockall::automock)]
pub trait LLMClient: Send + Sync {
    /// Whether a credential is available for outbound calls.
    fn is_configured(&self) -> bool;

    /// Sends one prompt and returns the raw text of the first candidate.
    fn generate_content(
        &self,
        payload: PromptPayload,
    ) -> impl Future<Output = Result<String, CoreError>> + Send;
}

/// Service trait for lactose analysis business logic
pub trait LactoseAnalysisService: Send + Sync {
    fn ensure_configured(&self) -> Result<(), CoreError>;

    fn analyze(
        &self,
        input: AnalyzeInput,
    ) -> impl Future<Output = Result<AnalysisResult, CoreError>> + Send;
}
