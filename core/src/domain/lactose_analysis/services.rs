use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    lactose_analysis::{
        entities::{AnalysisRequest, AnalysisResult},
        parsers::normalize_reply,
        ports::{LLMClient, LactoseAnalysisService},
        prompts::build_prompt_payload,
        value_objects::AnalyzeInput,
    },
};

impl<LLM> LactoseAnalysisService for Service<LLM>
where
    LLM: LLMClient,
{
    fn ensure_configured(&self) -> Result<(), CoreError> {
        if self.llm_client.is_configured() {
            Ok(())
        } else {
            Err(CoreError::MissingApiKey)
        }
    }

    async fn analyze(&self, input: AnalyzeInput) -> Result<AnalysisResult, CoreError> {
        // 1. Credential, checked before the request is classified
        self.ensure_configured()?;

        // 2. Classify
        let request = AnalysisRequest::try_from(input)?;
        let kind = request.kind();

        // 3. Call LLM
        let payload = build_prompt_payload(&request);
        let reply = self.llm_client.generate_content(payload).await?;

        tracing::debug!(kind = %kind, reply_len = reply.len(), "received upstream reply");

        // 4. Normalize
        normalize_reply(kind, &reply)
    }
}
