use crate::{
    domain::common::{LactoseConfig, services::Service},
    infrastructure::llm::GeminiLLMClient,
};

pub type LactoseService = Service<GeminiLLMClient>;

pub fn create_service(config: LactoseConfig) -> LactoseService {
    if config.llm.gemini_api_key.is_none() {
        tracing::warn!("GEMINI_API_KEY is not set, analysis requests will be rejected");
    }

    Service::new(GeminiLLMClient::new(config.llm))
}
