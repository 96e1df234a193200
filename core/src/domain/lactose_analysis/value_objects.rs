use serde_json::Value;

/// Unclassified analysis request as received from the client: the `type`
/// discriminator and its untyped `data` object.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeInput {
    pub kind: String,
    pub data: Value,
}

/// Text and optional structured-output schema sent to the upstream model.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptPayload {
    pub text: String,
    pub response_schema: Option<Value>,
}

impl PromptPayload {
    pub fn text(text: String) -> Self {
        Self {
            text,
            response_schema: None,
        }
    }

    pub fn structured(text: String, response_schema: Value) -> Self {
        Self {
            text,
            response_schema: Some(response_schema),
        }
    }
}
