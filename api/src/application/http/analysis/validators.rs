use lactose_core::domain::lactose_analysis::value_objects::AnalyzeInput;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Body of an analysis call. `type` is kept untyped so that a missing, null
/// or non-string discriminator is reported as an unknown analysis type
/// rather than a malformed body.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AnalyzeRequestBody {
    #[serde(rename = "type", default)]
    #[schema(value_type = String, example = "getBaseDishWeight")]
    pub kind: Option<Value>,

    #[serde(default)]
    #[schema(value_type = Object, example = json!({ "dishName": "Pizza" }))]
    pub data: Value,
}

impl From<AnalyzeRequestBody> for AnalyzeInput {
    fn from(body: AnalyzeRequestBody) -> Self {
        let kind = match body.kind {
            Some(Value::String(kind)) => kind,
            Some(other) => other.to_string(),
            None => String::new(),
        };

        AnalyzeInput {
            kind,
            data: body.data,
        }
    }
}
