use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    common::entities::app_errors::CoreError, lactose_analysis::value_objects::AnalyzeInput,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum AnalysisKind {
    AnalyzeFoodItem,
    AnalyzeBaseDish,
    GetIngredientQuantity,
    GetBaseDishWeight,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::AnalyzeFoodItem => "analyzeFoodItem",
            AnalysisKind::AnalyzeBaseDish => "analyzeBaseDish",
            AnalysisKind::GetIngredientQuantity => "getIngredientQuantity",
            AnalysisKind::GetBaseDishWeight => "getBaseDishWeight",
        }
    }
}

impl FromStr for AnalysisKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "analyzeFoodItem" => Ok(AnalysisKind::AnalyzeFoodItem),
            "analyzeBaseDish" => Ok(AnalysisKind::AnalyzeBaseDish),
            "getIngredientQuantity" => Ok(AnalysisKind::GetIngredientQuantity),
            "getBaseDishWeight" => Ok(AnalysisKind::GetBaseDishWeight),
            other => Err(CoreError::InvalidAnalysisType(other.to_string())),
        }
    }
}

impl fmt::Display for AnalysisKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A weight as typed by the user. Clients send either a number or the raw
/// text of an input field, and it is echoed into the prompt as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Grams {
    Number(f64),
    Text(String),
}

impl fmt::Display for Grams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Grams::Number(value) => write!(f, "{value}"),
            Grams::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FoodItemInput {
    pub name: String,
    pub weight: Grams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BaseDishInput {
    pub name: String,
    pub weight: Grams,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IngredientQuantityInput {
    pub base_dish: String,
    pub ingredient_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseDishWeightInput {
    pub dish_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    AnalyzeFoodItem(FoodItemInput),
    AnalyzeBaseDish(BaseDishInput),
    GetIngredientQuantity(IngredientQuantityInput),
    GetBaseDishWeight(BaseDishWeightInput),
}

impl AnalysisRequest {
    pub fn kind(&self) -> AnalysisKind {
        match self {
            AnalysisRequest::AnalyzeFoodItem(_) => AnalysisKind::AnalyzeFoodItem,
            AnalysisRequest::AnalyzeBaseDish(_) => AnalysisKind::AnalyzeBaseDish,
            AnalysisRequest::GetIngredientQuantity(_) => AnalysisKind::GetIngredientQuantity,
            AnalysisRequest::GetBaseDishWeight(_) => AnalysisKind::GetBaseDishWeight,
        }
    }
}

impl TryFrom<AnalyzeInput> for AnalysisRequest {
    type Error = CoreError;

    fn try_from(input: AnalyzeInput) -> Result<Self, Self::Error> {
        let kind: AnalysisKind = input.kind.parse()?;

        let request = match kind {
            AnalysisKind::AnalyzeFoodItem => {
                AnalysisRequest::AnalyzeFoodItem(decode_data(kind, input.data)?)
            }
            AnalysisKind::AnalyzeBaseDish => {
                AnalysisRequest::AnalyzeBaseDish(decode_data(kind, input.data)?)
            }
            AnalysisKind::GetIngredientQuantity => {
                AnalysisRequest::GetIngredientQuantity(decode_data(kind, input.data)?)
            }
            AnalysisKind::GetBaseDishWeight => {
                AnalysisRequest::GetBaseDishWeight(decode_data(kind, input.data)?)
            }
        };

        Ok(request)
    }
}

fn decode_data<T: DeserializeOwned>(kind: AnalysisKind, data: Value) -> Result<T, CoreError> {
    serde_json::from_value(data)
        .map_err(|e| CoreError::InvalidAnalysisData(format!("{kind}: {e}")))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LactoseAmount {
    pub lactose_amount: f64,
}

/// The response schema marks nothing as required, so every field the model
/// may leave out is optional and omitted again on the way back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HiddenIngredient {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_grams: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BaseDishAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_lactose: Option<f64>,
    #[serde(default)]
    pub hidden_ingredients: Vec<HiddenIngredient>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct IngredientQuantity {
    pub quantity: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BaseDishWeight {
    pub weight: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AnalysisResult {
    FoodItem(LactoseAmount),
    BaseDish(BaseDishAnalysis),
    IngredientQuantity(IngredientQuantity),
    BaseDishWeight(BaseDishWeight),
}
