use std::sync::LazyLock;

use regex::Regex;

use crate::domain::{
    common::entities::app_errors::CoreError,
    lactose_analysis::entities::{
        AnalysisKind, AnalysisResult, BaseDishAnalysis, BaseDishWeight, IngredientQuantity,
        LactoseAmount,
    },
};

static NUMERIC_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?").expect("valid numeric prefix regex")
});
static OPENING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```json\n?").expect("valid opening fence regex"));
static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n?```").expect("valid closing fence regex"));

/// Reads the longest numeric prefix of `text`, ignoring whatever follows it
/// ("4.5 g" reads as 4.5). Returns `None` when no digits lead the text.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let matched = NUMERIC_PREFIX.find(text.trim_start())?;
    matched
        .as_str()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Lactose grams for a single item. Unreadable replies count as lactose-free.
pub fn parse_lactose_amount(reply: &str) -> LactoseAmount {
    let normalized = reply.trim().replacen(',', ".", 1);

    LactoseAmount {
        lactose_amount: parse_leading_float(&normalized).unwrap_or(0.0),
    }
}

/// Gram estimate where zero and unreadable replies both mean "no estimate".
pub fn parse_optional_grams(reply: &str) -> Option<f64> {
    parse_leading_float(reply.trim()).filter(|value| *value != 0.0)
}

/// Drops the first ```` ```json ```` opener and the first closing fence.
pub fn strip_code_fence(reply: &str) -> String {
    let without_opening = OPENING_FENCE.replace(reply, "");
    CLOSING_FENCE.replace(&without_opening, "").into_owned()
}

pub fn parse_base_dish(reply: &str) -> Result<BaseDishAnalysis, CoreError> {
    serde_json::from_str(&strip_code_fence(reply)).map_err(|e| {
        tracing::error!("Failed to parse base dish analysis: {}", e);
        CoreError::InvalidResponse(format!("Failed to parse base dish analysis: {}", e))
    })
}

pub fn normalize_reply(kind: AnalysisKind, reply: &str) -> Result<AnalysisResult, CoreError> {
    let result = match kind {
        AnalysisKind::AnalyzeFoodItem => AnalysisResult::FoodItem(parse_lactose_amount(reply)),
        AnalysisKind::AnalyzeBaseDish => AnalysisResult::BaseDish(parse_base_dish(reply)?),
        AnalysisKind::GetIngredientQuantity => {
            AnalysisResult::IngredientQuantity(IngredientQuantity {
                quantity: parse_optional_grams(reply),
            })
        }
        AnalysisKind::GetBaseDishWeight => AnalysisResult::BaseDishWeight(BaseDishWeight {
            weight: parse_optional_grams(reply),
        }),
    };

    Ok(result)
}
