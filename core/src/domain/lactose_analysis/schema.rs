use serde_json::json;

/// Returns the Gemini response schema for base dish analysis
pub fn get_base_dish_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "estimatedLactose": { "type": "NUMBER" },
            "hiddenIngredients": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": { "type": "STRING" },
                        "estimatedGrams": { "type": "NUMBER" }
                    }
                }
            }
        }
    })
}
