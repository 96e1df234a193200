use crate::domain::lactose_analysis::{
    entities::AnalysisRequest, schema::get_base_dish_schema, value_objects::PromptPayload,
};

pub fn build_prompt_payload(request: &AnalysisRequest) -> PromptPayload {
    match request {
        AnalysisRequest::AnalyzeFoodItem(input) => PromptPayload::text(format!(
            "Stima i grammi di lattosio in {}g di \"{}\". Considera la composizione tipica. \
             Rispondi SOLO con un numero (es. \"4.5\"). \
             Se l'alimento è tipicamente privo di lattosio, rispondi \"0\".",
            input.weight, input.name
        )),
        AnalysisRequest::AnalyzeBaseDish(input) => PromptPayload::structured(
            format!(
                "Analizza questo piatto base: \"{}\" ({}g). \
                 Basandoti sulla ricetta tradizionale italiana, rispondi con un oggetto JSON che contiene: \
                 \"estimatedLactose\" (il lattosio del piatto base stesso, escludendo ingredienti extra) e \
                 \"hiddenIngredients\" (un array di massimo 2 ingredienti \"nascosti\" comuni con lattosio \
                 che un utente potrebbe dimenticare, es. burro per mantecare, panna in una salsa). \
                 Ogni oggetto in \"hiddenIngredients\" deve avere \"name\" e \"estimatedGrams\". \
                 Se non ci sono ingredienti nascosti comuni, l'array sarà vuoto. Sii conservativo.",
                input.name, input.weight
            ),
            get_base_dish_schema(),
        ),
        AnalysisRequest::GetIngredientQuantity(input) => PromptPayload::text(format!(
            "Dato un piatto base come \"{}\", qual è una quantità realistica in grammi \
             per l'ingrediente \"{}\"? Rispondi SOLO con un numero (es. \"80\").",
            input.base_dish, input.ingredient_name
        )),
        AnalysisRequest::GetBaseDishWeight(input) => PromptPayload::text(format!(
            "Analizza questo piatto: \"{}\". Stima il suo peso standard in grammi \
             per una singola porzione. Rispondi SOLO con un numero (es. \"325\" per \"Pizza\").",
            input.dish_name
        )),
    }
}
