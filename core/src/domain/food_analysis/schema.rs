use chrono::NaiveDate;
use serde_json::json;

use crate::domain::inventory::{
    entities::{FoodType, Unit},
    expiry::format_expiry,
};

/// Returns the JSON schema for food detection LLM responses
pub fn get_inventory_extraction_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "items": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "type": { "type": "string", "enum": FoodType::CATEGORIES },
                        "quantity": { "type": "number" },
                        "unit": { "type": "string", "enum": Unit::RECOGNIZED },
                        "expected_expiry_date": { "type": "string" },
                        "calories": { "type": "integer" },
                        "carbs": { "type": "integer" },
                        "fats": { "type": "integer" },
                        "protein": { "type": "integer" }
                    },
                    "required": ["name", "type", "quantity", "unit", "expected_expiry_date", "calories"]
                }
            }
        },
        "required": ["items"]
    })
}

/// Builds the detection prompt. Everything in the photo is assumed to be
/// bought on `today` and kept in the fridge.
pub fn build_extraction_prompt(today: NaiveDate) -> String {
    format!(
        "In JSON format, list every food item visible in the image. \
         For each item provide: name, type (one of {categories}), \
         quantity (a number; count whole items, weigh foods that cannot be counted), \
         unit (one of {units}; never use volume units), \
         expected_expiry_date in DD/MM/YYYY format, and the total calories, carbs, fats \
         and protein for the whole quantity. \
         Assume everything was bought today ({today}) and is stored in the fridge. \
         Use one entry per distinct food. \
         Respond as {{\"items\": [{{\"name\": \"apple\", \"type\": \"fruit\", \"quantity\": 3, \
         \"unit\": \"items\", \"expected_expiry_date\": \"{example}\", \"calories\": 285}}]}}.",
        categories = FoodType::CATEGORIES.join(", "),
        units = Unit::RECOGNIZED.join(", "),
        today = format_expiry(today),
        example = format_expiry(today + chrono::Days::new(14)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_mentions_date_and_units() {
        let prompt = build_extraction_prompt(NaiveDate::from_ymd_opt(2025, 11, 1).unwrap());

        assert!(prompt.contains("01/11/2025"));
        assert!(prompt.contains("15/11/2025"));
        assert!(prompt.contains("items, grams, containers, eggs"));
        assert!(prompt.contains("DD/MM/YYYY"));
    }

    #[test]
    fn test_schema_restricts_units() {
        let schema = get_inventory_extraction_schema();
        let units = &schema["properties"]["items"]["items"]["properties"]["unit"]["enum"];

        assert_eq!(units.as_array().map(Vec::len), Some(4));
    }
}
