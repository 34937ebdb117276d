use std::fmt::Write;

use serde_json::json;

use crate::domain::{
    inventory::{
        entities::Quantity,
        expiry::format_expiry,
        ranking::{RankedInventory, Urgency},
    },
    recipe::value_objects::GenerateRecipesInput,
};

/// Returns the JSON schema for recipe LLM responses
pub fn get_recipe_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "recipes": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "cooking_time": { "type": "string" },
                        "servings": { "type": "integer" },
                        "urgency": { "type": "string", "enum": ["high", "medium", "low"] },
                        "urgency_reason": { "type": "string" },
                        "inventory_items_used": { "type": "array", "items": { "type": "string" } },
                        "additional_ingredients": { "type": "array", "items": { "type": "string" } },
                        "food_types_used": { "type": "array", "items": { "type": "string" } },
                        "inventory_only": { "type": "boolean" },
                        "nutrition_per_serving": {
                            "type": "object",
                            "properties": {
                                "calories": { "type": "integer" },
                                "protein": { "type": "integer" },
                                "carbs": { "type": "integer" },
                                "fats": { "type": "integer" }
                            },
                            "required": ["calories", "protein", "carbs", "fats"]
                        },
                        "instructions": { "type": "array", "items": { "type": "string" } }
                    },
                    "required": [
                        "name", "cooking_time", "servings", "urgency", "urgency_reason",
                        "inventory_items_used", "additional_ingredients", "food_types_used",
                        "inventory_only", "nutrition_per_serving", "instructions"
                    ]
                }
            }
        },
        "required": ["recipes"]
    })
}

fn describe_urgency(urgency: &Urgency) -> String {
    match urgency {
        Urgency::Expired { days_overdue } => format!("expired {days_overdue} day(s) ago"),
        Urgency::Today => "expires today".to_string(),
        Urgency::Upcoming { days_until_expiry } => {
            format!("expires in {days_until_expiry} day(s)")
        }
        Urgency::Unknown => "expiry unknown".to_string(),
    }
}

/// Builds the recipe prompt from the ranked inventory, most urgent first.
pub fn build_recipe_prompt(
    ranked: &RankedInventory,
    input: &GenerateRecipesInput,
    target_calories: u32,
) -> String {
    let mut inventory = String::new();
    for entry in &ranked.items {
        let item = &entry.item;
        let quantity = match &item.quantity {
            Quantity::Amount(amount) => amount.to_string(),
            Quantity::Raw(raw) => raw.to_string(),
        };
        let unit = item.unit.as_ref().map(|u| u.as_str()).unwrap_or("");
        let expiry = entry
            .item
            .expiry()
            .date()
            .map(format_expiry)
            .unwrap_or_else(|| "unknown".to_string());

        let _ = writeln!(
            inventory,
            "- {} ({}): {} {}, best before {}, {}, {} urgency",
            item.name,
            item.food_type,
            quantity,
            unit,
            expiry,
            describe_urgency(&entry.urgency),
            entry.level.as_str(),
        );
    }

    let mut prompt = format!(
        "Today is {today}. Here is the food currently in my fridge, most urgent first:\n\
         {inventory}\n\
         Suggest {count} recipe(s) that use the items expiring soonest first. \
         Each serving should be close to {target_calories} calories. \
         For every recipe give: name, cooking_time, servings, urgency (high, medium or low, \
         matching the most urgent inventory item it uses), urgency_reason, \
         inventory_items_used (names exactly as listed above), additional_ingredients, \
         food_types_used, inventory_only (true when no additional ingredients are needed), \
         nutrition_per_serving (calories, protein, carbs, fats) and step by step instructions.",
        today = format_expiry(ranked.as_of),
        count = input.num_recipes,
    );

    if let Some(restrictions) = input
        .dietary_restrictions
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
    {
        let _ = write!(prompt, " Dietary restrictions: {restrictions}.");
    }
    if let Some(cuisine) = input
        .cuisine_preference
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
    {
        let _ = write!(prompt, " Preferred cuisine: {cuisine}.");
    }

    prompt.push_str(" Respond in JSON as {\"recipes\": [...]}.");
    prompt
}
