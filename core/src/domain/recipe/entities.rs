use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::inventory::{
    entities::{Nutrition, lenient_nutrient},
    ranking::UrgencyLevel,
};

/// A recipe suggested from the current inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub name: String,
    #[serde(default)]
    #[schema(example = "25 minutes")]
    pub cooking_time: String,
    #[serde(default = "default_servings")]
    pub servings: u32,
    #[serde(default = "default_urgency")]
    pub urgency: UrgencyLevel,
    #[serde(default)]
    pub urgency_reason: String,
    #[serde(default)]
    pub inventory_items_used: Vec<String>,
    #[serde(default)]
    pub additional_ingredients: Vec<String>,
    #[serde(default)]
    pub food_types_used: Vec<String>,
    #[serde(default)]
    pub inventory_only: bool,
    #[serde(default)]
    pub nutrition_per_serving: RecipeNutrition,
    #[serde(default)]
    pub instructions: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecipeNutrition {
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub calories: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub protein: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub carbs: u32,
    #[serde(default, deserialize_with = "lenient_nutrient")]
    pub fats: u32,
}

impl RecipeNutrition {
    /// Totals for `servings` servings.
    pub fn for_servings(self, servings: u32) -> Nutrition {
        Nutrition {
            calories: self.calories.saturating_mul(servings),
            carbs: self.carbs.saturating_mul(servings),
            fats: self.fats.saturating_mul(servings),
            protein: self.protein.saturating_mul(servings),
        }
    }
}

fn default_servings() -> u32 {
    1
}

fn default_urgency() -> UrgencyLevel {
    UrgencyLevel::Low
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_recipe_defaults_missing_fields() {
        let recipe: Recipe = serde_json::from_value(json!({
            "name": "Apple crumble",
            "urgency": "high",
            "nutrition_per_serving": { "calories": "320 kcal", "protein": 4 }
        }))
        .unwrap();

        assert_eq!(recipe.servings, 1);
        assert_eq!(recipe.urgency, UrgencyLevel::High);
        assert_eq!(recipe.nutrition_per_serving.calories, 320);
        assert_eq!(recipe.nutrition_per_serving.protein, 4);
        assert!(recipe.instructions.is_empty());
    }

    #[test]
    fn test_nutrition_scales_with_servings() {
        let per_serving = RecipeNutrition {
            calories: 320,
            protein: 4,
            carbs: 50,
            fats: 11,
        };

        let total = per_serving.for_servings(3);

        assert_eq!(total.calories, 960);
        assert_eq!(total.protein, 12);
        assert_eq!(total.carbs, 150);
        assert_eq!(total.fats, 33);
        assert_eq!(
            RecipeNutrition {
                calories: u32::MAX,
                ..per_serving
            }
            .for_servings(2)
            .calories,
            u32::MAX
        );
    }
}
