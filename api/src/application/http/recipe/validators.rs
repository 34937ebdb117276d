use std::collections::BTreeMap;

use foogie_core::domain::recipe::entities::RecipeNutrition;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use validator::Validate;

fn default_num_recipes() -> u8 {
    3
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct GenerateRecipesValidator {
    #[serde(default = "default_num_recipes")]
    #[validate(range(min = 1, max = 10, message = "num_recipes must be between 1 and 10"))]
    #[schema(example = 3)]
    pub num_recipes: u8,

    #[serde(default)]
    #[validate(length(max = 500, message = "dietary_restrictions is too long"))]
    #[schema(example = "vegetarian, no nuts")]
    pub dietary_restrictions: Option<String>,

    #[serde(default)]
    #[validate(length(max = 100, message = "cuisine_preference is too long"))]
    #[schema(example = "italian")]
    pub cuisine_preference: Option<String>,

    #[serde(default)]
    #[validate(range(
        min = 100,
        max = 5000,
        message = "target_calories_per_meal must be between 100 and 5000"
    ))]
    #[schema(example = 500)]
    pub target_calories_per_meal: Option<u32>,

    /// Used to derive the per-meal target when `target_calories_per_meal` is unset.
    #[serde(default)]
    #[validate(range(
        min = 500,
        max = 10000,
        message = "daily_calorie_goal must be between 500 and 10000"
    ))]
    #[schema(example = 2000)]
    pub daily_calorie_goal: Option<u32>,

    #[serde(default)]
    #[validate(range(min = 1, max = 10, message = "meals_per_day must be between 1 and 10"))]
    #[schema(example = 3)]
    pub meals_per_day: Option<u32>,
}

fn default_servings() -> u32 {
    1
}

/// A recipe that was cooked: `{"name": "Tomato pasta", "servings": 2, "ingredients": {"tomato": 3}}`
#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CookRecipeValidator {
    #[validate(length(min = 1, max = 200, message = "name must be between 1 and 200 characters"))]
    #[schema(example = "Tomato pasta")]
    pub name: String,

    #[serde(default = "default_servings")]
    #[validate(range(min = 1, max = 50, message = "servings must be between 1 and 50"))]
    #[schema(example = 2)]
    pub servings: u32,

    #[serde(default)]
    pub nutrition_per_serving: RecipeNutrition,

    /// Inventory amounts used up by the recipe.
    #[serde(default)]
    #[validate(length(max = 100, message = "at most 100 ingredients"))]
    #[schema(value_type = Object, example = json!({"tomato": 3}))]
    pub ingredients: BTreeMap<String, Value>,

    #[serde(default)]
    #[validate(range(
        min = 500,
        max = 10000,
        message = "daily_calorie_goal must be between 500 and 10000"
    ))]
    #[schema(example = 2000)]
    pub daily_calorie_goal: Option<u32>,

    #[serde(default)]
    #[validate(range(min = 1, max = 10, message = "meals_per_day must be between 1 and 10"))]
    #[schema(example = 3)]
    pub meals_per_day: Option<u32>,
}
