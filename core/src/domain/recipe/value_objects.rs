use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    inventory::{
        consumption::{ConsumptionOutcome, ConsumptionRequest},
        entities::BinId,
    },
    meal_log::entities::{CalorieGoal, DailyNutritionSummary, MealLogEntry},
    recipe::entities::{Recipe, RecipeNutrition},
};

pub const MAX_RECIPES: u8 = 10;
pub const DEFAULT_TARGET_CALORIES_PER_MEAL: u32 = 500;

#[derive(Debug, Clone)]
pub struct GenerateRecipesInput {
    pub bin_id: BinId,
    pub num_recipes: u8,
    pub dietary_restrictions: Option<String>,
    pub cuisine_preference: Option<String>,
    /// When unset, the target is what is left of today's calorie goal per
    /// remaining meal.
    pub target_calories_per_meal: Option<u32>,
    pub goal: CalorieGoal,
    /// Defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GeneratedRecipes {
    pub as_of: NaiveDate,
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone)]
pub struct CookRecipeInput {
    pub bin_id: BinId,
    pub recipe_name: String,
    pub servings: u32,
    pub nutrition_per_serving: RecipeNutrition,
    /// Inventory amounts the recipe uses up.
    pub ingredients: Vec<ConsumptionRequest>,
    pub goal: CalorieGoal,
    /// Defaults to the current UTC date.
    pub today: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CookedRecipe {
    pub meal: MealLogEntry,
    pub consumption: ConsumptionOutcome,
    /// The day's totals including this meal.
    pub daily: DailyNutritionSummary,
}
