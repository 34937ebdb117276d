use chrono::Utc;
use serde_json::Value;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::{helpers::extract_json_payload, ports::LLMClient},
    inventory::{
        consumption::consume, ports::InventoryStore, ranking::ranked_inventory,
        services::BinUpdate,
    },
    meal_log::entities::{MealLogEntry, daily_summary},
    recipe::{
        entities::Recipe,
        ports::RecipeService,
        schema::{build_recipe_prompt, get_recipe_schema},
        value_objects::{
            CookRecipeInput, CookedRecipe, DEFAULT_TARGET_CALORIES_PER_MEAL, GenerateRecipesInput,
            GeneratedRecipes, MAX_RECIPES,
        },
    },
};

/// Reads recipes from a model reply. Entries that do not look like a recipe
/// are dropped.
pub fn recipes_from_response(raw: &str) -> Result<Vec<Recipe>, CoreError> {
    let payload = extract_json_payload(raw).ok_or_else(|| {
        tracing::error!("Recipe response contains no JSON");
        CoreError::ExternalServiceError("LLM response contains no JSON".to_string())
    })?;

    let parsed: Value = serde_json::from_str(payload).map_err(|e| {
        tracing::error!("Failed to parse recipe response: {}", e);
        CoreError::ExternalServiceError(format!("Failed to parse LLM response: {}", e))
    })?;

    let entries = match parsed {
        Value::Array(entries) => entries,
        Value::Object(mut fields) => match fields.remove("recipes") {
            Some(Value::Array(entries)) => entries,
            _ => {
                return Err(CoreError::ExternalServiceError(
                    "No recipes field in response".to_string(),
                ));
            }
        },
        _ => {
            return Err(CoreError::ExternalServiceError(
                "Invalid recipes format".to_string(),
            ));
        }
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<Recipe>(entry) {
            Ok(recipe) if !recipe.name.trim().is_empty() => Some(recipe),
            Ok(_) => {
                tracing::warn!("Dropping recipe without a name");
                None
            }
            Err(e) => {
                tracing::warn!("Dropping malformed recipe: {}", e);
                None
            }
        })
        .collect())
}

impl<S, LLM> RecipeService for Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    async fn generate_recipes(
        &self,
        input: GenerateRecipesInput,
    ) -> Result<GeneratedRecipes, CoreError> {
        if input.num_recipes == 0 || input.num_recipes > MAX_RECIPES {
            return Err(CoreError::Invalid(format!(
                "num_recipes must be between 1 and {}",
                MAX_RECIPES
            )));
        }

        let document = self.load_document(&input.bin_id).await?;
        if document.inventory.is_empty() {
            return Err(CoreError::EmptyInventory);
        }

        let today = input.today.unwrap_or_else(|| Utc::now().date_naive());
        let target_calories = input.target_calories_per_meal.unwrap_or_else(|| {
            match daily_summary(&document.meal_log, today, input.goal).calories_per_meal {
                0 => DEFAULT_TARGET_CALORIES_PER_MEAL,
                calories => calories,
            }
        });

        let ranked = ranked_inventory(&document.inventory, today);
        let prompt = build_recipe_prompt(&ranked, &input, target_calories);

        let raw_response = self
            .llm_client
            .generate_with_text(prompt, get_recipe_schema())
            .await?;

        let mut recipes = recipes_from_response(&raw_response)?;
        if recipes.is_empty() {
            return Err(CoreError::ExternalServiceError(
                "LLM returned no usable recipes".to_string(),
            ));
        }
        recipes.truncate(usize::from(input.num_recipes));

        tracing::info!(
            bin_id = %input.bin_id,
            recipes = recipes.len(),
            "Recipes generated"
        );

        Ok(GeneratedRecipes {
            as_of: today,
            recipes,
        })
    }

    async fn cook_recipe(&self, input: CookRecipeInput) -> Result<CookedRecipe, CoreError> {
        let recipe_name = input.recipe_name.trim();
        if recipe_name.is_empty() {
            return Err(CoreError::Invalid("recipe name must not be empty".to_string()));
        }
        if input.servings == 0 {
            return Err(CoreError::Invalid("servings must be at least 1".to_string()));
        }

        let today = input.today.unwrap_or_else(|| Utc::now().date_naive());
        let meal = MealLogEntry {
            logged_at: Some(Utc::now()),
            ..MealLogEntry::new(
                recipe_name,
                input.servings,
                input.nutrition_per_serving.for_servings(input.servings),
                Some(today),
            )
        };

        let cooked = self
            .mutate_bin(&input.bin_id, |existing| {
                let mut document = existing.unwrap_or_default();
                let consumption =
                    consume(std::mem::take(&mut document.inventory), &input.ingredients);

                document.inventory = consumption.inventory.clone();
                document.meal_log.push(meal.clone());
                let daily = daily_summary(&document.meal_log, today, input.goal);

                Ok(BinUpdate {
                    write: Some(document),
                    output: CookedRecipe {
                        meal: meal.clone(),
                        consumption,
                        daily,
                    },
                })
            })
            .await?;

        tracing::info!(
            bin_id = %input.bin_id,
            recipe = %cooked.meal.recipe_name,
            calories = cooked.meal.nutrition.calories,
            shortfalls = cooked.consumption.shortfalls.len(),
            "Recipe cooked"
        );

        Ok(cooked)
    }
}
