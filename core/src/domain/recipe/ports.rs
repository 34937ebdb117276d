use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    recipe::value_objects::{CookRecipeInput, CookedRecipe, GenerateRecipesInput, GeneratedRecipes},
};

#[cfg_attr(test, mockall::automock)]
pub trait RecipeService: Send + Sync {
    /// Suggests recipes that use up the bin's most urgent food first.
    fn generate_recipes(
        &self,
        input: GenerateRecipesInput,
    ) -> impl Future<Output = Result<GeneratedRecipes, CoreError>> + Send;

    /// Takes the recipe's ingredients out of the bin and logs the meal.
    /// Ingredients that are missing or short are reported, not fatal.
    fn cook_recipe(
        &self,
        input: CookRecipeInput,
    ) -> impl Future<Output = Result<CookedRecipe, CoreError>> + Send;
}
