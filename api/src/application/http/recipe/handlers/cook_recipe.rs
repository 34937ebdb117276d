use crate::application::http::recipe::validators::CookRecipeValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use foogie_core::domain::inventory::consumption::ConsumptionRequest;
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::meal_log::entities::CalorieGoal;
use foogie_core::domain::recipe::ports::RecipeService;
use foogie_core::domain::recipe::value_objects::{CookRecipeInput, CookedRecipe};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct CookRecipeResponse {
    pub data: CookedRecipe,
}

#[utoipa::path(
    post,
    path = "/cooked",
    tag = "recipe",
    summary = "Cook a recipe",
    description = "Takes the recipe's ingredients out of the bin, earliest expiry first, and logs the meal with its nutrition for all servings. Missing ingredients are reported as shortfalls.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
    responses(
        (status = 201, body = CookRecipeResponse),
        (status = 409, description = "Inventory changed concurrently")
    ),
    request_body = CookRecipeValidator
)]
pub async fn cook_recipe(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<CookRecipeValidator>,
) -> Result<Response<CookRecipeResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let ingredients = payload
        .ingredients
        .into_iter()
        .map(|(name, amount)| ConsumptionRequest::new(name, amount))
        .collect();

    let cooked = state
        .service
        .cook_recipe(CookRecipeInput {
            bin_id,
            recipe_name: payload.name,
            servings: payload.servings,
            nutrition_per_serving: payload.nutrition_per_serving,
            ingredients,
            goal: CalorieGoal::new(payload.daily_calorie_goal, payload.meals_per_day),
            today: None,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::Created(CookRecipeResponse { data: cooked }))
}
