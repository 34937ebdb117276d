use crate::application::http::recipe::validators::GenerateRecipesValidator;
use crate::application::http::server::api_entities::api_error::{ApiError, ValidateJson};
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, State};
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::meal_log::entities::CalorieGoal;
use foogie_core::domain::recipe::ports::RecipeService;
use foogie_core::domain::recipe::value_objects::{GenerateRecipesInput, GeneratedRecipes};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GenerateRecipesResponse {
    pub data: GeneratedRecipes,
}

#[utoipa::path(
    post,
    path = "",
    tag = "recipe",
    summary = "Generate recipes",
    description = "Suggests recipes that use the bin's soonest-expiring food first. Without an explicit per-meal calorie target, the target is what is left of today's calorie goal per remaining meal.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
    ),
    responses(
        (status = 200, body = GenerateRecipesResponse),
        (status = 404, description = "The bin has no inventory")
    ),
    request_body = GenerateRecipesValidator
)]
pub async fn generate_recipes(
    Path(bin_id): Path<String>,
    State(state): State<AppState>,
    ValidateJson(payload): ValidateJson<GenerateRecipesValidator>,
) -> Result<Response<GenerateRecipesResponse>, ApiError> {
    let bin_id = BinId::parse(bin_id)?;

    let generated = state
        .service
        .generate_recipes(GenerateRecipesInput {
            bin_id,
            num_recipes: payload.num_recipes,
            dietary_restrictions: payload.dietary_restrictions,
            cuisine_preference: payload.cuisine_preference,
            target_calories_per_meal: payload.target_calories_per_meal,
            goal: CalorieGoal::new(payload.daily_calorie_goal, payload.meals_per_day),
            today: None,
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GenerateRecipesResponse { data: generated }))
}
