use crate::application::http::{
    food_analysis::router::FoodAnalysisApiDoc, health::HealthApiDoc,
    inventory::router::InventoryApiDoc, meal_log::router::MealLogApiDoc,
    recipe::router::RecipeApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Foogie API"
    ),
    nest(
        (path = "/bins", api = InventoryApiDoc),
        (path = "/bins/{bin_id}/food-analysis", api = FoodAnalysisApiDoc),
        (path = "/bins/{bin_id}/recipes", api = RecipeApiDoc),
        (path = "/bins/{bin_id}/meals", api = MealLogApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
