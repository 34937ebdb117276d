use super::handlers::cook_recipe::{__path_cook_recipe, cook_recipe};
use super::handlers::generate_recipes::{__path_generate_recipes, generate_recipes};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::post};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(generate_recipes, cook_recipe))]
pub struct RecipeApiDoc;

pub fn recipe_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!("{}/bins/{{bin_id}}/recipes", state.args.server.root_path),
            post(generate_recipes),
        )
        .route(
            &format!(
                "{}/bins/{{bin_id}}/recipes/cooked",
                state.args.server.root_path
            ),
            post(cook_recipe),
        )
}
