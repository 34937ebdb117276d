use super::handlers::analyze_food_image::{__path_analyze_food_image, analyze_food_image};
use crate::application::http::server::app_state::AppState;
use axum::{Router, extract::DefaultBodyLimit, routing::post};
use foogie_core::domain::food_analysis::value_objects::MAX_IMAGE_BYTES;
use utoipa::OpenApi;

/// Room for the multipart framing around a maximum-size image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

#[derive(OpenApi)]
#[openapi(paths(analyze_food_image))]
pub struct FoodAnalysisApiDoc;

pub fn food_analysis_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            &format!(
                "{}/bins/{{bin_id}}/food-analysis/image",
                state.args.server.root_path
            ),
            post(analyze_food_image),
        )
        .layer(DefaultBodyLimit::max(
            MAX_IMAGE_BYTES + MULTIPART_OVERHEAD_BYTES,
        ))
}
