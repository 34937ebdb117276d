use super::handlers::get_daily_summary::{__path_get_daily_summary, get_daily_summary};
use crate::application::http::server::app_state::AppState;
use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(get_daily_summary))]
pub struct MealLogApiDoc;

pub fn meal_log_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/bins/{{bin_id}}/meals", state.args.server.root_path),
        get(get_daily_summary),
    )
}
