use crate::application::http::meal_log::validators::DailySummaryParams;
use crate::application::http::server::api_entities::api_error::ApiError;
use crate::application::http::server::api_entities::response::Response;
use crate::application::http::server::app_state::AppState;
use axum::extract::{Path, Query, State};
use foogie_core::domain::inventory::entities::BinId;
use foogie_core::domain::meal_log::entities::{CalorieGoal, DailyNutritionSummary};
use foogie_core::domain::meal_log::ports::MealLogService;
use foogie_core::domain::meal_log::value_objects::GetDailySummaryInput;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct GetDailySummaryResponse {
    pub data: DailyNutritionSummary,
}

#[utoipa::path(
    get,
    path = "",
    tag = "meal-log",
    summary = "Get daily nutrition summary",
    description = "Meals cooked from the bin on one day, their nutrition totals and what is left of the daily calorie goal per remaining meal.",
    params(
        ("bin_id" = String, Path, description = "Bin ID"),
        DailySummaryParams,
    ),
    responses(
        (status = 200, body = GetDailySummaryResponse),
        (status = 422, description = "Goal out of range")
    ),
)]
pub async fn get_daily_summary(
    Path(bin_id): Path<String>,
    Query(params): Query<DailySummaryParams>,
    State(state): State<AppState>,
) -> Result<Response<GetDailySummaryResponse>, ApiError> {
    params
        .validate()
        .map_err(|e| ApiError::UnProcessableEntity(e.to_string()))?;
    let bin_id = BinId::parse(bin_id)?;

    let summary = state
        .service
        .get_daily_summary(GetDailySummaryInput {
            bin_id,
            date: params.date,
            goal: CalorieGoal::new(params.daily_calorie_goal, params.meals_per_day),
        })
        .await
        .map_err(ApiError::from)?;

    Ok(Response::OK(GetDailySummaryResponse { data: summary }))
}
