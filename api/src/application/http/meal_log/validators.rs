use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, Validate, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DailySummaryParams {
    /// Day to summarize, `YYYY-MM-DD`. Defaults to today (UTC).
    #[schema(example = "2025-11-10")]
    pub date: Option<NaiveDate>,

    /// Defaults to 2000.
    #[validate(range(
        min = 500,
        max = 10000,
        message = "daily_calorie_goal must be between 500 and 10000"
    ))]
    #[schema(example = 2000)]
    pub daily_calorie_goal: Option<u32>,

    /// Defaults to 3.
    #[validate(range(min = 1, max = 10, message = "meals_per_day must be between 1 and 10"))]
    #[schema(example = 3)]
    pub meals_per_day: Option<u32>,
}
