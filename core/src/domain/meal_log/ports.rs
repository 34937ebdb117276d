use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    meal_log::{entities::DailyNutritionSummary, value_objects::GetDailySummaryInput},
};

#[cfg_attr(test, mockall::automock)]
pub trait MealLogService: Send + Sync {
    /// Nutrition eaten on one day, measured against a calorie goal.
    fn get_daily_summary(
        &self,
        input: GetDailySummaryInput,
    ) -> impl Future<Output = Result<DailyNutritionSummary, CoreError>> + Send;
}
