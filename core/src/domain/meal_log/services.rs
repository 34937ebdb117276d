use chrono::Utc;

use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    food_analysis::ports::LLMClient,
    inventory::ports::InventoryStore,
    meal_log::{
        entities::{DailyNutritionSummary, daily_summary},
        ports::MealLogService,
        value_objects::GetDailySummaryInput,
    },
};

impl<S, LLM> MealLogService for Service<S, LLM>
where
    S: InventoryStore,
    LLM: LLMClient,
{
    async fn get_daily_summary(
        &self,
        input: GetDailySummaryInput,
    ) -> Result<DailyNutritionSummary, CoreError> {
        let document = self.load_document(&input.bin_id).await?;
        let date = input.date.unwrap_or_else(|| Utc::now().date_naive());

        Ok(daily_summary(&document.meal_log, date, input.goal))
    }
}
